//! Render pass tests against the recording surface.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use horizon_glyph::{
    Color, CompositorConfig, DrawCommand, DrawList, EdgeRect, EmojiCache, EmojiCacheConfig,
    EmojiKey, EmojiSource, FillPaint, Glyph, LayoutSnapshot, PaintColor, Point, Rect,
    RenderError, RenderResult, SceneCompositor, Size, TruncationState,
};
use image::{ImageFormat, Rgba, RgbaImage};

/// Serves a small PNG for every key and counts fetches.
struct BundledEmoji {
    fetches: AtomicUsize,
}

impl BundledEmoji {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fetches: AtomicUsize::new(0),
        })
    }
}

impl EmojiSource for BundledEmoji {
    fn fetch(&self, _key: &EmojiKey) -> RenderResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 200, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        Ok(bytes)
    }
}

struct Unreachable;

impl EmojiSource for Unreachable {
    fn fetch(&self, key: &EmojiKey) -> RenderResult<Vec<u8>> {
        Err(RenderError::EmojiFetch {
            key: key.to_string(),
            reason: "connection refused".into(),
        })
    }
}

fn cache_with(source: Arc<dyn EmojiSource>) -> EmojiCache {
    EmojiCache::new(EmojiCacheConfig::default().with_worker_threads(2), source).unwrap()
}

fn paint(r: f32) -> FillPaint {
    FillPaint::solid(PaintColor::new(r, 0.0, 0.0))
}

/// Ten glyphs, 8 units apart. Glyph `i` has one paint with red `i / 10`,
/// except glyph 3 which has two.
fn ten_glyphs() -> LayoutSnapshot {
    let mut layout = LayoutSnapshot::new(Size::new(80.0, 20.0));
    for i in 0..10 {
        let mut paints = vec![paint(i as f32 / 10.0)];
        if i == 3 {
            paints.push(FillPaint::new(PaintColor::new(0.0, 1.0, 0.0), 0.5));
        }
        layout.push_glyph(
            Glyph::new(Point::new(i as f32 * 8.0, 16.0), format!("M{i} 0Z"), 8.0),
            paints,
            Some(Rect::new(i as f32 * 8.0, 17.0, 8.0, 1.0)),
        );
    }
    layout
}

fn paths(list: &DrawList) -> Vec<(Point, String, Color)> {
    list.commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Path {
                origin,
                outline,
                color,
            } => Some((*origin, outline.data().to_string(), *color)),
            _ => None,
        })
        .collect()
}

fn no_border() -> SceneCompositor {
    SceneCompositor::new(CompositorConfig::default().with_border(false))
}

#[test]
fn test_static_truncation_draws_prefix_and_ellipsis() {
    let mut layout = ten_glyphs();
    layout.truncation = TruncationState::at(5);
    let mut list = DrawList::new();

    let stats = no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));

    // Glyphs 0..5; glyph 3 contributes two paths.
    assert_eq!(stats.glyphs, 6);
    // Three copies of glyph 4 with the two paints of glyph 3.
    assert_eq!(stats.ellipsis, 6);
    assert_eq!(stats.decorations, 6);

    let paths = paths(&list);
    let ellipsis = &paths[..6];
    let g3 = &layout.fill_paints[3];
    let expected = [
        (32.0, g3[0]),
        (32.0, g3[1]),
        (40.0, g3[0]),
        (40.0, g3[1]),
        (48.0, g3[0]),
        (48.0, g3[1]),
    ];
    for ((origin, outline, color), (x, paint)) in ellipsis.iter().zip(expected) {
        assert_eq!(*origin, Point::new(x, 16.0));
        assert_eq!(outline, "M4 0Z");
        assert_eq!(*color, paint.fill_color());
    }
    assert_eq!(ellipsis[1].2.a, 0.5);

    // Nothing past the cutoff.
    assert!(paths.iter().all(|(origin, _, _)| origin.x < 56.0));
}

#[test]
fn test_last_visible_glyph_draws_over_ellipsis() {
    let mut layout = ten_glyphs();
    layout.truncation = TruncationState::at(5);
    let mut list = DrawList::new();

    no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));

    // Glyph 4 and the first ellipsis copy share an origin but not a paint.
    let at_glyph_4: Vec<_> = paths(&list)
        .into_iter()
        .filter(|(origin, _, _)| *origin == Point::new(32.0, 16.0))
        .map(|(_, _, color)| color)
        .collect();
    let g3 = &layout.fill_paints[3];
    let own = layout.fill_paints[4][0].fill_color();
    assert_eq!(
        at_glyph_4,
        vec![g3[0].fill_color(), g3[1].fill_color(), own]
    );
}

#[test]
fn test_static_truncation_at_one_aborts_body() {
    let mut layout = ten_glyphs();
    layout.truncation = TruncationState::at(1);
    layout.selection_rects = vec![Rect::new(0.0, 0.0, 8.0, 20.0)];
    let mut list = DrawList::new();

    let stats = SceneCompositor::default().render(
        &layout,
        &mut list,
        &mut cache_with(BundledEmoji::new()),
    );

    assert!(stats.truncation_aborted);
    assert_eq!(list.stats().paths, 0);
    // Border, the one decoration left of the cutoff and the selection survive.
    assert_eq!(stats.border, 5);
    assert_eq!(stats.decorations, 1);
    assert_eq!(stats.selection, 1);
}

#[test]
fn test_editing_truncation_draws_ghosts() {
    let mut layout = ten_glyphs();
    layout.truncation = TruncationState::at(5);
    layout.has_selection = true;
    layout.is_collapsed = true;
    layout.selection_rects = vec![Rect::new(40.0, 2.0, 1.0, 16.0)];
    let mut list = DrawList::new();

    let stats = no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));

    assert_eq!(stats.glyphs, 6 + 5);
    assert_eq!(stats.ellipsis, 0);
    assert_eq!(stats.decorations, 6);

    let paths = paths(&list);
    let ghost = Color::from_rgb8(153, 153, 153);
    assert!(paths[6..].iter().all(|(_, _, color)| *color == ghost));
    assert_eq!(paths[10].0, Point::new(72.0, 16.0));
}

#[test]
fn test_selection_colors() {
    let mut layout = ten_glyphs();
    layout.has_selection = true;
    layout.selection_rects = vec![Rect::new(0.0, 0.0, 16.0, 20.0), Rect::new(0.0, 20.0, 8.0, 20.0)];
    let mut list = DrawList::new();

    no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));

    let highlights: Vec<Color> = list.commands()[list.len() - 2..]
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Rect { fill, .. } => *fill,
            _ => None,
        })
        .collect();
    assert_eq!(highlights.len(), 2);
    for color in highlights {
        assert_eq!(color.to_rgb8(), [11, 153, 255]);
        assert_eq!(color.a, 0.3);
    }
}

#[test]
fn test_empty_selection_draws_nothing_extra() {
    let layout = ten_glyphs();
    let mut list = DrawList::new();

    let stats = no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));
    assert_eq!(stats.selection, 0);
    // Glyph 3 has two paints, for both its body and its band.
    assert_eq!(list.len(), 11 + 11);
}

#[test]
fn test_invisible_paints_emit_nothing() {
    let mut layout = LayoutSnapshot::new(Size::new(20.0, 20.0));
    layout.push_glyph(
        Glyph::new(Point::ZERO, "M0 0Z", 8.0),
        vec![paint(1.0), paint(0.5).with_visible(false), paint(0.2)],
        Some(Rect::new(0.0, 17.0, 8.0, 1.0)),
    );
    let mut list = DrawList::new();

    let stats = no_border().render(&layout, &mut list, &mut cache_with(BundledEmoji::new()));
    assert_eq!(stats.glyphs, 2);
    assert_eq!(stats.decorations, 2);
}

#[test]
fn test_passes_are_deterministic() {
    let mut layout = ten_glyphs();
    layout.truncation = TruncationState::at(7);
    layout.baselines = Some(vec![]);
    let compositor = SceneCompositor::new(CompositorConfig::default().with_baselines(true));
    let mut cache = cache_with(Arc::new(Unreachable));

    let mut first = DrawList::new();
    let mut second = DrawList::new();
    compositor.render(&layout, &mut first, &mut cache);
    compositor.render(&layout, &mut second, &mut cache);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_emoji_fetched_once_and_drawn_on_completion() {
    let mut layout = ten_glyphs();
    let rect = EdgeRect::new(80.0, 2.0, 96.0, 18.0);
    layout.push_glyph(
        Glyph::whitespace(Point::new(80.0, 16.0), 16.0).with_emoji(vec![0x1F600], rect),
        vec![],
        None,
    );
    let source = BundledEmoji::new();
    let mut cache = cache_with(source.clone());
    let compositor = no_border();

    let mut list = DrawList::new();
    let first = compositor.render(&layout, &mut list, &mut cache);
    compositor.render(&layout, &mut list, &mut cache);
    assert_eq!(first.emoji, 0);
    assert_eq!(list.stats().images, 0);

    assert_eq!(cache.wait_completed(&mut list, Duration::from_secs(5)), 1);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    match list.commands().last() {
        Some(DrawCommand::Image { rect, image }) => {
            assert_eq!(*rect, Rect::new(80.0, 2.0, 16.0, 16.0));
            assert_eq!(image.width(), 4);
        }
        other => panic!("expected image, got {other:?}"),
    }

    let mut next = DrawList::new();
    let stats = compositor.render(&layout, &mut next, &mut cache);
    assert_eq!(stats.emoji, 1);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_emoji_leaves_area_blank() {
    let mut layout = LayoutSnapshot::new(Size::new(20.0, 20.0));
    layout.push_glyph(
        Glyph::whitespace(Point::ZERO, 16.0)
            .with_emoji(vec![0x1F9FF], EdgeRect::new(0.0, 0.0, 16.0, 16.0)),
        vec![],
        None,
    );
    let mut cache = cache_with(Arc::new(Unreachable));
    let mut list = DrawList::new();

    no_border().render(&layout, &mut list, &mut cache);
    cache.wait_completed(&mut list, Duration::from_secs(5));
    no_border().render(&layout, &mut list, &mut cache);

    assert_eq!(list.stats().images, 0);
    let key = EmojiKey::from_code_points(&[0x1F9FF]).unwrap();
    assert!(cache.state(&key).unwrap().is_failed());
}
