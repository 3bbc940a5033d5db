//! Session-scoped emoji bitmap cache with background fetching.
//!
//! The cache hands each unseen key to a pool of worker threads that fetch
//! and decode the image. Results are collected on the render thread by
//! [`EmojiCache::process_completed`], which also draws each newly available
//! bitmap at the placement recorded by whoever asked for it first.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use horizon_glyph::{DrawList, EmojiCache, EmojiCacheConfig, EmojiKey, Rect};
//! # use horizon_glyph::{EmojiSource, RenderResult};
//! # struct Bundled;
//! # impl EmojiSource for Bundled {
//! #     fn fetch(&self, _key: &EmojiKey) -> RenderResult<Vec<u8>> { Ok(Vec::new()) }
//! # }
//!
//! # fn example() -> horizon_glyph::RenderResult<()> {
//! let mut cache = EmojiCache::new(EmojiCacheConfig::default(), Arc::new(Bundled))?;
//! let mut surface = DrawList::new();
//!
//! let key = EmojiKey::from_code_points(&[0x1F600]).unwrap();
//! let placement = Rect::new(0.0, 0.0, 16.0, 16.0);
//!
//! // Not cached yet: a fetch starts in the background.
//! assert!(cache.ensure(&key, Some(placement)).is_none());
//!
//! // Later, once per frame:
//! cache.process_completed(&mut surface);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::emoji::{EmojiBitmap, EmojiKey, EmojiSource};
use crate::error::{RenderError, RenderResult};
use crate::logging::targets;
use crate::surface::DrawSurface;
use crate::types::Rect;

#[cfg(feature = "networking")]
const DEFAULT_ENDPOINT: &str = horizon_glyph_net::DEFAULT_EMOJI_ENDPOINT;
#[cfg(not(feature = "networking"))]
const DEFAULT_ENDPOINT: &str = "https://static.figma.com/emoji/5/apple/medium/{key}.png";

/// Configuration for the emoji cache.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmojiCacheConfig {
    /// Number of fetch worker threads.
    /// Defaults to the number of CPU cores, capped at 4.
    pub worker_threads: usize,
    /// Maximum number of fetches in flight. Requests past this limit are
    /// refused without being recorded, so they are retried on a later pass.
    /// Defaults to 256.
    pub max_pending: usize,
    /// Image URL template; `{key}` is replaced by the emoji key.
    pub endpoint: String,
    /// Per-fetch timeout in milliseconds. Must be greater than zero.
    pub fetch_timeout_ms: u64,
    /// Connect timeout in milliseconds. Must be greater than zero.
    pub connect_timeout_ms: u64,
    /// User agent for emoji downloads; the client default when unset.
    pub user_agent: Option<String>,
}

impl Default for EmojiCacheConfig {
    fn default() -> Self {
        let cores = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(2);
        Self {
            worker_threads: cores.min(4),
            max_pending: 256,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fetch_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            user_agent: None,
        }
    }
}

impl EmojiCacheConfig {
    /// The per-fetch timeout.
    #[inline]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// The connect timeout.
    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn with_worker_threads(mut self, count: usize) -> Self {
        self.worker_threads = count;
        self
    }

    /// Set the in-flight fetch limit.
    #[must_use]
    pub fn with_max_pending(mut self, max: usize) -> Self {
        self.max_pending = max;
        self
    }

    /// Set the image URL template.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = whole_millis(timeout);
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = whole_millis(timeout);
        self
    }

    /// Set the user agent for emoji downloads.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Milliseconds in `duration`, rounding a non-zero sub-millisecond value up.
fn whole_millis(duration: Duration) -> u64 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if millis == 0 && !duration.is_zero() {
        1
    } else {
        millis
    }
}

/// What the cache knows about one key.
#[derive(Debug, Clone, PartialEq)]
pub enum EmojiEntry {
    /// A fetch is in flight. `placement` is where the first requester wants
    /// the bitmap drawn once it arrives.
    Pending { placement: Option<Rect> },
    /// The bitmap is decoded and ready.
    Ready(EmojiBitmap),
    /// The fetch failed. Failed keys are not retried until
    /// [`EmojiCache::forget_failed`] is called.
    Failed { reason: String },
}

impl EmojiEntry {
    /// Returns `true` while the fetch is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns `true` once the bitmap is available.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns `true` if the fetch failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The bitmap, if ready.
    #[inline]
    pub fn bitmap(&self) -> Option<&EmojiBitmap> {
        match self {
            Self::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

enum FetchRequest {
    Fetch(EmojiKey),
    Shutdown,
}

struct CompletedFetch {
    key: EmojiKey,
    result: RenderResult<EmojiBitmap>,
}

/// Emoji bitmap cache shared by every render pass of a session.
///
/// Each key is fetched at most once. The cache is owned by the render
/// thread; only the fetch and decode happen on workers.
pub struct EmojiCache {
    request_tx: Sender<FetchRequest>,
    completed_rx: Receiver<CompletedFetch>,
    workers: Vec<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    entries: HashMap<EmojiKey, EmojiEntry>,
    in_flight: usize,
    config: EmojiCacheConfig,
}

impl EmojiCache {
    /// Create a cache that fetches through `source`.
    pub fn new(config: EmojiCacheConfig, source: Arc<dyn EmojiSource>) -> RenderResult<Self> {
        let (request_tx, request_rx) = channel::<FetchRequest>();
        let (completed_tx, completed_rx) = channel::<CompletedFetch>();
        let request_rx = Arc::new(Mutex::new(request_rx));
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker_count = config.worker_threads.max(1);
        let mut workers = Vec::with_capacity(worker_count);
        for i in 0..worker_count {
            let rx = Arc::clone(&request_rx);
            let tx = completed_tx.clone();
            let source = Arc::clone(&source);
            let flag = Arc::clone(&shutdown);
            let spawned = thread::Builder::new()
                .name(format!("emoji-worker-{i}"))
                .spawn(move || Self::worker_thread(rx, tx, source, flag));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    shutdown.store(true, Ordering::Release);
                    for _ in 0..workers.len() {
                        let _ = request_tx.send(FetchRequest::Shutdown);
                    }
                    for worker in workers.drain(..) {
                        let _ = worker.join();
                    }
                    return Err(RenderError::WorkerSpawn(err));
                }
            }
        }

        debug!(target: targets::EMOJI, workers = worker_count, "emoji cache started");

        Ok(Self {
            request_tx,
            completed_rx,
            workers,
            shutdown,
            entries: HashMap::new(),
            in_flight: 0,
            config,
        })
    }

    /// Create a cache that downloads from the configured endpoint.
    #[cfg(feature = "networking")]
    pub fn with_http(config: EmojiCacheConfig) -> RenderResult<Self> {
        let source = crate::emoji::HttpEmojiSource::from_config(&config)?;
        Self::new(config, Arc::new(source))
    }

    fn worker_thread(
        request_rx: Arc<Mutex<Receiver<FetchRequest>>>,
        completed_tx: Sender<CompletedFetch>,
        source: Arc<dyn EmojiSource>,
        shutdown: Arc<AtomicBool>,
    ) {
        loop {
            let request = {
                let rx = request_rx.lock();
                rx.recv()
            };

            match request {
                Ok(FetchRequest::Fetch(_)) if shutdown.load(Ordering::Acquire) => break,
                Ok(FetchRequest::Fetch(key)) => {
                    let result = source
                        .fetch(&key)
                        .and_then(|bytes| EmojiBitmap::decode(&bytes));
                    if completed_tx.send(CompletedFetch { key, result }).is_err() {
                        break;
                    }
                }
                Ok(FetchRequest::Shutdown) | Err(_) => break,
            }
        }
    }

    /// Return the bitmap for `key` if it is ready, starting a fetch if the
    /// key has never been seen.
    ///
    /// `placement` is only recorded by the call that starts the fetch; later
    /// callers for a pending key get `None` and their placement is ignored.
    pub fn ensure(&mut self, key: &EmojiKey, placement: Option<Rect>) -> Option<EmojiBitmap> {
        match self.entries.get(key) {
            Some(EmojiEntry::Ready(bitmap)) => return Some(bitmap.clone()),
            Some(_) => return None,
            None => {}
        }

        if self.in_flight >= self.config.max_pending {
            let err = RenderError::TooManyPending {
                max: self.config.max_pending,
            };
            warn!(target: targets::EMOJI, key = %key, error = %err, "emoji fetch deferred");
            return None;
        }

        self.entries
            .insert(key.clone(), EmojiEntry::Pending { placement });

        if self
            .request_tx
            .send(FetchRequest::Fetch(key.clone()))
            .is_err()
        {
            let reason = RenderError::WorkersShutDown.to_string();
            warn!(target: targets::EMOJI, key = %key, %reason, "emoji fetch not started");
            self.entries
                .insert(key.clone(), EmojiEntry::Failed { reason });
            return None;
        }

        self.in_flight += 1;
        debug!(target: targets::EMOJI, key = %key, in_flight = self.in_flight, "emoji fetch started");
        None
    }

    /// Collect finished fetches without blocking.
    ///
    /// Each new bitmap is drawn onto `surface` at the placement recorded when
    /// its fetch started. Returns the number of fetches collected.
    pub fn process_completed<S>(&mut self, surface: &mut S) -> usize
    where
        S: DrawSurface + ?Sized,
    {
        let mut collected = 0;
        while let Ok(completed) = self.completed_rx.try_recv() {
            self.complete(completed, surface);
            collected += 1;
        }
        collected
    }

    /// Block until every in-flight fetch has finished or `timeout` elapses.
    ///
    /// Returns the number of fetches collected.
    pub fn wait_completed<S>(&mut self, surface: &mut S, timeout: Duration) -> usize
    where
        S: DrawSurface + ?Sized,
    {
        let deadline = Instant::now() + timeout;
        let mut collected = self.process_completed(surface);

        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.completed_rx.recv_timeout(remaining) {
                Ok(completed) => {
                    self.complete(completed, surface);
                    collected += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    trace!(target: targets::EMOJI, in_flight = self.in_flight, "wait timed out");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        collected
    }

    fn complete<S>(&mut self, completed: CompletedFetch, surface: &mut S)
    where
        S: DrawSurface + ?Sized,
    {
        self.in_flight = self.in_flight.saturating_sub(1);
        let CompletedFetch { key, result } = completed;

        let placement = match self.entries.get(&key) {
            Some(EmojiEntry::Pending { placement }) => *placement,
            _ => None,
        };

        match result {
            Ok(bitmap) => {
                debug!(
                    target: targets::EMOJI,
                    key = %key,
                    width = bitmap.width(),
                    height = bitmap.height(),
                    "emoji ready"
                );
                if let Some(rect) = placement {
                    surface.draw_image(rect, &bitmap);
                }
                self.entries.insert(key, EmojiEntry::Ready(bitmap));
            }
            Err(err) => {
                warn!(target: targets::EMOJI, key = %key, error = %err, "emoji fetch failed");
                self.entries.insert(
                    key,
                    EmojiEntry::Failed {
                        reason: err.to_string(),
                    },
                );
            }
        }
    }

    /// What the cache knows about `key`.
    pub fn state(&self, key: &EmojiKey) -> Option<&EmojiEntry> {
        self.entries.get(key)
    }

    /// The bitmap for `key`, if ready. Never starts a fetch.
    pub fn get(&self, key: &EmojiKey) -> Option<&EmojiBitmap> {
        self.state(key).and_then(EmojiEntry::bitmap)
    }

    /// Number of fetches in flight.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Number of tracked keys (pending, ready and failed).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been requested yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configuration in use.
    pub fn config(&self) -> &EmojiCacheConfig {
        &self.config
    }

    /// Drop every failed entry so the next [`ensure`](Self::ensure) for
    /// those keys fetches again. Returns the number of entries dropped.
    pub fn forget_failed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_failed());
        before - self.entries.len()
    }
}

impl std::fmt::Debug for EmojiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmojiCache")
            .field("entries", &self.entries.len())
            .field("in_flight", &self.in_flight)
            .field("workers", &self.workers.len())
            .finish()
    }
}

impl Drop for EmojiCache {
    fn drop(&mut self) {
        // Queued fetches are abandoned; only fetches already running finish.
        self.shutdown.store(true, Ordering::Release);
        for _ in 0..self.workers.len() {
            let _ = self.request_tx.send(FetchRequest::Shutdown);
        }
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::AtomicUsize;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    const WAIT: Duration = Duration::from_secs(5);

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EmojiSource for CountingSource {
        fn fetch(&self, key: &EmojiKey) -> RenderResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RenderError::EmojiFetch {
                    key: key.to_string(),
                    reason: "not found".into(),
                });
            }
            let img = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]));
            let mut bytes = Vec::new();
            img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .unwrap();
            Ok(bytes)
        }
    }

    fn config() -> EmojiCacheConfig {
        EmojiCacheConfig::default().with_worker_threads(2)
    }

    fn grin() -> EmojiKey {
        EmojiKey::from_code_points(&[0x1F600]).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = EmojiCacheConfig::default();
        assert!(config.worker_threads >= 1 && config.worker_threads <= 4);
        assert_eq!(config.max_pending, 256);
        assert!(config.endpoint.contains("{key}"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_sub_second_timeouts_survive() {
        let config = EmojiCacheConfig::default()
            .with_fetch_timeout(Duration::from_millis(800))
            .with_connect_timeout(Duration::from_micros(300));
        assert_eq!(config.fetch_timeout(), Duration::from_millis(800));
        assert_eq!(config.connect_timeout(), Duration::from_millis(1));

        let zero = EmojiCacheConfig::default().with_fetch_timeout(Duration::ZERO);
        assert_eq!(zero.fetch_timeout_ms, 0);
    }

    struct SlowSource {
        calls: AtomicUsize,
    }

    impl EmojiSource for SlowSource {
        fn fetch(&self, key: &EmojiKey) -> RenderResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(100));
            Err(RenderError::EmojiFetch {
                key: key.to_string(),
                reason: "slow".into(),
            })
        }
    }

    #[test]
    fn test_drop_abandons_queued_fetches() {
        let source = Arc::new(SlowSource {
            calls: AtomicUsize::new(0),
        });
        let mut cache =
            EmojiCache::new(config().with_worker_threads(1), source.clone()).unwrap();
        for cp in 0..20 {
            let key = EmojiKey::from_code_points(&[0x1F600 + cp]).unwrap();
            cache.ensure(&key, None);
        }

        let started = Instant::now();
        drop(cache);

        // Twenty queued fetches would take two seconds on one worker.
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(source.calls.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_fetch_once_and_draw_at_first_placement() {
        let source = CountingSource::new(false);
        let mut cache = EmojiCache::new(config(), source.clone()).unwrap();
        let first = Rect::new(1.0, 2.0, 16.0, 16.0);
        let second = Rect::new(40.0, 2.0, 16.0, 16.0);

        assert!(cache.ensure(&grin(), Some(first)).is_none());
        assert!(cache.state(&grin()).unwrap().is_pending());
        assert!(cache.ensure(&grin(), Some(second)).is_none());
        assert_eq!(cache.in_flight(), 1);

        let mut surface = DrawList::new();
        assert_eq!(cache.wait_completed(&mut surface, WAIT), 1);
        assert_eq!(source.calls(), 1);
        assert_eq!(cache.in_flight(), 0);

        assert_eq!(surface.len(), 1);
        match &surface.commands()[0] {
            DrawCommand::Image { rect, image } => {
                assert_eq!(*rect, first);
                assert_eq!(image.width(), 2);
            }
            other => panic!("expected image, got {other:?}"),
        }

        let bitmap = cache.ensure(&grin(), Some(second)).unwrap();
        assert_eq!(bitmap.height(), 2);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_no_placement_draws_nothing() {
        let source = CountingSource::new(false);
        let mut cache = EmojiCache::new(config(), source).unwrap();

        cache.ensure(&grin(), None);
        let mut surface = DrawList::new();
        cache.wait_completed(&mut surface, WAIT);

        assert!(surface.is_empty());
        assert!(cache.get(&grin()).is_some());
    }

    #[test]
    fn test_failure_is_terminal_until_forgotten() {
        let source = CountingSource::new(true);
        let mut cache = EmojiCache::new(config(), source.clone()).unwrap();
        let mut surface = DrawList::new();

        cache.ensure(&grin(), Some(Rect::new(0.0, 0.0, 8.0, 8.0)));
        cache.wait_completed(&mut surface, WAIT);

        assert!(surface.is_empty());
        assert!(cache.state(&grin()).unwrap().is_failed());

        assert!(cache.ensure(&grin(), None).is_none());
        assert_eq!(cache.in_flight(), 0);
        assert_eq!(source.calls(), 1);

        assert_eq!(cache.forget_failed(), 1);
        assert!(cache.is_empty());
        cache.ensure(&grin(), None);
        cache.wait_completed(&mut surface, WAIT);
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_max_pending_defers_without_recording() {
        let source = CountingSource::new(false);
        let mut cache = EmojiCache::new(config().with_max_pending(1), source).unwrap();
        let other = EmojiKey::from_code_points(&[0x1F601]).unwrap();

        cache.ensure(&grin(), None);
        assert!(cache.ensure(&other, None).is_none());
        assert!(cache.state(&other).is_none());
        assert_eq!(cache.len(), 1);

        let mut surface = DrawList::new();
        cache.wait_completed(&mut surface, WAIT);
        cache.ensure(&other, None);
        assert!(cache.state(&other).unwrap().is_pending());
    }

    #[test]
    fn test_zero_workers_still_runs_one() {
        let source = CountingSource::new(false);
        let mut cache = EmojiCache::new(config().with_worker_threads(0), source).unwrap();
        cache.ensure(&grin(), None);
        let mut surface = DrawList::new();
        assert_eq!(cache.wait_completed(&mut surface, WAIT), 1);
    }
}
