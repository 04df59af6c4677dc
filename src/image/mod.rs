//! Image loading with a URL-keyed cache.
//!
//! Pixel data is opaque here; rows only hold URLs. A cache hit resolves
//! immediately, a miss runs on a [`Worker`] and resolves through a channel.
//! The cache and the failure list are bounded LRUs.

use crate::worker::Worker;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Encoded image bytes. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    data: Arc<[u8]>,
}

impl Image {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where image bytes come from.
pub trait ImageSource: Send + Sync {
    /// `None` for anything unreachable or empty.
    fn fetch(&self, url: &str) -> Option<Image>;
}

/// Reads `file://` URLs and plain paths from disk.
///
/// Other schemes are unreachable and resolve to `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl FileImageSource {
    fn local_path(url: &str) -> Option<&Path> {
        if let Some(path) = url.strip_prefix("file://") {
            return Some(Path::new(path));
        }
        if url.contains("://") {
            return None;
        }
        Some(Path::new(url))
    }
}

impl ImageSource for FileImageSource {
    fn fetch(&self, url: &str) -> Option<Image> {
        let path = Self::local_path(url)?;
        match std::fs::read(path) {
            Ok(data) if !data.is_empty() => Some(Image::new(data)),
            Ok(_) => None,
            Err(error) => {
                debug!(url, error = %error, "Image read failed");
                None
            }
        }
    }
}

/// Outcome of [`ImageLoader::load`].
#[derive(Debug)]
pub enum ImageRequest {
    /// Resolved on the caller's stack, from the cache.
    Ready(Option<Image>),
    /// Resolves when the worker finishes.
    Pending(Receiver<Option<Image>>),
}

impl ImageRequest {
    /// The result if it has arrived.
    ///
    /// `Some(None)` means the load finished without an image.
    pub fn try_take(&mut self) -> Option<Option<Image>> {
        match self {
            ImageRequest::Ready(image) => {
                let image = image.take();
                Some(image)
            }
            ImageRequest::Pending(rx) => match rx.try_recv() {
                Ok(image) => {
                    *self = ImageRequest::Ready(None);
                    Some(image)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(None),
            },
        }
    }

    /// Block up to `timeout` for the result.
    pub fn wait(self, timeout: Duration) -> Option<Image> {
        match self {
            ImageRequest::Ready(image) => image,
            ImageRequest::Pending(rx) => match rx.recv_timeout(timeout) {
                Ok(image) => image,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ImageRequest::Ready(_))
    }
}

/// Images kept when no capacity is configured.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

type Cache = Arc<Mutex<LruCache<String, Image>>>;

/// Loads images off the rendering context and caches them by URL.
#[derive(Clone)]
pub struct ImageLoader {
    source: Arc<dyn ImageSource>,
    worker: Arc<dyn Worker>,
    cache: Cache,
    in_flight: Arc<Mutex<HashSet<String>>>,
    failed: Arc<Mutex<LruCache<String, ()>>>,
    capacity: NonZeroUsize,
}

impl ImageLoader {
    pub fn new(source: Arc<dyn ImageSource>, worker: Arc<dyn Worker>) -> Self {
        Self::with_capacity(source, worker, DEFAULT_IMAGE_CACHE_CAPACITY)
    }

    /// Keep at most `capacity` images, and remember at most `capacity`
    /// failed URLs. The least recently used entry is evicted first.
    pub fn with_capacity(
        source: Arc<dyn ImageSource>,
        worker: Arc<dyn Worker>,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            worker,
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            failed: Arc::new(Mutex::new(LruCache::new(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Cached image for `url`, without loading. Marks it recently used.
    pub fn cached(&self, url: &str) -> Option<Image> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Load `url`. Cache hits resolve immediately.
    pub fn load(&self, url: &str) -> ImageRequest {
        if let Some(image) = self.cached(url) {
            return ImageRequest::Ready(Some(image));
        }

        let (tx, rx) = mpsc::channel();
        self.spawn_fetch(url, move |image| {
            // The requester may have stopped listening.
            let _ = tx.send(image);
        });
        ImageRequest::Pending(rx)
    }

    /// Start loading `url` into the cache unless it is cached, already
    /// loading, or failed before. Returns whether a load was started.
    pub fn prefetch(&self, url: &str) -> bool {
        if self.cached(url).is_some() || self.has_failed(url) {
            return false;
        }
        let inserted = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string());
        if !inserted {
            return false;
        }
        self.spawn_fetch(url, |_| {});
        true
    }

    fn spawn_fetch(&self, url: &str, deliver: impl FnOnce(Option<Image>) + Send + 'static) {
        let url = url.to_string();
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        let failed = Arc::clone(&self.failed);
        self.worker.spawn(Box::new(move || {
            let image = source.fetch(&url);
            match &image {
                Some(image) => {
                    let evicted = cache
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(url.clone(), image.clone());
                    if let Some((old, _)) = evicted.filter(|(old, _)| *old != url) {
                        debug!(url = %old, "Evicted image from cache");
                    }
                }
                None => {
                    failed
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .put(url.clone(), ());
                }
            }
            in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&url);
            deliver(image);
        }));
    }

    /// Whether the last load of `url` produced no image.
    pub fn has_failed(&self, url: &str) -> bool {
        self.failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    /// Prefetches that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop cached images and remembered failures.
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("cached", &self.cache_len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
