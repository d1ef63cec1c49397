//! Background thread owning the asset cache

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use super::cache::{AssetCache, CacheState};
use super::fetch::HttpFetcher;
use crate::core::config::{cache_name, project_dirs, OfflineConfig};

/// Requests from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Pre-cache these asset URLs and activate if possible
    Install(Vec<String>),
    Fetch(String),
    /// Activate a waiting generation now
    SkipWaiting,
    Shutdown,
}

impl WorkerMessage {
    /// Whether the worker always answers this message with one event
    pub fn expects_reply(&self) -> bool {
        matches!(self, WorkerMessage::Fetch(_))
    }
}

/// Notifications back to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// A new generation is installed but another one is still active
    Waiting,
    Activated(String),
    Fetched {
        url: String,
        bytes: Vec<u8>,
        from_cache: bool,
    },
    FetchFailed {
        url: String,
    },
}

pub struct CacheWorker {
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerEvent>,
}

impl CacheWorker {
    /// Start the worker with the platform cache directory, if offline support is on
    pub fn start(config: &OfflineConfig) -> Option<Self> {
        if !config.enabled {
            tracing::info!("Offline cache disabled");
            return None;
        }
        let Some(dirs) = project_dirs() else {
            tracing::warn!("No cache directory available, running without offline cache");
            return None;
        };

        let fetcher = HttpFetcher::new(config.fetch_timeout_secs);
        let cache = AssetCache::new(dirs.cache_dir(), &cache_name(), Box::new(fetcher));
        match Self::spawn(cache) {
            Ok(worker) => Some(worker),
            Err(e) => {
                tracing::warn!("Failed to start cache worker: {}", e);
                None
            }
        }
    }

    pub fn spawn(cache: AssetCache) -> std::io::Result<Self> {
        let (tx, worker_rx) = mpsc::channel();
        let (worker_tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("asset-cache".to_string())
            .spawn(move || Self::run(cache, worker_rx, worker_tx))?;

        Ok(Self { tx, rx })
    }

    fn run(mut cache: AssetCache, rx: Receiver<WorkerMessage>, tx: Sender<WorkerEvent>) {
        for message in rx {
            let event = match message {
                WorkerMessage::Install(assets) => match cache.install(&assets) {
                    Ok(CacheState::Waiting) => Some(WorkerEvent::Waiting),
                    Ok(_) => Some(WorkerEvent::Activated(cache.name().to_string())),
                    Err(e) => {
                        tracing::error!("Cache install failed: {}", e);
                        None
                    }
                },
                WorkerMessage::Fetch(url) => match cache.fetch(&url) {
                    Ok(fetched) => Some(WorkerEvent::Fetched {
                        url,
                        bytes: fetched.bytes,
                        from_cache: fetched.from_cache,
                    }),
                    Err(e) => {
                        tracing::warn!("{}", e);
                        Some(WorkerEvent::FetchFailed { url })
                    }
                },
                WorkerMessage::SkipWaiting if cache.state() == CacheState::Waiting => {
                    match cache.activate() {
                        Ok(_) => Some(WorkerEvent::Activated(cache.name().to_string())),
                        Err(e) => {
                            tracing::error!("Cache activation failed: {}", e);
                            None
                        }
                    }
                }
                WorkerMessage::SkipWaiting => None,
                WorkerMessage::Shutdown => break,
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break; // UI dropped
                }
            }
        }
        tracing::debug!("Cache worker stopped");
    }

    /// Queue a request; false if the worker is gone
    pub fn send(&self, message: WorkerMessage) -> bool {
        if self.tx.send(message).is_err() {
            tracing::warn!("Cache worker is not running");
            return false;
        }
        true
    }

    /// Drain pending events without blocking
    pub fn poll(&self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

impl Drop for CacheWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(WorkerMessage::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::fetch::testing::StubFetcher;
    use std::path::Path;
    use std::time::{Duration, Instant};

    const LOGO: &str = "https://example.org/logo.png";

    fn worker(root: &Path, name: &str, fetcher: &StubFetcher) -> CacheWorker {
        CacheWorker::spawn(AssetCache::new(root, name, Box::new(fetcher.clone()))).unwrap()
    }

    fn next_event(worker: &CacheWorker) -> WorkerEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = worker.poll().into_iter().next() {
                return event;
            }
            assert!(Instant::now() < deadline, "no event from cache worker");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_install_and_fetch() {
        let root = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::default().with(LOGO, b"png");
        let worker = worker(root.path(), "md-editor-v1", &fetcher);

        worker.send(WorkerMessage::Install(vec![LOGO.to_string()]));
        assert_eq!(next_event(&worker), WorkerEvent::Activated("md-editor-v1".to_string()));

        fetcher.set_offline(true);
        worker.send(WorkerMessage::Fetch(LOGO.to_string()));
        assert_eq!(
            next_event(&worker),
            WorkerEvent::Fetched {
                url: LOGO.to_string(),
                bytes: b"png".to_vec(),
                from_cache: true,
            }
        );

        worker.send(WorkerMessage::Fetch("https://example.org/x.png".to_string()));
        assert_eq!(
            next_event(&worker),
            WorkerEvent::FetchFailed {
                url: "https://example.org/x.png".to_string()
            }
        );
    }

    #[test]
    fn test_skip_waiting() {
        let root = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::default();
        let old = worker(root.path(), "md-editor-v1", &fetcher);
        old.send(WorkerMessage::Install(Vec::new()));
        assert_eq!(next_event(&old), WorkerEvent::Activated("md-editor-v1".to_string()));

        let new = worker(root.path(), "md-editor-v2", &fetcher);
        new.send(WorkerMessage::Install(Vec::new()));
        assert_eq!(next_event(&new), WorkerEvent::Waiting);

        new.send(WorkerMessage::SkipWaiting);
        assert_eq!(next_event(&new), WorkerEvent::Activated("md-editor-v2".to_string()));
        assert!(!root.path().join("md-editor-v1").exists());
    }

    #[test]
    fn test_only_fetch_is_always_answered() {
        let root = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::default();
        fetcher.set_offline(true);
        let worker = worker(root.path(), "md-editor-v1", &fetcher);
        worker.send(WorkerMessage::Install(Vec::new()));
        assert_eq!(next_event(&worker), WorkerEvent::Activated("md-editor-v1".to_string()));

        // Nothing is waiting, so this one goes unanswered
        let skip = WorkerMessage::SkipWaiting;
        assert!(!skip.expects_reply());
        worker.send(skip);

        let fetch = WorkerMessage::Fetch(LOGO.to_string());
        assert!(fetch.expects_reply());
        worker.send(fetch);
        assert_eq!(
            next_event(&worker),
            WorkerEvent::FetchFailed {
                url: LOGO.to_string()
            }
        );
        assert!(!WorkerMessage::Install(Vec::new()).expects_reply());
    }

    #[test]
    fn test_send_after_shutdown() {
        let root = tempfile::tempdir().unwrap();
        let worker = worker(root.path(), "md-editor-v1", &StubFetcher::default());
        worker.send(WorkerMessage::Shutdown);

        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.send(WorkerMessage::SkipWaiting) {
            assert!(Instant::now() < deadline, "worker did not stop");
            thread::sleep(Duration::from_millis(10));
        }
    }
}
