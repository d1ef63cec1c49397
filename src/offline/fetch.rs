//! Network access for the asset cache

use super::cache::CacheError;

/// Source of asset bytes
pub trait Fetcher: Send {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, CacheError>;
}

/// Plain HTTP(S) GET
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, CacheError> {
        let response = minreq::get(url)
            .with_header("User-Agent", "md-editor")
            .with_timeout(self.timeout_secs)
            .send()
            .map_err(|e| CacheError::Network(format!("{}: {}", url, e)))?;

        if !(200..300).contains(&response.status_code) {
            return Err(CacheError::Network(format!(
                "{} returned status {}",
                url, response.status_code
            )));
        }
        Ok(response.into_bytes())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Fetcher serving canned responses, with a switch to simulate going offline
    #[derive(Clone, Default)]
    pub struct StubFetcher {
        responses: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        offline: Arc<AtomicBool>,
    }

    impl StubFetcher {
        pub fn with(self, url: &str, body: &[u8]) -> Self {
            self.set(url, body);
            self
        }

        pub fn set(&self, url: &str, body: &[u8]) {
            self.responses.lock().unwrap().insert(url.to_string(), body.to_vec());
        }

        pub fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, CacheError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(CacheError::Network("offline".to_string()));
            }
            self.responses
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| CacheError::Network(format!("{} returned status 404", url)))
        }
    }
}
