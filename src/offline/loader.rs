//! Image bytes for remote URIs, served from the asset cache worker
//!
//! Registered after the default loaders so it is asked first for http(s)
//! URIs. Unknown URIs are queued for the worker and reported as pending;
//! the app drains the queue and feeds results back in.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eframe::egui;
use egui::load::{Bytes, BytesLoadResult, BytesLoader, BytesPoll, LoadError};

#[derive(Debug, Clone)]
enum Entry {
    Requested,
    Ready(Arc<[u8]>),
    Failed(String),
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    queue: Vec<String>,
}

#[derive(Debug, Default)]
pub struct AssetLoader {
    state: Mutex<State>,
}

impl AssetLoader {
    pub const ID: &'static str = "md_editor::AssetLoader";

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// URIs requested since the last call
    pub fn take_requests(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().queue)
    }

    pub fn insert(&self, uri: &str, bytes: Vec<u8>) {
        self.lock()
            .entries
            .insert(uri.to_string(), Entry::Ready(bytes.into()));
    }

    pub fn fail(&self, uri: &str, message: impl Into<String>) {
        self.lock()
            .entries
            .insert(uri.to_string(), Entry::Failed(message.into()));
    }
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

impl BytesLoader for AssetLoader {
    fn id(&self) -> &str {
        Self::ID
    }

    fn load(&self, _ctx: &egui::Context, uri: &str) -> BytesLoadResult {
        if !is_remote(uri) {
            return Err(LoadError::NotSupported);
        }

        let mut state = self.lock();
        match state.entries.get(uri) {
            Some(Entry::Ready(bytes)) => Ok(BytesPoll::Ready {
                size: None,
                bytes: Bytes::Shared(bytes.clone()),
                mime: None,
            }),
            Some(Entry::Failed(message)) => Err(LoadError::Loading(message.clone())),
            Some(Entry::Requested) => Ok(BytesPoll::Pending { size: None }),
            None => {
                state.entries.insert(uri.to_string(), Entry::Requested);
                state.queue.push(uri.to_string());
                Ok(BytesPoll::Pending { size: None })
            }
        }
    }

    fn forget(&self, uri: &str) {
        self.lock().entries.remove(uri);
    }

    fn forget_all(&self) {
        self.lock().entries.clear();
    }

    fn byte_size(&self) -> usize {
        self.lock()
            .entries
            .values()
            .map(|entry| match entry {
                Entry::Ready(bytes) => bytes.len(),
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO: &str = "https://example.org/logo.png";

    fn context_with_loader() -> (egui::Context, Arc<AssetLoader>) {
        let ctx = egui::Context::default();
        egui_extras::install_image_loaders(&ctx);
        let loader = Arc::new(AssetLoader::default());
        ctx.add_bytes_loader(loader.clone());
        (ctx, loader)
    }

    #[test]
    fn test_remote_uri_is_queued_once() {
        let (ctx, loader) = context_with_loader();

        assert!(matches!(
            ctx.try_load_bytes(LOGO),
            Ok(BytesPoll::Pending { .. })
        ));
        assert!(matches!(
            ctx.try_load_bytes(LOGO),
            Ok(BytesPoll::Pending { .. })
        ));
        assert_eq!(loader.take_requests(), vec![LOGO.to_string()]);
        assert!(loader.take_requests().is_empty());
    }

    #[test]
    fn test_cached_bytes_win_for_remote_uri() {
        let (ctx, loader) = context_with_loader();
        loader.insert(LOGO, b"cached-bytes".to_vec());

        let Ok(BytesPoll::Ready { bytes, .. }) = ctx.try_load_bytes(LOGO) else {
            panic!("expected cached bytes");
        };
        assert_eq!(&*bytes, b"cached-bytes".as_slice());
    }

    #[test]
    fn test_failed_fetch_reports_error() {
        let (ctx, loader) = context_with_loader();
        loader.fail(LOGO, "offline");

        assert!(matches!(
            ctx.try_load_bytes(LOGO),
            Err(LoadError::Loading(message)) if message == "offline"
        ));
    }

    #[test]
    fn test_local_uri_left_to_other_loaders() {
        let loader = AssetLoader::default();
        let ctx = egui::Context::default();
        assert!(matches!(
            loader.load(&ctx, "bytes://logo.png"),
            Err(LoadError::NotSupported)
        ));
        assert!(loader.take_requests().is_empty());
    }
}
