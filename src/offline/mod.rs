//! Offline support: a versioned asset cache served by a background worker

pub mod cache;
pub mod fetch;
pub mod loader;
pub mod worker;

pub use cache::{AssetCache, CacheError, CacheState, Fetched};
pub use fetch::{Fetcher, HttpFetcher};
pub use loader::AssetLoader;
pub use worker::{CacheWorker, WorkerEvent, WorkerMessage};
