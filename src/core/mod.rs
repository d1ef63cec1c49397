//! Core functionality: document model, styles, snippets, storage and configuration

pub mod config;
pub mod debounce;
pub mod document;
pub mod export;
pub mod i18n;
pub mod import;
pub mod render;
pub mod search;
pub mod settings;
pub mod snippets;
pub mod storage;
pub mod styles;
