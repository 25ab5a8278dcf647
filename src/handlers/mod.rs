//! Built-in handlers registered from configuration.
//!
//! - `health`: exact route answering with a JSON status document
//! - `static_files`: prefix route serving a directory from disk

pub mod health;
pub mod static_files;

pub use health::health;
pub use static_files::StaticFiles;
