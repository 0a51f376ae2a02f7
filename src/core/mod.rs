// Public modules
pub mod adb;
pub mod cancel;
pub mod context;
pub mod defaults;
pub mod error;
pub mod manifest;
pub mod pipeline;

// Re-export common types for convenience
pub use error::{Error, Result};
