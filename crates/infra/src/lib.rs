//! Scalar Kiota Infrastructure Library
//!
//! Infrastructure components for Scalar Kiota: the operating-system process
//! runner behind the core generation pipeline and the global logger.

pub mod logger;
pub mod process;

pub use logger::*;
pub use process::SystemProcessRunner;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
