//! Scalar Kiota Serve Library
//!
//! Host integration for Scalar Kiota: documentation routes, the background
//! SDK generation service and a development server wiring both together.

pub mod docs;
pub mod environment;
pub mod middleware;
pub mod server;
pub mod service;

pub use docs::map_scalar_with_kiota;
pub use environment::HostEnvironment;
pub use server::{DevServer, DevServerConfig};
pub use service::{SdkGenerationService, ServerStarted};

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
