//! Host environment
//!
//! Documentation routes and background generation are only active when the
//! host runs in the development environment.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the host environment
pub const ENVIRONMENT_VAR: &str = "SCALAR_KIOTA_ENVIRONMENT";

pub const DEVELOPMENT: &str = "Development";
pub const PRODUCTION: &str = "Production";

/// Directory under the content root that static files are served from
pub const WEB_ROOT_DIR: &str = "wwwroot";

/// What the host knows about where and how it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    pub name: String,
    pub application_name: String,
    pub content_root: PathBuf,
}

impl HostEnvironment {
    pub fn new<N, A, P>(name: N, application_name: A, content_root: P) -> Self
    where
        N: Into<String>,
        A: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            application_name: application_name.into(),
            content_root: content_root.into(),
        }
    }

    pub fn development<A, P>(application_name: A, content_root: P) -> Self
    where
        A: Into<String>,
        P: Into<PathBuf>,
    {
        Self::new(DEVELOPMENT, application_name, content_root)
    }

    pub fn production<A, P>(application_name: A, content_root: P) -> Self
    where
        A: Into<String>,
        P: Into<PathBuf>,
    {
        Self::new(PRODUCTION, application_name, content_root)
    }

    /// Environment named by `SCALAR_KIOTA_ENVIRONMENT`, rooted at `content_root`
    pub fn from_env<A, P>(application_name: A, content_root: P) -> Self
    where
        A: Into<String>,
        P: Into<PathBuf>,
    {
        let name = env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| PRODUCTION.to_string());
        Self::new(name, application_name, content_root)
    }

    pub fn is_development(&self) -> bool {
        self.name.eq_ignore_ascii_case(DEVELOPMENT)
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    pub fn web_root(&self) -> PathBuf {
        self.content_root.join(WEB_ROOT_DIR)
    }
}
