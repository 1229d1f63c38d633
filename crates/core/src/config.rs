//! Configuration types for SDK generation
//!
//! [`GenerationOptions`] is an immutable snapshot taken at startup and handed
//! to the generator and the documentation routes. It can be built in code
//! with the `with_*` setters, read from a YAML/JSON file, or layered from a
//! file plus `SCALAR_KIOTA_*` environment variables.

use crate::{layout::DEFAULT_OUTPUT_DIR, Result, ScalarKiotaError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable prefix for layered configuration
pub const ENV_PREFIX: &str = "SCALAR_KIOTA";

/// Default documentation route segment
pub const DEFAULT_DOCS_ROUTE: &str = "api";

/// Colour scheme of the documentation UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Default,
    Alternate,
    Moon,
    Purple,
    Solarized,
    BluePlanet,
    #[default]
    Saturn,
    Kepler,
    Mars,
    DeepSpace,
    Laserwave,
    None,
}

impl Theme {
    /// Every theme, in declaration order
    pub const ALL: [Theme; 12] = [
        Theme::Default,
        Theme::Alternate,
        Theme::Moon,
        Theme::Purple,
        Theme::Solarized,
        Theme::BluePlanet,
        Theme::Saturn,
        Theme::Kepler,
        Theme::Mars,
        Theme::DeepSpace,
        Theme::Laserwave,
        Theme::None,
    ];

    /// Identifier understood by the documentation UI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Alternate => "alternate",
            Self::Moon => "moon",
            Self::Purple => "purple",
            Self::Solarized => "solarized",
            Self::BluePlanet => "bluePlanet",
            Self::Saturn => "saturn",
            Self::Kepler => "kepler",
            Self::Mars => "mars",
            Self::DeepSpace => "deepSpace",
            Self::Laserwave => "laserwave",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ScalarKiotaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.replace(['-', '_'], "");
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ScalarKiotaError::validation(format!("Unknown theme: {}", s)))
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Options controlling SDK generation and the documentation UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Documentation UI title; defaults to "{application name} API"
    pub title: Option<String>,
    /// Documentation UI colour scheme
    pub theme: Theme,
    /// Class, namespace and package name of the generated clients
    pub sdk_name: String,
    /// Target languages, in generation order
    pub languages: Vec<String>,
    /// Output directory; defaults to `{web root}/.scalar-kiota`
    pub output_root: Option<PathBuf>,
    /// Whether the TypeScript output is bundled into `sdk.js`
    pub bundle_generated_script: bool,
    /// Whether to open the documentation page once generation finishes
    pub open_docs_on_start: bool,
    /// Route segment of the documentation page; defaults to "api"
    pub docs_route_path: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            title: None,
            theme: Theme::default(),
            sdk_name: "ApiClient".to_string(),
            languages: vec!["TypeScript".to_string()],
            output_root: None,
            bundle_generated_script: true,
            open_docs_on_start: false,
            docs_route_path: None,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title<S: Into<String>>(mut self, title: Option<S>) -> Self {
        self.title = title.map(Into::into);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_sdk_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sdk_name = name.into();
        self
    }

    /// Set the target languages; an empty list keeps the current value
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();
        if !languages.is_empty() {
            self.languages = languages;
        }
        self
    }

    pub fn with_output_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_root = Some(path.into());
        self
    }

    pub fn with_bundle_generated_script(mut self, bundle: bool) -> Self {
        self.bundle_generated_script = bundle;
        self
    }

    pub fn with_open_docs_on_start(mut self, open: bool) -> Self {
        self.open_docs_on_start = open;
        self
    }

    pub fn with_docs_route_path<S: Into<String>>(mut self, path: S) -> Self {
        self.docs_route_path = Some(path.into());
        self
    }

    /// Title shown by the documentation UI
    pub fn resolved_title(&self, application_name: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} API", application_name))
    }

    /// Output root, falling back to the hidden directory under `web_root`
    pub fn resolve_output_root(&self, web_root: &Path) -> PathBuf {
        self.output_root
            .clone()
            .unwrap_or_else(|| web_root.join(DEFAULT_OUTPUT_DIR))
    }

    /// Documentation route segment without surrounding slashes
    pub fn docs_route(&self) -> &str {
        self.docs_route_path
            .as_deref()
            .map(|path| path.trim_matches('/'))
            .unwrap_or(DEFAULT_DOCS_ROUTE)
    }

    /// Load options from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(options) => Ok(options),
            Err(_) => {
                let options = serde_json::from_str(&content)?;
                Ok(options)
            }
        }
    }

    /// Save options to a file as YAML
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load options from an optional file overlaid with `SCALAR_KIOTA_*` variables
    ///
    /// `SCALAR_KIOTA_LANGUAGES` is a comma-separated list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("languages"),
        );

        let options = builder.build()?.try_deserialize()?;
        Ok(options)
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        if self.sdk_name.trim().is_empty() {
            return Err(ScalarKiotaError::validation("SDK name cannot be empty"));
        }

        if self.languages.is_empty() {
            return Err(ScalarKiotaError::validation(
                "At least one target language is required",
            ));
        }

        if let Some(language) = self.languages.iter().find(|l| l.trim().is_empty()) {
            return Err(ScalarKiotaError::validation(format!(
                "Invalid target language: '{}'",
                language
            )));
        }

        Ok(())
    }
}
