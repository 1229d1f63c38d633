//! Runtime loader script for the documentation page
//!
//! `config.js` lazily imports the bundled SDK and publishes a client as
//! `window.apiClient`. The file is written once and never overwritten, so
//! hand edits survive regeneration.

use crate::Result;
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;
use tokio::fs;

/// Global the constructed client is exposed as
pub const CLIENT_GLOBAL: &str = "apiClient";

const LOADER_TEMPLATE: &str = r#"export default {
    async load() {
        try {
            const module = await import('./sdk.js');
            const createClient = module.createApiClient || module.{{sdk_name}} || module.default;
            if (typeof createClient === 'function') {
                const { FetchRequestAdapter } = await import('@microsoft/kiota-http-fetchlibrary');
                window.{{client_global}} = createClient(new FetchRequestAdapter({ baseUrl: window.location.origin }));
                console.log('Scalar-Kiota: SDK loaded successfully');
                return {};
            }
            console.warn('Scalar-Kiota: No client factory found in SDK');
            return {};
        } catch (error) {
            console.error('Scalar-Kiota: SDK load failed:', error);
            return {};
        }
    }
};
"#;

/// Render the loader script for `sdk_name`
pub fn render_loader_config(sdk_name: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let rendered = handlebars.render_template(
        LOADER_TEMPLATE,
        &json!({ "sdk_name": sdk_name, "client_global": CLIENT_GLOBAL }),
    )?;
    Ok(rendered)
}

/// Write the loader script to `path` unless a file is already there
///
/// Returns `true` when the file was written.
pub async fn ensure_loader_config(path: &Path, sdk_name: &str) -> Result<bool> {
    if fs::try_exists(path).await? {
        tracing::debug!(path = %path.display(), "Loader config exists, leaving it untouched");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, render_loader_config(sdk_name)?).await?;
    tracing::debug!(path = %path.display(), "Loader config written");
    Ok(true)
}
