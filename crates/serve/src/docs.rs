//! Documentation UI routes
//!
//! In development the host gets three things: an interactive API reference
//! page at the docs pattern, the SDK output directory served as static files
//! under `/.scalar-kiota`, and a redirect from `/` to the docs page. Outside
//! development the router is returned untouched.

use crate::environment::HostEnvironment;
use crate::middleware::{redirect_root, RootRedirect};
use axum::{extract::State, middleware, response::Html, routing::get, Router};
use handlebars::Handlebars;
use scalar_kiota_core::layout::{CONFIG_FILE, DEFAULT_OUTPUT_DIR};
use scalar_kiota_core::spec_source::SPEC_DOCUMENT_PATH;
use scalar_kiota_core::{GenerationOptions, Result, Theme};
use serde_json::json;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Default mount point of the documentation page
pub const DEFAULT_DOCS_PATTERN: &str = "/api";

const DOCS_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html>
  <head>
    <title>{{title}}</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
  </head>
  <body>
    <div id="app"></div>
    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
    <script type="module">
      const configuration = {{{configuration}}};
      try {
        const custom = await import(configuration.javaScriptConfiguration);
        if (custom.default && typeof custom.default.load === 'function') {
          Object.assign(configuration, await custom.default.load());
        }
      } catch (error) {
        console.warn('Scalar-Kiota: loader config unavailable:', error);
      }
      Scalar.createApiReference('#app', configuration);
    </script>
  </body>
</html>
"#;

/// URL prefix the SDK output directory is served under
pub fn static_prefix() -> String {
    format!("/{}", DEFAULT_OUTPUT_DIR)
}

/// URL of the runtime loader script
pub fn loader_config_url() -> String {
    format!("{}/{}", static_prefix(), CONFIG_FILE)
}

/// Render the documentation page
pub fn render_docs_page(title: &str, theme: Theme) -> Result<String> {
    let configuration = json!({
        "title": title,
        "theme": theme.as_str(),
        "url": SPEC_DOCUMENT_PATH,
        "javaScriptConfiguration": loader_config_url(),
    });
    // Keep a title containing "</script>" from closing the inline script
    let configuration = configuration.to_string().replace("</", "<\\/");

    let handlebars = Handlebars::new();
    let page = handlebars.render_template(
        DOCS_PAGE_TEMPLATE,
        &json!({ "title": title, "configuration": configuration }),
    )?;
    Ok(page)
}

/// Docs pattern with exactly one leading slash and no trailing slash
pub fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_DOCS_PATTERN.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Clone)]
struct DocsPage {
    html: Arc<str>,
}

async fn docs_page(State(page): State<DocsPage>) -> Html<String> {
    Html(page.html.to_string())
}

/// Mount the documentation UI and SDK files on `router` in development
pub fn map_scalar_with_kiota(
    router: Router,
    environment: &HostEnvironment,
    options: &GenerationOptions,
    pattern: &str,
) -> Result<Router> {
    if !environment.is_development() {
        tracing::debug!(environment = %environment.name, "Documentation routes disabled");
        return Ok(router);
    }

    let pattern = normalize_pattern(pattern);
    let title = options.resolved_title(&environment.application_name);
    let page = DocsPage {
        html: Arc::from(render_docs_page(&title, options.theme)?),
    };
    let output_root = options.resolve_output_root(&environment.web_root());

    tracing::info!(
        pattern = %pattern,
        output_root = %output_root.display(),
        "Mapping API documentation"
    );

    let docs = Router::new()
        .route(&pattern, get(docs_page))
        .with_state(page);

    Ok(router
        .merge(docs)
        .nest_service(&static_prefix(), ServeDir::new(output_root))
        .layer(middleware::from_fn_with_state(
            RootRedirect::new(&pattern),
            redirect_root,
        )))
}
