//! Scalar Kiota - development-time SDK generation for OpenAPI hosts
//!
//! Fetches a running host's OpenAPI document, regenerates client SDKs with
//! Kiota when the document changed, bundles the TypeScript client for the
//! browser and serves an interactive API reference that loads it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scalar_kiota_core::{version_info, GenerationOptions, GenerationOutcome};
use scalar_kiota_infra::{init_logger, logger_config_from_env};
use scalar_kiota_serve::{DevServer, DevServerConfig, HostEnvironment, SdkGenerationService};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "scalar-kiota")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scalar Kiota - OpenAPI SDK generation and API reference for development hosts")]
#[command(long_about = r#"
Scalar Kiota watches the OpenAPI document of a running web host. When the
document changes it regenerates client SDKs with the Kiota code generator,
bundles the TypeScript client into a single browser module and serves an
API reference page that loads it.

Generation is skipped while the document and all generated artifacts are
unchanged, so repeated starts are cheap.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Options file (YAML or JSON), overlaid with SCALAR_KIOTA_* variables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a development host with the API reference and background SDK generation
    Serve {
        /// Server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// OpenAPI document served at /openapi/v1.json
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Route of the API reference page (defaults to the configured docs route)
        #[arg(long)]
        docs_pattern: Option<String>,

        /// Host content root; SDKs go to {content root}/wwwroot/.scalar-kiota
        #[arg(long, default_value = ".")]
        content_root: PathBuf,

        /// Host environment name (only "Development" enables the integration)
        #[arg(long, env = "SCALAR_KIOTA_ENVIRONMENT", default_value = "Development")]
        environment: String,
    },

    /// Run SDK generation once against a running host
    Generate {
        /// Base URL of the host serving /openapi/v1.json
        #[arg(short, long, default_value = scalar_kiota_core::spec_source::DEFAULT_SERVER_URL)]
        server_url: String,

        /// Output directory for the generated SDKs
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target languages, overriding the configured list
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,
    },

    /// Write a default options file
    Init {
        /// Options file path
        #[arg(default_value = "scalar-kiota.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate the options
    Validate,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger_config = logger_config_from_env();
    if cli.verbose {
        logger_config.level = "debug".to_string();
    }
    if cli.json_logs {
        logger_config.json_format = true;
    }
    init_logger(logger_config)?;

    match cli.command {
        Commands::Serve {
            ref host,
            port,
            ref spec,
            ref docs_pattern,
            ref content_root,
            ref environment,
        } => {
            let config = DevServerConfig {
                host: host.clone(),
                port,
                spec_path: spec.clone(),
                docs_pattern: docs_pattern.clone(),
            };
            handle_serve(config, content_root, environment, cli.config.as_deref()).await?;
        }

        Commands::Generate {
            ref server_url,
            ref output,
            ref languages,
        } => {
            handle_generate(server_url, output.clone(), languages, cli.config.as_deref()).await?;
        }

        Commands::Init { ref path, force } => {
            handle_init(path, force)?;
        }

        Commands::Validate => {
            handle_validate(cli.config.as_deref())?;
        }

        Commands::Version => {
            println!("{}", version_info());
        }
    }

    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<GenerationOptions> {
    let options = GenerationOptions::load(path).context("Failed to load options")?;
    options.validate()?;
    Ok(options)
}

async fn handle_serve(
    config: DevServerConfig,
    content_root: &Path,
    environment: &str,
    options_path: Option<&Path>,
) -> Result<()> {
    let options = load_options(options_path)?;
    let content_root = std::fs::canonicalize(content_root)
        .with_context(|| format!("Content root {} not found", content_root.display()))?;
    let application_name = content_root
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("scalar-kiota")
        .to_string();
    let environment = HostEnvironment::new(environment, application_name, content_root);

    info!(
        environment = %environment.name,
        languages = ?options.languages,
        "Starting development host"
    );
    DevServer::new(config, environment, options).start().await?;
    Ok(())
}

async fn handle_generate(
    server_url: &str,
    output: Option<PathBuf>,
    languages: &[String],
    options_path: Option<&Path>,
) -> Result<()> {
    let mut options = load_options(options_path)?.with_languages(languages.iter().cloned());
    if let Some(output) = output {
        options = options.with_output_root(output);
    }

    let current_dir = std::env::current_dir()?;
    let environment = HostEnvironment::development("scalar-kiota", &current_dir);
    let output_root = options.resolve_output_root(&environment.web_root());
    info!(server_url, output = %output_root.display(), "Running SDK generation");

    let service = SdkGenerationService::with_defaults(environment, options)?;
    match service.generator().run(server_url).await? {
        GenerationOutcome::UpToDate => println!("SDKs are up-to-date in {}", output_root.display()),
        GenerationOutcome::Regenerated { languages } => println!(
            "Generated {} SDK(s) in {}: {}",
            languages.len(),
            output_root.display(),
            languages.join(", ")
        ),
    }
    Ok(())
}

fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    GenerationOptions::default()
        .to_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default options to {}", path.display());
    Ok(())
}

fn handle_validate(options_path: Option<&Path>) -> Result<()> {
    let options = load_options(options_path)?;
    println!("Options are valid");
    println!("  SDK name:  {}", options.sdk_name);
    println!("  Languages: {}", options.languages.join(", "));
    println!("  Theme:     {}", options.theme);
    println!("  Bundling:  {}", options.bundle_generated_script);
    Ok(())
}
