//! CLI entry point for the UI5 API reference lookup.
//!
//! Provides commands for indexing corpora and resolving queries or
//! structured type information against them.

use anyhow::Context;
use apiref::display::{ApiReference, LookupReport, THEME};
use apiref::io::{ExitCode, OutputFormat, OutputManager};
use apiref::{
    ApiRefError, ApiRefResult, Framework, FrameworkVersion, IndexStore, LocalCorpus,
    ProviderRegistry, Settings, TypeInfoNode, get_api_reference, get_api_reference_for_type_info,
    get_api_reference_summary, get_api_reference_summary_for_type_info,
};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// UI5 API reference lookup
#[derive(Parser)]
#[command(
    name = "apiref",
    version = env!("CARGO_PKG_VERSION"),
    about = "Look up UI5 API reference documentation",
    long_about = "Resolve symbols, members and type information against indexed OpenUI5/SAPUI5 api.json corpora.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show detailed loading information
    #[arg(long, global = true)]
    info: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    #[command(about = "Set up .apiref directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Build the symbol index of a corpus directory
    #[command(about = "Build index.json from a directory of *.api.json files")]
    Index {
        /// Directory holding the *.api.json documents
        corpus_dir: PathBuf,

        /// Rebuild even if an index already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Look up a symbol, member or module
    #[command(
        about = "Resolve a query such as sap.m.Button or sap/m/Button#text",
        after_help = "Examples:\n  apiref lookup sap.m.Button\n  apiref lookup sap/m/Button#press --summary\n  apiref lookup sap.m.ButtonType --framework SAPUI5 --framework-version 1.120.30\n\nJSON paths:\n  lookup    .data.results[].reference.name"
    )]
    Lookup {
        /// Symbol, field or module path
        query: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Shorten top-level symbols to a summary
        #[arg(short, long)]
        summary: bool,
    },

    /// Resolve a type-information tree
    #[command(
        about = "Resolve a type-information JSON document to its API record",
        after_help = "The file holds one node such as\n  {\"kind\": \"method\", \"name\": \"getText\",\n   \"parent\": {\"kind\": \"class\", \"name\": \"Button\", \"parent\": {\"kind\": \"module\", \"name\": \"sap/m/Button\"}}}\nUse '-' to read from stdin."
    )]
    TypeInfo {
        /// JSON file with the type-information node
        file: PathBuf,

        #[command(flatten)]
        target: TargetArgs,

        /// Shorten top-level symbols to a summary
        #[arg(short, long)]
        summary: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .apiref/settings.toml")]
    Config,
}

/// Framework and version a lookup runs against
#[derive(clap::Args)]
struct TargetArgs {
    /// "OpenUI5" or "SAPUI5" (defaults to corpus.default_framework)
    #[arg(long, env = "APIREF_FRAMEWORK")]
    framework: Option<String>,

    /// Framework version, e.g. 1.120.30
    #[arg(long, env = "APIREF_FRAMEWORK_VERSION")]
    framework_version: Option<String>,

    /// Do not attach documentation links
    #[arg(long)]
    no_uri: bool,
}

impl TargetArgs {
    fn resolve(&self, settings: &Settings) -> ApiRefResult<(Framework, FrameworkVersion)> {
        let framework = match &self.framework {
            Some(name) => name.parse()?,
            None => settings.corpus.default_framework,
        };
        let version = match &self.framework_version {
            Some(version) => FrameworkVersion::parse(version)?,
            None => FrameworkVersion::parse(settings.corpus.version_for(framework))?,
        };
        Ok((framework, version))
    }
}

fn log_level(debug: bool, info: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else if info {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

fn init_tracing(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_type_info(path: &Path) -> anyhow::Result<TypeInfoNode> {
    let content = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())
            .context("Failed to read type information from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read type information from {}", path.display()))?
    };
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid type information in {}", path.display()))
}

async fn run_lookup(
    registry: &ProviderRegistry<LocalCorpus>,
    query: &str,
    framework: Framework,
    version: &FrameworkVersion,
    summary: bool,
) -> ApiRefResult<Vec<ApiReference>> {
    if summary {
        get_api_reference_summary(registry, query, framework, version).await
    } else {
        let symbols = get_api_reference(registry, query, framework, version).await?;
        Ok(symbols.into_iter().map(ApiReference::from).collect())
    }
}

async fn run_type_info(
    registry: &ProviderRegistry<LocalCorpus>,
    node: &TypeInfoNode,
    framework: Framework,
    version: &FrameworkVersion,
    summary: bool,
) -> ApiRefResult<ApiReference> {
    if summary {
        get_api_reference_summary_for_type_info(registry, node, framework, version).await
    } else {
        get_api_reference_for_type_info(registry, node, framework, version)
            .await
            .map(ApiReference::from)
    }
}

fn run_index(corpus_dir: &Path, force: bool, output: &mut OutputManager) -> ApiRefResult<usize> {
    if IndexStore::exists(corpus_dir) && !force {
        return Err(ApiRefError::invalid_input(format!(
            "Index already exists at {}. Use --force to rebuild",
            IndexStore::index_path(corpus_dir).display()
        )));
    }
    status(output, &format!("Indexing {}...", corpus_dir.display()));
    let store = IndexStore::build_from_dir(corpus_dir)?;
    store.save(corpus_dir)?;
    Ok(store.len())
}

/// Entry point with tokio async runtime.
///
/// Loads configuration, then dispatches the command. Every failure is
/// reported through the output manager and mapped to an exit code.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let (config, load_error) = if let Some(config_path) = &cli.config {
        match Settings::load_from(config_path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!(
                    "{}",
                    THEME.error_with_icon(&format!(
                        "Configuration error loading from {}: {e}",
                        config_path.display()
                    ))
                );
                std::process::exit(ExitCode::ConfigError.into());
            }
        }
    } else {
        match Settings::load() {
            Ok(config) => (config, None),
            Err(e) => (Settings::default(), Some(e)),
        }
    };

    init_tracing(log_level(config.debug || cli.debug, cli.info));
    if let Some(e) = load_error {
        tracing::warn!("Configuration error: {e}");
    }

    if !matches!(cli.command, Commands::Init { .. })
        && let Err(warning) = Settings::check_init()
    {
        tracing::debug!("{warning}, using default configuration");
    }

    let mut output = OutputManager::new(OutputFormat::from_json_flag(cli.json));

    let code = match &cli.command {
        Commands::Init { force } => match Settings::init_config_file(*force) {
            Ok(path) => {
                println!("Created configuration file at: {}", path.display());
                println!("Edit this file to customize your settings.");
                ExitCode::Success
            }
            Err(e) => report_error(&mut output, &e),
        },

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            match toml::to_string_pretty(&config) {
                Ok(toml_str) => {
                    println!("{toml_str}");
                    ExitCode::Success
                }
                Err(e) => {
                    eprintln!("Error displaying config: {e}");
                    ExitCode::GeneralError
                }
            }
        }

        Commands::Index { corpus_dir, force } => match run_index(corpus_dir, *force, &mut output) {
            Ok(count) => {
                status(
                    &mut output,
                    &format!(
                        "Indexed {count} symbols into {}",
                        IndexStore::index_path(corpus_dir).display()
                    ),
                );
                ExitCode::Success
            }
            Err(e) => report_error(&mut output, &e),
        },

        Commands::Lookup {
            query,
            target,
            summary,
        } => {
            let registry = ProviderRegistry::new(LocalCorpus::from_settings(&config));
            let summarize = *summary || config.output.summarize;
            let include_uri = !target.no_uri && config.output.include_uri;
            let result = match target.resolve(&config) {
                Ok((framework, version)) => {
                    run_lookup(&registry, query, framework, &version, summarize)
                        .await
                        .map(|refs| LookupReport::new(framework, version, refs, include_uri))
                }
                Err(e) => Err(e),
            };
            report(&mut output, result)
        }

        Commands::TypeInfo {
            file,
            target,
            summary,
        } => {
            let node = match read_type_info(file) {
                Ok(node) => node,
                Err(e) => {
                    eprintln!("{}", THEME.error_with_icon(&format!("{e:#}")));
                    std::process::exit(ExitCode::ParseError.into());
                }
            };
            let registry = ProviderRegistry::new(LocalCorpus::from_settings(&config));
            let summarize = *summary || config.output.summarize;
            let include_uri = !target.no_uri && config.output.include_uri;
            let result = match target.resolve(&config) {
                Ok((framework, version)) => {
                    run_type_info(&registry, &node, framework, &version, summarize)
                        .await
                        .map(|reference| {
                            LookupReport::new(framework, version, vec![reference], include_uri)
                        })
                }
                Err(e) => Err(e),
            };
            report(&mut output, result)
        }
    };

    std::process::exit(code.into());
}

fn status(output: &mut OutputManager, message: &str) {
    if let Err(e) = output.info(message) {
        tracing::warn!("Failed to write status message: {e}");
    }
}

fn report(output: &mut OutputManager, result: ApiRefResult<LookupReport>) -> ExitCode {
    match result {
        Ok(report) => output.success(report).unwrap_or(ExitCode::GeneralError),
        Err(e) => report_error(output, &e),
    }
}

fn report_error(output: &mut OutputManager, error: &ApiRefError) -> ExitCode {
    if error.is_user_facing() {
        tracing::debug!("{error}");
    } else {
        tracing::error!("{error}");
    }
    output
        .error(error)
        .unwrap_or_else(|_| ExitCode::from_error(error))
}
