//! CLI entrypoint for sdk-bridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use bridge_application::{
    CatalogBuilder, CatalogHandle, CredentialSource, ExecuteMethodUseCase, LibraryResolver,
    NativeJson, RawAttribute, ResultNormalizer,
};
use bridge_domain::{Catalog, Mode};
use bridge_infrastructure::{
    ConfigDiscovery, ConfigLoader, EnvCredentialSource, FileConfig, HintTable,
    JsonSchemaToolConverter, JsonlCallJournal, LibraryCatalog, ReflectiveDiscovery,
    default_pipeline,
};
use bridge_presentation::{Cli, Commands, ConsoleFormatter, ToolServer};
use clap::Parser;
use serde_json::{Map, Value};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_PAYLOAD: u8 = 2;
const EXIT_UNKNOWN_TOOL: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = match init_logging(cli.verbose, cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Logs always go to stderr; stdout carries outcomes and the JSON-RPC stream
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = daily_appender(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn daily_appender(dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sdk-bridge.log")
        .build(dir)
        .with_context(|| format!("Failed to open log directory {}", dir.display()))
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Commands::ShowConfig = cli.command {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let packages = reflective_packages(&config, &cli.package);
    if !config.has_sources() && cli.package.is_empty() {
        warn!("No packages or providers configured; the catalog will be empty");
    }

    // === Dependency Injection ===
    let builder = catalog_builder(&config, &packages);
    info!(strategies = ?builder.strategy_ids(), "Building catalog");
    let catalog = builder.build().context("Failed to build the tool catalog")?;
    let executor = executor(&config)?;

    match cli.command {
        Commands::List { json, mode } => {
            list(&catalog, json, mode.map(Mode::from));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Call {
            tool,
            payload,
            dry_run,
            confirm,
        } => Ok(call(&catalog, &executor, &tool, payload.as_deref(), dry_run, confirm)),
        Commands::Serve => {
            let server = ToolServer::new(
                Arc::new(CatalogHandle::new(catalog)),
                Arc::new(executor),
                Arc::new(JsonSchemaToolConverter),
            );
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start the async runtime")?;
            runtime
                .block_on(server.serve_stdio())
                .context("Tool server I/O failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::ShowConfig => Ok(ExitCode::SUCCESS),
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Config packages first, then `--package` flags, without duplicates
fn reflective_packages(config: &FileConfig, flags: &[String]) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for package in config.discovery.packages.iter().chain(flags) {
        if !packages.contains(package) {
            packages.push(package.clone());
        }
    }
    packages
}

/// Reflective strategies first so declared providers win name clashes
fn catalog_builder(config: &FileConfig, packages: &[String]) -> CatalogBuilder {
    let resolver: Arc<dyn LibraryResolver> = Arc::new(LibraryCatalog::builtin());
    let credentials: Arc<dyn CredentialSource> = Arc::new(EnvCredentialSource);
    let hints = Arc::new(HintTable::defaults().with_overrides(&config.discovery.hints));

    let mut builder = CatalogBuilder::new();
    for package in packages {
        builder = builder.with_strategy(
            ReflectiveDiscovery::new(package.clone(), Arc::clone(&resolver), Arc::clone(&credentials))
                .with_hints(Arc::clone(&hints))
                .with_pipeline(default_pipeline(config.discovery.max_instances)),
        );
    }
    if !config.providers.is_empty() {
        builder = builder.with_strategy(ConfigDiscovery::new(
            config.providers.clone(),
            resolver,
            credentials,
        ));
    }
    builder
}

fn executor(config: &FileConfig) -> Result<ExecuteMethodUseCase> {
    let normalizer = ResultNormalizer::empty()
        .with_converter(NativeJson)
        .with_converter(RawAttribute::new(config.execution.raw_attributes.iter().cloned()));
    let mut executor = ExecuteMethodUseCase::new().with_normalizer(normalizer);

    if let Some(path) = &config.execution.journal {
        let journal = JsonlCallJournal::open(path)
            .with_context(|| format!("Failed to open call journal {}", path.display()))?;
        info!(path = %path.display(), "Call journal enabled");
        executor = executor.with_journal(Arc::new(journal));
    }
    Ok(executor)
}

fn list(catalog: &Catalog, json: bool, mode: Option<Mode>) {
    let listing: Vec<_> = catalog
        .listing()
        .into_iter()
        .filter(|tool| mode.is_none_or(|m| tool.mode == m))
        .collect();

    if json {
        println!("{}", ConsoleFormatter::format_listing_json(&listing));
    } else {
        print!("{}", ConsoleFormatter::format_listing(&listing));
    }
}

fn call(
    catalog: &Catalog,
    executor: &ExecuteMethodUseCase,
    tool: &str,
    raw_payload: Option<&str>,
    dry_run: bool,
    confirm: bool,
) -> ExitCode {
    let payload = match parse_payload(raw_payload, dry_run, confirm) {
        Ok(payload) => payload,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_PAYLOAD);
        }
    };

    let Some(spec) = catalog.get(tool) else {
        eprint!("{}", ConsoleFormatter::format_unknown_tool(tool, catalog.names()));
        return ExitCode::from(EXIT_UNKNOWN_TOOL);
    };

    let outcome = executor.execute(spec, &payload);
    println!("{}", ConsoleFormatter::format_outcome(&outcome));
    ExitCode::SUCCESS
}

/// Parse the payload argument; `--dry-run`/`--confirm` flags set the
/// matching reserved keys
fn parse_payload(raw: Option<&str>, dry_run: bool, confirm: bool) -> Result<Map<String, Value>, String> {
    let mut payload = match raw.map(serde_json::from_str::<Value>) {
        None => Map::new(),
        Some(Ok(Value::Object(map))) => map,
        Some(Ok(_)) => return Err("payload must be a JSON object".to_string()),
        Some(Err(e)) => return Err(format!("invalid JSON payload: {}", e)),
    };

    if dry_run {
        payload.insert(bridge_application::DRY_RUN_KEY.to_string(), Value::Bool(true));
    }
    if confirm {
        payload.insert(bridge_application::CONFIRM_KEY.to_string(), Value::Bool(true));
    }
    Ok(payload)
}
