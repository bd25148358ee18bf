use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swagbridge_core::config::{self, BridgeConfig, CONFIG_FILE_NAME};
use swagbridge_core::derive::{apply_aliases, get_all_endpoints, resolve_server_url};
use swagbridge_core::{DefaultRequestBuilder, EndpointMap, RequestArgs, SchemaDocument, SchemaStore};

#[derive(Parser)]
#[command(
    name = "swagbridge",
    about = "Derive invocable endpoints from OpenAPI/Swagger documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the endpoints derived from a schema
    Endpoints {
        /// Schema path or URL (YAML or JSON); defaults to the configured input
        #[arg(short, long)]
        input: Option<String>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Build the request for one endpoint
    Request {
        /// Endpoint name (operationId, route-derived name or alias)
        name: String,

        /// Schema path or URL (YAML or JSON); defaults to the configured input
        #[arg(short, long)]
        input: Option<String>,

        /// Call arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,

        /// Base URL overriding the schema's servers
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the base URL resolved from the schema's servers
    Servers {
        /// Schema path or URL (YAML or JSON); defaults to the configured input
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Initialize a new swagbridge configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Endpoints { input, format } => cmd_endpoints(input, format),

        Commands::Request {
            name,
            input,
            args,
            base_url,
        } => cmd_request(name, input, args, base_url),

        Commands::Servers { input } => cmd_servers(input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagbridge", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<BridgeConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    Ok(cfg.unwrap_or_default())
}

fn load_schema(input: Option<String>, cfg: &BridgeConfig) -> Result<Arc<SchemaDocument>> {
    let input = input.unwrap_or_else(|| cfg.input.clone());
    log::debug!("loading schema from {input}");
    let store = SchemaStore::new();
    store
        .load_schema(&input)
        .with_context(|| format!("failed to load {input}"))?;
    Ok(store.get_schema()?)
}

fn load_endpoints(input: Option<String>, cfg: &BridgeConfig) -> Result<EndpointMap> {
    let schema = load_schema(input, cfg)?;
    Ok(apply_aliases(get_all_endpoints(&schema), &cfg.naming.aliases))
}

fn cmd_endpoints(input: Option<String>, format: OutputFormat) -> Result<()> {
    let cfg = try_load_config()?;
    let endpoints = load_endpoints(input, &cfg)?;
    let summary = build_endpoint_summary(&endpoints);

    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    eprintln!("{} endpoints", endpoints.len());
    Ok(())
}

fn build_endpoint_summary(endpoints: &EndpointMap) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = endpoints
        .iter()
        .map(|(name, endpoint)| {
            let parameters: Vec<serde_json::Value> = endpoint
                .parameters
                .iter()
                .map(|p| serde_json::json!({ "name": p.name, "type": p.param_type }))
                .collect();
            serde_json::json!({
                "name": name,
                "method": endpoint.request.method.as_str(),
                "path": endpoint.request.path,
                "mutation": endpoint.mutation,
                "description": endpoint.description,
                "parameters": parameters,
                "response": endpoint.response,
            })
        })
        .collect();

    serde_json::Value::Array(entries)
}

fn cmd_request(
    name: String,
    input: Option<String>,
    args: String,
    base_url: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?;
    let endpoints = load_endpoints(input, &cfg)?;

    let Some(endpoint) = endpoints.get(&name) else {
        let known: Vec<&str> = endpoints.keys().map(String::as_str).collect();
        anyhow::bail!("no endpoint named `{name}`; known endpoints: {}", known.join(", "));
    };

    let args: RequestArgs = match serde_json::from_str::<serde_json::Value>(&args)
        .context("--args is not valid JSON")?
    {
        serde_json::Value::Object(map) => map,
        other => anyhow::bail!("--args must be a JSON object, got {other}"),
    };

    let base_url = base_url.or(cfg.client.base_url);
    let request = endpoint
        .build_request(&DefaultRequestBuilder, &args, base_url.as_deref())
        .with_context(|| format!("failed to build request for `{name}`"))?;

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn cmd_servers(input: Option<String>) -> Result<()> {
    let cfg = try_load_config()?;
    let schema = load_schema(input, &cfg)?;

    match resolve_server_url(&schema) {
        Some(url) => println!("{}", url),
        None => eprintln!("The schema declares no servers."),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
