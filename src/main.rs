//! bindgraph CLI - Inspect and validate resolved binding graphs

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bindgraph")]
#[command(version)]
#[command(about = "Resolved binding graphs for compile-time dependency injection")]
#[command(long_about = r#"
bindgraph loads a manifest of resolved component bindings and lets you:
  • Print the component tree and every resolved key
  • Look up which bindings answer a request in a given component
  • Validate sibling and hierarchy uniqueness of components

Example usage:
  bindgraph init
  bindgraph inspect --bindings
  bindgraph lookup --key '@Named("replica") com.example.Database' --kind provider
  bindgraph lookup --key com.example.MainActivity --kind members_injection \
      --component com.example.AppComponent/com.example.SessionComponent
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational output (same as BINDGRAPH_QUIET=1)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a bindgraph.toml config file
    Init {
        /// Manifest the config should point at
        #[arg(short, long, default_value = "bindings.toml")]
        manifest: String,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the component tree
    Inspect {
        /// Path to the manifest (TOML or JSON)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Also print every resolved key and its bindings
        #[arg(short, long)]
        bindings: bool,
    },

    /// Look up the bindings answering one request
    Lookup {
        /// Path to the manifest (TOML or JSON)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Requested key, e.g. `@Named("db") com.example.Database`
        #[arg(short, long)]
        key: String,

        /// Request kind (instance, provider, lazy, members_injection, ...)
        #[arg(long, default_value = "instance")]
        kind: String,

        /// `/`-separated path of the component to query; defaults to the root
        #[arg(short, long)]
        component: Option<String>,
    },

    /// Show statistics about the component tree
    Stats {
        /// Path to the manifest (TOML or JSON)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Build the graph and check sibling and hierarchy uniqueness
    Validate {
        /// Path to the manifest (TOML or JSON)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

/// Print a successful command result as a JSON envelope
pub fn emit_success(command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    bindgraph::output::set_quiet(cli.quiet);
    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let config_path = cli.config.unwrap_or_else(bindgraph::config::default_config_path);

    let load_config = || -> anyhow::Result<bindgraph::config::BindgraphConfig> {
        Ok(bindgraph::config::load_config(Some(&config_path))?.unwrap_or_default())
    };

    match cli.command {
        // `init` replaces the config, so it never reads the existing one
        Commands::Init { manifest, force } => {
            commands::run_init(output_mode, &config_path, manifest, force)
        }
        Commands::Inspect { manifest, bindings } => {
            let config = load_config()?;
            let manifest = commands::manifest_path(manifest, &config_path, &config);
            commands::run_inspect(output_mode, &manifest, &config, bindings)
        }
        Commands::Lookup { manifest, key, kind, component } => {
            let config = load_config()?;
            let manifest = commands::manifest_path(manifest, &config_path, &config);
            commands::run_lookup(output_mode, &manifest, &config, &key, &kind, component.as_deref())
        }
        Commands::Stats { manifest } => {
            let config = load_config()?;
            let manifest = commands::manifest_path(manifest, &config_path, &config);
            commands::run_stats(output_mode, &manifest, &config)
        }
        Commands::Validate { manifest } => {
            let config = load_config()?;
            let manifest = commands::manifest_path(manifest, &config_path, &config);
            commands::run_validate(output_mode, &manifest)
        }
    }
}
