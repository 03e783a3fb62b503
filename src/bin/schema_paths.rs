//! Schema Paths CLI
//!
//! Walks a Vega-Lite (or any JSON) schema and writes the path list,
//! containment tree, dependency table, key graph and enum index.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use schema_paths::export::write_artifacts;
use schema_paths::graph::{path_list, traverse, PointerResolver};
use schema_paths::loader::load_and_validate;
use schema_paths::search::search;
use schema_paths::{PathsConfig, RunManifest, SchemaPaths};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-paths")]
#[command(about = "Enumerate every property path through a JSON Schema")]
struct Cli {
    /// Config file layered over schema-paths.toml and the environment
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the schema and write every artifact
    Export {
        /// Path to the JSON Schema file
        #[arg(short, long, default_value = "vega-lite-v2.json")]
        schema_path: PathBuf,

        /// Artifact prefix (defaults to the configured out_path)
        #[arg(short, long)]
        out_path: Option<PathBuf>,

        /// Blocklisted key; repeat to replace the configured blocklist
        #[arg(short, long = "filter")]
        filter: Vec<String>,

        /// Disable the blocklist entirely
        #[arg(long, conflicts_with = "filter")]
        no_filter: bool,

        /// Also write the containment graph as Graphviz DOT
        #[arg(long)]
        dot: bool,

        /// Pretty-print JSON artifacts
        #[arg(long)]
        pretty: bool,

        /// Skip meta-schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Fuzzy search over the extracted paths
    Search {
        query: String,

        /// Path to the JSON Schema file
        #[arg(short, long, default_value = "vega-lite-v2.json")]
        schema_path: PathBuf,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Skip meta-schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Show the effective configuration or write a default one
    Config {
        /// Write the default configuration to this file
        #[arg(long)]
        init: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = PathsConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Export {
            schema_path,
            out_path,
            filter,
            no_filter,
            dot,
            pretty,
            no_validate,
        } => {
            if let Some(out_path) = out_path {
                config.output.out_path = out_path;
            }
            if no_filter {
                config.traversal.blocklist.clear();
            } else if !filter.is_empty() {
                config.traversal.blocklist = filter;
            }
            if dot {
                config.output.write_dot = true;
            }
            if pretty {
                config.output.format = schema_paths::OutputFormat::Pretty;
            }
            if no_validate {
                config.validation.strict_json_schema = false;
            }

            println!("Loading schema from: {:?}", schema_path);
            let document = load_and_validate(&schema_path, config.validation.strict_json_schema)
                .with_context(|| format!("loading {}", schema_path.display()))?;

            let paths = SchemaPaths::analyze(&document, &config.traversal.blocklist)
                .context("walking schema")?;

            println!(
                "Walked {} raw nodes: {} distinct paths, {} after filtering {:?}",
                paths.stats.expanded,
                paths.stats.distinct,
                paths.stats.retained,
                config.traversal.blocklist
            );
            println!(
                "Tree size {} | {} dependency entries | {} graph keys | {} enum values",
                paths.tree_size(),
                paths.dependencies.len(),
                paths.graph.len(),
                paths.enums.len()
            );

            let manifest = config
                .output
                .write_manifest
                .then(|| RunManifest::new(&document, &paths).with_schema_path(&schema_path));

            let written = write_artifacts(&paths, manifest, &config.output)
                .with_context(|| format!("writing artifacts to {}", config.output.out_path.display()))?;

            for path in written {
                println!("✅ Wrote {:?}", path);
            }
            Ok(())
        }

        Commands::Search {
            query,
            schema_path,
            limit,
            no_validate,
        } => {
            let strict = config.validation.strict_json_schema && !no_validate;
            let document = load_and_validate(&schema_path, strict)
                .with_context(|| format!("loading {}", schema_path.display()))?;
            let resolver = PointerResolver::new(&document);
            let nodes = traverse(&document, &resolver, &config.traversal.blocklist)
                .context("walking schema")?;

            let results = search(&path_list(&nodes), &query, limit);
            if results.is_empty() {
                println!("No paths match {:?}", query);
            }
            for result in results {
                println!("{:>5}  {}", result.score, result.path);
            }
            Ok(())
        }

        Commands::Config { init } => {
            match init {
                Some(path) => {
                    PathsConfig::default()
                        .save(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Wrote default configuration to {:?}", path);
                }
                None => print!("{}", config.to_toml()?),
            }
            Ok(())
        }
    }
}
