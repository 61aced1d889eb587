//! lua-export - scene exporter
//!
//! Converts scenes handed over as JSON into Lua table documents, and checks
//! that exported documents load back.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use lua_export::{export_scene, parse_document, ExportConfig, LuaValue};
use scene_model::Scene;

#[derive(Parser)]
#[command(name = "lua-export")]
#[command(about = "Scene graph to Lua table exporter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a JSON scene as a Lua document
    Convert {
        /// Input scene (.json)
        input: PathBuf,

        /// Output .lua file (default: input with .lua extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export settings (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Significant digits for floats (15-17, overrides config)
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Parse an exported document and report what it contains
    Check {
        /// Lua document to check
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            precision,
        } => {
            let mut export_config = match &config {
                Some(path) => ExportConfig::load(path)?,
                None => ExportConfig::default(),
            };
            if let Some(precision) = precision {
                export_config.float_precision = precision;
            }

            let output = output.unwrap_or_else(|| input.with_extension("lua"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            convert(&input, &output, &export_config)?;
            tracing::info!("Done!");
        }

        Commands::Check { input } => {
            tracing::info!("Checking {:?}", input);
            check(&input)?;
            tracing::info!("Document is valid!");
        }
    }

    Ok(())
}

fn convert(input: &Path, output: &Path, config: &ExportConfig) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read scene: {:?}", input))?;
    let scene: Scene = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse scene JSON: {:?}", input))?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {:?}", output))?;
    export_scene(BufWriter::new(file), &scene, config)
        .with_context(|| format!("Failed to export scene to {:?}", output))?;

    tracing::info!(
        "  {} nodes, {} meshes, {} materials, {} textures, {} animations",
        scene.node_count(),
        scene.meshes.len(),
        scene.materials.len(),
        scene.textures.len(),
        scene.animations.len()
    );
    Ok(())
}

fn check(input: &Path) -> Result<()> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read document: {:?}", input))?;
    let document = parse_document(&bytes)
        .with_context(|| format!("Failed to parse document: {:?}", input))?;

    let count = |key: &str| document.get(key).as_table().map_or(0, |t| t.len());
    if document.as_table().is_none() {
        anyhow::bail!("Document {:?} does not return a table", input);
    }
    let name = match document.get("name") {
        LuaValue::String(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => String::new(),
    };

    tracing::info!(
        "  scene {:?}: {} nodes, {} meshes, {} materials, {} textures, {} animations",
        name,
        count("nodes"),
        count("meshes"),
        count("materials"),
        count("textures"),
        count("animations")
    );
    Ok(())
}
