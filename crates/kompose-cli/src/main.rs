//! kompose command-line interface.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use kompose_convert::{convert, DesignDocument, DocumentFacts};
use kompose_core::Node;
use kompose_mapping::{Category, MappingTable, MutableMappingTable};

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "kompose", about = "Design documents to Jetpack Compose source", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a design document and print the layout IR as JSON
    Convert {
        /// Design document (JSON)
        document: PathBuf,
    },
    /// Render a design document as Compose source
    Render {
        /// Design document (JSON)
        document: PathBuf,
        /// Settings file holding the saved mapping config
        #[arg(short, long, default_value = "kompose.json")]
        settings: PathBuf,
        /// Show token names instead of mapped values
        #[arg(long)]
        names: bool,
        /// Print marked output for an editor front end
        #[arg(long)]
        marked: bool,
        /// Store the merged mapping config back into the settings file
        #[arg(long)]
        save: bool,
    },
    /// Validate a mapping config file
    CheckConfig {
        /// Config file (TOML)
        config: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert { document } => {
            let document = load_document(&document)?;
            let root = convert_document(&document).await?;
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
        Command::Render {
            document,
            settings: settings_path,
            names,
            marked,
            save,
        } => {
            let document = load_document(&document)?;
            let root = convert_document(&document).await?;
            let mut settings = Settings::load(&settings_path)?;
            if names {
                settings.show_mapped_values = false;
            }

            let output = render_source(&root, &settings, marked)?;
            print!("{}", output.source);

            if save {
                settings.mapping_config = output.table.to_config();
                settings.save(&settings_path)?;
                log::info!("Saved mapping config to {}", settings_path.display());
            }
        }
        Command::CheckConfig { config } => {
            let text = std::fs::read_to_string(&config)
                .with_context(|| format!("reading config {}", config.display()))?;
            let parsed = MappingTable::check_config(&text)?;
            for category in Category::ALL {
                let count = parsed.get(&category).map_or(0, |entries| entries.len());
                println!("{}: {} entries", category, count);
            }
        }
    }
    Ok(())
}

fn load_document(path: &Path) -> Result<DesignDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    DesignDocument::from_json(&json).with_context(|| format!("parsing document {}", path.display()))
}

async fn convert_document(document: &DesignDocument) -> Result<Node> {
    let facts = DocumentFacts::new(document);
    convert(&facts, &document.root)
        .await
        .ok_or_else(|| anyhow!("Root node is hidden or unsupported"))
}

struct RenderOutput {
    source: String,
    table: MappingTable,
}

/// Render `root` against the saved mapping config. Saved values override
/// the freshly rendered ones; tokens absent from the saved config keep
/// their rendered values.
fn render_source(root: &Node, settings: &Settings, marked: bool) -> Result<RenderOutput> {
    let saved = MappingTable::from_config_or_empty(&settings.mapping_config);

    let mut table = MutableMappingTable::new();
    let code = kompose_render::render(&mut table, root)?;
    table.merge(&saved, true);
    let table = table.freeze();

    let source = if marked {
        code.to_marked()?
    } else {
        code.to_source(&table, settings.show_mapped_values)
    };
    Ok(RenderOutput { source, table })
}
