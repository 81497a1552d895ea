//! Fitmark CLI

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fitmark::prelude::*;
use fitmark::{format_blocks, format_document, format_editor_state};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Fitmark - markdown for fitness content
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, env = "FITMARK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a document and render it
    Render {
        /// Input file, or `-` for stdin
        input: String,

        /// Output format (html, json, text)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Inline back end (direct, markdown); overrides the configuration
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Print the classified block of every line
    Blocks {
        /// Input file, or `-` for stdin
        input: String,
    },

    /// Run mention autocomplete against a buffer
    Complete {
        /// Editor buffer
        #[arg(long)]
        buffer: String,

        /// Cursor byte offset (defaults to the end of the buffer)
        #[arg(long)]
        cursor: Option<usize>,

        /// Catalog file (YAML with `exercises` and `anatomy` lists)
        #[arg(long)]
        catalog: PathBuf,

        /// Commit the candidate at this 0-based menu position
        #[arg(long)]
        select: Option<usize>,

        /// Print the resulting editor state as JSON
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    init_logging(&args, &config);
    log::debug!("Fitmark v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Render {
            input,
            format,
            backend,
        } => {
            let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
            let mut render_config = config.render.clone();
            if let Some(backend) = backend {
                render_config.backend = backend.parse()?;
            }

            let text = read_input(&input)?;
            let doc = ParseEngine::new(render_config.backend).parse(&text);
            log::info!(
                "Parsed {} blocks, {} mentions with the {} back end",
                doc.len(),
                doc.mentions().len(),
                render_config.backend
            );

            print!("{}", format_document(&doc, format, &render_config)?);
        }

        Command::Blocks { input } => {
            let text = read_input(&input)?;
            print!("{}", format_blocks(&classify_blocks(&text)));
        }

        Command::Complete {
            buffer,
            cursor,
            catalog,
            select,
            json,
        } => {
            let catalogs = load_catalogs(&catalog).await?;
            let autocomplete = Autocomplete::with_config(catalogs, config.autocomplete.clone());

            let cursor = cursor.unwrap_or(buffer.len());
            let mut state = EditorState::default();
            state
                .apply_edit(buffer, cursor)
                .context("Cursor does not point into the buffer")?;
            let mut state = autocomplete.refresh(state);

            if let Some(index) = select {
                let available = state
                    .autocomplete
                    .as_ref()
                    .map(|session| session.candidates.len())
                    .unwrap_or(0);
                if index >= available {
                    bail!(
                        "Cannot select candidate {}: {} candidates available",
                        index,
                        available
                    );
                }

                for _ in 0..index {
                    state = autocomplete
                        .update(state, EditorEvent::Key(Key::ArrowDown))
                        .state;
                }
                let update = autocomplete.update(state, EditorEvent::Key(Key::Enter));
                if let Some(reference) = &update.committed {
                    log::info!("Inserted {}", encode_mention(reference));
                }
                state = update.state;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", format_editor_state(&state));
            }
        }
    }

    Ok(())
}

/// Flags win over the configured level; `RUST_LOG` overrides both.
fn init_logging(args: &Args, config: &EngineConfig) {
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Error
    } else {
        config.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

async fn load_catalogs(path: &Path) -> Result<Catalogs> {
    let yaml = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalogs = Catalogs::from_yaml(&yaml)?;
    log::debug!(
        "Loaded {} catalog entries from {}",
        catalogs.len(),
        path.display()
    );
    Ok(catalogs)
}
