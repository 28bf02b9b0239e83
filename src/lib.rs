pub mod config;
pub mod frontmatter;
pub mod load_config;
pub mod notify;
pub mod payload;
pub mod synchronise;
pub mod tags;
pub mod upload;
pub mod vault;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use load_config::load_config;
use notify::ConsoleNotifier;
use synchronise::{sync_note, sync_tree};
use upload::ApiClient;
use vault::{FsVault, Note, VaultEntry};

#[derive(Parser)]
#[clap(
    name = "notesync",
    version,
    about = "Push local markdown notes and note folders into a remote article catalog"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sync a note file or a whole folder of notes to the catalog
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Note file or folder to sync
        target: PathBuf,
        /// Destination path override (single note only)
        #[clap(long)]
        dest: Option<String>,
        /// Suppress per-note notifications during a folder sync
        #[clap(long)]
        silent: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync {
            config,
            target,
            dest,
            silent,
        } => {
            let settings = load_config(config)?;
            let client = ApiClient::new(&settings);
            let notifier = ConsoleNotifier;

            let meta = std::fs::metadata(&target)
                .with_context(|| format!("cannot access sync target {:?}", target))?;

            if meta.is_dir() {
                let vault = FsVault::new(&target);
                let root = VaultEntry::Folder {
                    path: String::new(),
                };
                println!("Sync starting...");
                let report =
                    sync_tree(&vault, &client, &notifier, &settings, &root, silent).await?;
                println!("Sync complete.\nReport:");
                println!("{:#?}", report);
            } else {
                let file_name = target
                    .file_name()
                    .and_then(|name| name.to_str())
                    .with_context(|| format!("invalid target file name {:?}", target))?;
                let note = Note::from_rel_path(file_name);
                if !note.is_markdown() {
                    anyhow::bail!("only markdown notes can be synced: {:?}", target);
                }
                let parent = match target.parent() {
                    Some(dir) if dir != Path::new("") => dir.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                let vault = FsVault::new(parent);
                let destination =
                    sync_note(&vault, &client, &notifier, &settings, &note, dest.as_deref())
                        .await?;
                println!("Synced to {destination}");
            }
            Ok(())
        }
    }
}
