//! Command-line entry point.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wikibridge::{PublishRequest, Publisher};
use wikibridge_core::{Document, WikiConfig};
use wikibridge_remote::WikiClient;
use wikibridge_vault::{ImageResolver, VaultIndex};

#[derive(Parser)]
#[command(name = "wikibridge", version, about = "Publish notes to a remote wiki")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "wikibridge.yml", global = true)]
    config: PathBuf,

    /// Vault root directory
    #[arg(long, default_value = ".", global = true)]
    vault: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish one note, with its images, to the wiki
    Publish {
        /// Note file, relative to the vault root
        note: PathBuf,
        /// Wiki folder to publish under, overriding the note's folder
        #[arg(long)]
        folder: Option<String>,
        /// Overwrite the page if one already exists at the target path
        #[arg(long)]
        update: bool,
        /// Convert and report without contacting the wiki
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the converted markup for one note
    Preview {
        note: PathBuf,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Validate the configuration and token resolution
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = WikiConfig::load(&cli.config)
        .await
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Command::Publish {
            note,
            folder,
            update,
            dry_run,
        } => {
            let vault = VaultIndex::open(&cli.vault)?;
            let document = read_document(&cli.vault, &note).await?;
            let request = PublishRequest {
                folder,
                allow_update: update,
            };

            if dry_run {
                let client = NoRemote;
                let publisher = Publisher::new(&vault, &client, &config);
                let path = publisher.target_path(&document, &request);
                let conversion = publisher.preview(&document, &request);
                println!("Would publish '{}' to {path}", conversion.title);

                let resolver = ImageResolver::new(&vault, &config.attachment_dirs);
                let resolved = resolver.resolve_images(&conversion.images, &document.folder);
                for image in &conversion.images {
                    match resolved.files.get(&image.raw_path) {
                        Some(file) => println!("  image {} -> {}", image.raw_path, file.display()),
                        None => println!("  image {} -> UNRESOLVED", image.raw_path),
                    }
                }
                return Ok(());
            }

            let client = WikiClient::new(&config)?;
            let publisher = Publisher::new(&vault, &client, &config);
            let outcome = publisher.publish(&document, &request).await?;

            for image in &outcome.images {
                let mark = if image.success { "ok" } else { "FAILED" };
                println!("  image {} [{mark}] {}", image.reference, image.message);
            }
            println!("{}", outcome.page.message);
            if let Some(url) = &outcome.page.page_url {
                println!("{url}");
            }

            if outcome.page.needs_confirmation {
                bail!("Re-run with --update to overwrite the existing page");
            }
            if !outcome.success() {
                bail!("Publishing failed");
            }
        }
        Command::Preview { note, folder } => {
            let vault = VaultIndex::open(&cli.vault)?;
            let document = read_document(&cli.vault, &note).await?;
            let request = PublishRequest {
                folder,
                allow_update: false,
            };
            let client = NoRemote;
            let publisher = Publisher::new(&vault, &client, &config);
            print!("{}", publisher.preview(&document, &request).content);
        }
        Command::CheckConfig => {
            config.validate()?;
            config
                .resolve_token()
                .context("Token resolution failed")?;
            println!("Configuration OK: {}", config.base_url);
        }
    }

    Ok(())
}

async fn read_document(vault_root: &Path, note: &Path) -> anyhow::Result<Document> {
    let full = vault_root.join(note);
    let content = tokio::fs::read_to_string(&full)
        .await
        .with_context(|| format!("Failed to read {}", full.display()))?;

    let file_name = note
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Invalid note path {}", note.display()))?;
    let folder = note
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    Ok(Document::new(content, file_name, folder))
}

/// Placeholder remote for commands that never reach the network.
struct NoRemote;

mod offline {
    use super::NoRemote;
    use async_trait::async_trait;
    use wikibridge_core::{Error, RemoteFolder, RemotePage, Result};
    use wikibridge_remote::store::{AssetStore, FolderStore, PageDraft, PageStore};

    #[async_trait]
    impl FolderStore for NoRemote {
        async fn list_folders(&self, _parent_id: u64) -> Result<Vec<RemoteFolder>> {
            Err(Error::remote("Offline"))
        }
        async fn create_folder(&self, _parent_id: u64, _slug: &str) -> Result<()> {
            Err(Error::remote("Offline"))
        }
    }

    #[async_trait]
    impl PageStore for NoRemote {
        async fn page_by_path(&self, _path: &str) -> Result<Option<RemotePage>> {
            Err(Error::remote("Offline"))
        }
        async fn create_page(&self, _draft: &PageDraft) -> Result<RemotePage> {
            Err(Error::remote("Offline"))
        }
        async fn update_page(&self, _id: u64, _draft: &PageDraft) -> Result<RemotePage> {
            Err(Error::remote("Offline"))
        }
    }

    #[async_trait]
    impl AssetStore for NoRemote {
        async fn upload_asset(
            &self,
            _folder_id: u64,
            _file_name: &str,
            _bytes: Vec<u8>,
        ) -> Result<String> {
            Err(Error::remote("Offline"))
        }
    }
}
