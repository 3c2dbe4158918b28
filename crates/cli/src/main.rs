//! Wishlist CLI - inspect and edit the stored wishlist without the server.
//!
//! # Usage
//!
//! ```bash
//! # Show saved entries
//! wl-cli list
//!
//! # Save a product from a catalog record on disk
//! wl-cli add --product product.json --color 0 --size M
//!
//! # Change the size of an entry (its id stays the same)
//! wl-cli set-size P1-0-M L
//!
//! # Remove one entry, or everything
//! wl-cli remove P1-0-M
//! wl-cli clear
//! ```
//!
//! The CLI reads and writes the same file-backed storage as the storefront
//! (`WISHLIST_DATA_DIR`, `WISHLIST_STORAGE_KEY`). Run it while the server is
//! stopped; the server only reads storage at startup.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wishlist_storefront::wishlist::DEFAULT_STORAGE_KEY;

mod commands;

#[derive(Parser)]
#[command(name = "wl-cli")]
#[command(author, version, about = "Wishlist CLI tools")]
struct Cli {
    /// Directory holding durable storage files
    #[arg(long, env = "WISHLIST_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Storage key the wishlist snapshot lives under
    #[arg(long, env = "WISHLIST_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved entries
    List,
    /// Save a product to the wishlist
    Add {
        /// Path to a product record (catalog JSON)
        #[arg(short, long)]
        product: PathBuf,

        /// Color (variation) index
        #[arg(short, long, default_value_t = 0)]
        color: usize,

        /// Size to save
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove an entry by id
    Remove {
        /// Entry id, e.g. `P1-0-M`
        id: String,
    },
    /// Change the size of an entry
    SetSize {
        /// Entry id, e.g. `P1-0-M`
        id: String,
        /// New size
        size: String,
    },
    /// Remove every entry
    Clear,
}

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut store = commands::open_store(&cli.data_dir, &cli.storage_key)?;

    match cli.command {
        Commands::List => commands::list(&store),
        Commands::Add {
            product,
            color,
            size,
        } => commands::add(&mut store, &product, color, size.as_deref())?,
        Commands::Remove { id } => commands::remove(&mut store, &id)?,
        Commands::SetSize { id, size } => commands::set_size(&mut store, &id, &size)?,
        Commands::Clear => commands::clear(&mut store)?,
    }
    Ok(())
}
