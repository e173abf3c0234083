//! CLI entry point for quill-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill-rs")]
#[command(version)]
#[command(about = "A single-owner blog with in-browser editing and git publishing", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "127.0.0.1")]
        ip: String,
    },

    /// Create a new draft post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quill_rs=debug,info"
    } else {
        "quill_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = quill_rs::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            quill_rs::server::start(&blog, &ip, port).await?;
        }

        Commands::New { title, slug } => {
            let blog = quill_rs::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            quill_rs::commands::new::run(&blog, &title, slug.as_deref())?;
        }

        Commands::List { r#type } => {
            let blog = quill_rs::Blog::new(&base_dir)?;
            quill_rs::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("quill-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
