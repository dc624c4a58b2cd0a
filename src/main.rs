//! CLI entry point for blog-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_rs::commands::new::NewPost;
use blog_rs::config::Environment;

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(version)]
#[command(about = "Content index and view-ranking backend for a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Override the configured environment (development shows drafts)
    #[arg(short, long, global = true)]
    env: Option<Environment>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name without extension (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Tags, comma separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Series name
        #[arg(long)]
        series: Option<String>,

        /// Mark as draft
        #[arg(long)]
        draft: bool,
    },

    /// Write feed, sitemap, robots.txt and search index to the public folder
    #[command(alias = "g")]
    Generate,

    /// Start the API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove generated files from the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, category, series, draft)
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
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
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
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let open = |base_dir: &PathBuf| -> Result<blog_rs::Blog> {
        let mut blog = blog_rs::Blog::new(base_dir)?;
        if let Some(env) = cli.env {
            blog.config.environment = env;
        }
        Ok(blog)
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blog_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            slug,
            description,
            tags,
            series,
            draft,
        } => {
            let blog = open(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = blog_rs::commands::new::create_post(
                &blog,
                &NewPost {
                    title,
                    slug,
                    description,
                    tags,
                    series,
                    draft,
                },
            )?;
            println!("Created: {:?}", path);
        }

        Commands::Generate => {
            let blog = open(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = open(&base_dir)?;
            tracing::info!(
                "Starting server at http://{}:{} ({})",
                ip,
                port,
                blog.config.environment
            );
            blog_rs::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = open(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = open(&base_dir)?;
            blog_rs::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
