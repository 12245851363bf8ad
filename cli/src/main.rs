mod add;

use anyhow::Result;
use clap::{Parser, Subcommand};
use essenza_core::nav_links;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "essenza")]
#[command(about = "Essenza recipe CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new recipe to the recipe API
    Add {
        /// API base URL (default: ESSENZA_API_URL or http://localhost:4000)
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Duration in minutes
        #[arg(long)]
        duration: String,
        #[arg(long)]
        instructions: String,
        /// Ingredient as NAME=QUANTITY, repeatable
        #[arg(long = "ingredient", required = true, value_parser = add::parse_ingredient)]
        ingredients: Vec<essenza_core::Ingredient>,
        /// Optional recipe image (max 5MB)
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Show the navigation bar for a path
    Nav {
        /// Current path (e.g. /recipes/add)
        #[arg(long, default_value = "/")]
        path: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            server,
            title,
            description,
            duration,
            instructions,
            ingredients,
            image,
        } => {
            let request = add::AddRequest {
                server,
                title,
                description,
                duration,
                instructions,
                ingredients,
                image,
            };
            add::add(request).await?;
        }
        Commands::Nav { path, json } => {
            nav(&path, json)?;
        }
    }

    Ok(())
}

fn nav(path: &str, json: bool) -> Result<()> {
    let links = nav_links(path);

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    for link in links {
        let marker = if link.active { "*" } else { " " };
        println!("{} {:<12} {}", marker, link.label, link.path);
    }

    Ok(())
}
