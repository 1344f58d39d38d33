//! Demo application shell for the segmentation pages.
//!
//! Wires the five demo pages (home, two image-segmentation variants, the
//! devide-to-pieces tool, and face-landmark detection) into a route table
//! and drives the router from the command line:
//!
//! ```text
//! view-router routes              # list the table and per-view load state
//! view-router resolve /face-landmarks
//! view-router navigate home faceLandmarks
//! ```
//!
//! The deployment base prefix comes from, in order of precedence, the
//! `--base` flag, the `APP_BASE_PATH` environment variable, and the config
//! file.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use view_router::config::loader::load_config;
use view_router::config::RouterConfig;
use view_router::observability::logging::init_logging;
use view_router::routing::{NavigationOutcome, Resolution, RouteTable, Router};
use view_router::views::LoadError;

/// One page of the demo application.
///
/// The actual page content (segmentation models, canvas plumbing) lives
/// with the views; the shell only needs a title to show.
#[derive(Debug)]
struct DemoView {
    title: &'static str,
}

fn page(title: &'static str) -> impl Future<Output = Result<Arc<DemoView>, LoadError>> + Send {
    async move { Ok(Arc::new(DemoView { title })) }
}

/// The demo application's route table.
fn demo_table() -> Result<RouteTable<DemoView>, String> {
    RouteTable::builder()
        .route("/", "home", || page("Home"))
        .route("/image-segmentation1", "imageSegment1", || {
            page("ImageSegmentation1")
        })
        .route("/image-segmentation2", "imageSegment2", || {
            page("ImageSegmentation2")
        })
        .route("/devide-to-pieces", "devideToPieces", || {
            page("DevideToPieces")
        })
        .route("/face-landmarks", "faceLandmarks", || {
            page("FaceLandmarksDetection")
        })
        .build()
        .map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
}

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Navigation shell for the segmentation demo pages", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the deployment base path (e.g. "/app/").
    #[arg(short, long)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared routes and their load state
    Routes {
        /// Emit JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },
    /// Resolve a path against the route table
    Resolve { path: String },
    /// Navigate to routes by name, loading each view on first visit
    Navigate { names: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    init_logging(&config.observability);

    let base = cli
        .base
        .or_else(|| std::env::var("APP_BASE_PATH").ok())
        .unwrap_or_else(|| config.deployment.base_path.clone());

    let table = demo_table()?;
    let router = Router::with_base(table, &base)?;

    tracing::info!(
        base = %router.base(),
        routes = router.table().len(),
        "router ready"
    );

    match cli.command {
        Commands::Routes { json } => {
            if json {
                let routes: Vec<serde_json::Value> = router
                    .table()
                    .iter()
                    .map(|route| {
                        serde_json::json!({
                            "path": route.path(),
                            "name": route.name(),
                            "href": router.href(route.name()).ok(),
                            "state": format!("{:?}", route.view().state()),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                for route in router.table().iter() {
                    println!(
                        "{:<24} {:<18} {:?}",
                        route.path(),
                        route.name(),
                        route.view().state()
                    );
                }
            }
        }
        Commands::Resolve { path } => match router.resolve(&path) {
            Resolution::Match(route) => {
                println!("{} -> {}", route.path(), route.name());
            }
            Resolution::NotFound { full_path } => {
                println!("{} -> no match", full_path);
            }
        },
        Commands::Navigate { names } => {
            for name in &names {
                match router.navigate_by_name(name).await? {
                    NavigationOutcome::Activated(active) => {
                        println!("{} [{}] {}", active.full_path, active.name, active.view.title);
                    }
                    NavigationOutcome::Blank { full_path } => {
                        println!("{} -> blank", full_path);
                    }
                    NavigationOutcome::Superseded => {
                        println!("{} -> superseded", name);
                    }
                }
            }
        }
    }

    Ok(())
}
