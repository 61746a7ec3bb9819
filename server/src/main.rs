use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod handlers;

use crate::handlers::index_handler;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html, the wasm bundle and /images.
    #[arg(long)]
    public_dir: Option<PathBuf>,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public")
}

fn router(public_dir: PathBuf) -> Router {
    let index_file = public_dir.join("index.html");
    let assets = ServeDir::new(public_dir).fallback(get(index_handler));
    Router::new()
        .route("/", get(index_handler))
        .fallback_service(assets)
        .layer(axum::Extension(index_file))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dresstour_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let public_dir = args.public_dir.unwrap_or_else(default_public_dir);
    if !public_dir.join("index.html").is_file() {
        tracing::warn!("no index.html under {}", public_dir.display());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("failed to bind {addr}: {error}");
            std::process::exit(1);
        }
    };
    tracing::info!("dress tour running at http://localhost:{}", args.port);
    if let Err(error) = axum::serve(listener, router(public_dir)).await {
        tracing::error!("server stopped: {error}");
    }
}
