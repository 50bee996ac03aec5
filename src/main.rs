mod config;
mod cors;
mod errors;
mod handlers;
mod logging;
mod resolver;
mod server;
mod tree;


use crate::config::Config;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = "flowstore.toml";

#[derive(Parser, Debug)]
#[command(name = "flowstore")]
#[command(about = "File-backed storage service for flowchart diagrams")]
#[command(version)]
struct Cli {
    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "FLOWSTORE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding all stored diagrams
    #[arg(long, env = "FLOWSTORE_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "FLOWSTORE_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "FLOWSTORE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            Config::load(Path::new(DEFAULT_CONFIG)).context("loading config")?
        }
        None => Config::default(),
    };
    if let Some(dir) = cli.storage_dir {
        cfg.storage.root_dir = dir;
    }
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    cfg.validate().context("validating config")?;

    let root = config::prepare_storage_root(&cfg.storage.root_dir).context("preparing storage root")?;
    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    let base_path = cfg.server.base_path.clone();
    let state = server::AppState::new(cfg, root.clone())?;

    info!(addr = %addr, base_path = %base_path, root = %root.display(), "flowstore ready");
    println!(
        "flowstore ready addr=http://{} base_path={} root={} pid={} version={}",
        addr,
        base_path,
        root.display(),
        std::process::id(),
        env!("CARGO_PKG_VERSION")
    );

    server::serve(state).await
}
