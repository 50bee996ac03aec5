use crate::{
    config::Config,
    cors::CorsPolicy,
    handlers,
    resolver::PathResolver,
    tree::TreeBuilder,
};
use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, MethodRouter},
    Router,
};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub resolver: Arc<PathResolver>,
    pub tree: Arc<TreeBuilder>,
    pub cors: Arc<CorsPolicy>,
}

impl AppState {
    /// `root` is the prepared, absolute storage root.
    pub fn new(cfg: Config, root: PathBuf) -> anyhow::Result<Self> {
        let resolver = PathResolver::new(root.clone(), &cfg.server.base_path);
        let tree = TreeBuilder::new(root, cfg.limits.max_tree_depth);
        let cors = CorsPolicy::from_config(&cfg.cors).context("building cors headers")?;
        Ok(Self {
            cfg: Arc::new(cfg),
            resolver: Arc::new(resolver),
            tree: Arc::new(tree),
            cors: Arc::new(cors),
        })
    }
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.cfg.server.bind_addr, state.cfg.server.port);
    let addr: std::net::SocketAddr = addr.parse().with_context(|| format!("invalid address {addr}"))?;

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running server")?;
    info!("server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let base = state.cfg.server.base_path.clone();
    let limit_bytes = state.cfg.limits.max_request_kb * 1024;

    let store: MethodRouter<AppState> = get(handlers::read::read)
        .post(handlers::write::write)
        .put(handlers::write::write)
        .delete(handlers::delete::delete)
        .fallback(handlers::method_not_allowed)
        .layer::<_, std::convert::Infallible>(RequestBodyLimitLayer::new(limit_bytes))
        .layer(DefaultBodyLimit::disable());

    let router = Router::new()
        .route(&base, store.clone())
        .route(&format!("{base}/"), store.clone())
        .route(&format!("{base}/*rest"), store)
        .fallback(handlers::not_found);

    let router = state.cors.apply(router);
    router
        .layer(middleware::from_fn(audit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn audit(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "audit"
    );
    resp
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
