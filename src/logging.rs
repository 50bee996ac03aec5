use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "flowstore=info,tower_http=info";

/// `FLOWSTORE_LOG` wins over `RUST_LOG`; `FLOWSTORE_LOG_TARGET=0` drops event targets.
pub fn init() {
    let filter = EnvFilter::try_from_env("FLOWSTORE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().json().with_target(show_target());
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn show_target() -> bool {
    target_flag(std::env::var("FLOWSTORE_LOG_TARGET").ok().as_deref())
}

fn target_flag(raw: Option<&str>) -> bool {
    !matches!(raw.map(str::trim), Some("0" | "false" | "off" | "no"))
}
