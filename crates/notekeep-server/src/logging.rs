use crate::config::AppEnv;
use tracing_subscriber::EnvFilter;

/// Default filter directive for an environment when `RUST_LOG` is unset
pub fn default_directive(env: AppEnv) -> &'static str {
    match env {
        AppEnv::Local | AppEnv::Dev => "debug",
        AppEnv::Prod => "info",
    }
}

/// Install the global tracing subscriber.
///
/// Local runs get human-readable output; dev and prod emit JSON lines.
pub fn init_tracing(env: AppEnv) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(env)));

    match env {
        AppEnv::Local => tracing_subscriber::fmt().with_env_filter(filter).init(),
        AppEnv::Dev | AppEnv::Prod => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
