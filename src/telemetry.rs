use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "internhub=debug,reqwest=info";

/// Installs the global subscriber. `RUST_LOG` picks the filter and
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() -> anyhow::Result<()> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_new(env_filter)?;
    let result = if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };
    result.map_err(|e| anyhow::anyhow!(e.to_string()))
}
