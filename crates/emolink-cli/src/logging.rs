use tracing_subscriber::EnvFilter;

/// Env var holding a `tracing` filter directive for CLI diagnostics.
pub const LOG_ENV: &str = "EMOLINK_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

fn directive(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => DEFAULT_DIRECTIVE,
    }
}

/// Install a stderr subscriber. Quiet unless `EMOLINK_LOG` asks for more,
/// e.g. `EMOLINK_LOG=debug` to see why a link was rejected.
pub fn init_logging(raw: Option<&str>) {
    let filter = EnvFilter::try_new(directive(raw))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults_to_warn() {
        assert_eq!(directive(None), "warn");
        assert_eq!(directive(Some("  ")), "warn");
        assert_eq!(directive(Some("debug")), "debug");
        assert_eq!(directive(Some("emolink_core=trace")), "emolink_core=trace");
    }
}
