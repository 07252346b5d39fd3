//! Log filter selection for the server binary.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "shop_demo=info";

/// Filter from a `RUST_LOG` value, or `shop_demo=info` when it is unset or unparsable.
/// A valid value is used as given, so `RUST_LOG=shop_demo=debug` takes effect.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_is_not_overridden() {
        let filter = log_filter(Some("shop_demo=debug")).to_string();
        assert!(filter.contains("shop_demo=debug"), "{filter}");
        assert!(!filter.contains("shop_demo=info"), "{filter}");
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter(Some("")).to_string(), DEFAULT_LOG_FILTER);
    }
}
