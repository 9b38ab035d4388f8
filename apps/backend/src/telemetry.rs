use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,reqwest=warn";

/// Install a JSON tracing subscriber for embedding applications.
///
/// `RUST_LOG` overrides the default `info,reqwest=warn` filter. Returns
/// `false` when a global subscriber was already installed, in which case
/// the call changes nothing.
pub fn init_tracing() -> bool {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tracing::level_filters::LevelFilter;

    use super::*;

    struct RustLogGuard(Option<String>);

    impl RustLogGuard {
        fn set(value: Option<&str>) -> Self {
            let prev = std::env::var("RUST_LOG").ok();
            match value {
                Some(v) => std::env::set_var("RUST_LOG", v),
                None => std::env::remove_var("RUST_LOG"),
            }
            Self(prev)
        }
    }

    impl Drop for RustLogGuard {
        fn drop(&mut self) {
            match self.0.take() {
                Some(v) => std::env::set_var("RUST_LOG", v),
                None => std::env::remove_var("RUST_LOG"),
            }
        }
    }

    #[test]
    #[serial]
    fn default_filter_is_info() {
        let _env = RustLogGuard::set(None);
        assert_eq!(env_filter().max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    #[serial]
    fn rust_log_overrides_default_filter() {
        let _env = RustLogGuard::set(Some("debug"));
        assert_eq!(env_filter().max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn init_is_a_noop_once_a_subscriber_is_installed() {
        crate::test_bootstrap::logging::init();

        assert!(!init_tracing());
        assert!(!init_tracing());
    }
}
