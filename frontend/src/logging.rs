use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "leavedesk_frontend=debug,info"
    } else {
        "leavedesk_frontend=info,warn"
    }
}

/// `RUST_LOG` wins over the verbosity flag when it is set. Output goes to
/// stderr so command results on stdout stay clean.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_switches_crate_to_debug() {
        assert!(default_directive(true).starts_with("leavedesk_frontend=debug"));
        assert!(default_directive(false).starts_with("leavedesk_frontend=info"));
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
