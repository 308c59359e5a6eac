use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str =
    "metrics_list=info,metrics_list_core=info,metrics_list_monitoring=info";

pub const VERBOSE_LOG_FILTER: &str =
    "metrics_list=debug,metrics_list_core=debug,metrics_list_monitoring=debug";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

/// `RUST_LOG` takes precedence over `default_filter`. Output goes to stderr
/// so stdout only ever carries the generated document.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();
}

pub fn init_verbose() {
    init_with_default(VERBOSE_LOG_FILTER);
}
