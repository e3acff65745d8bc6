use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Keeps the background trace writer alive. Buffered events are flushed when
/// it is dropped, so hold it until the process is about to exit.
#[must_use = "dropping the guard stops trace output"]
#[derive(Default)]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Write JSON-lines traces to `log_dir/singlish-trace.jsonl`.
///
/// Only the first call installs a subscriber; later calls return an empty
/// guard. Without the `trace` feature this does nothing.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceGuard {
    let mut worker = None;
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, "singlish-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        worker = Some(guard);

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("singlish_engine=debug")),
            )
            .init();
    });
    TraceGuard { _worker: worker }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> TraceGuard {
    TraceGuard::default()
}
