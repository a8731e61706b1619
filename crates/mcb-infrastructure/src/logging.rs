//! Installs the real `tracing` pipeline and registers the domain crate's
//! log dispatch facade (§10.1) so `mcb_domain::{trace,debug,info,warn,error}!`
//! reach actual output instead of being silently dropped.
//!
//! Call [`init`] once, near process start, before any domain/application
//! code logs anything. A second call is a harmless no-op (the underlying
//! `tracing_subscriber` global default and the domain's `OnceLock` both
//! only accept the first write).

use mcb_domain::ports::LogLevel;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Install a `tracing-subscriber` `fmt` layer driven by `RUST_LOG` (falling
/// back to [`DEFAULT_FILTER`]) and register [`dispatch`] as the domain's
/// log function.
///
/// Idempotent: a repeated call (e.g. from multiple test harnesses in the
/// same process) does not panic.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    mcb_domain::infra::logging::set_log_fn(dispatch);
}

/// Forwards a domain log-facade event to the matching `tracing` macro.
/// Registered once via [`init`]; see [`mcb_domain::infra::logging::LogFn`].
fn dispatch(level: LogLevel, context: &str, message: &str, detail: Option<&dyn std::fmt::Display>) {
    match (level, detail) {
        (LogLevel::Error, Some(d)) => tracing::error!(context, detail = %d, "{message}"),
        (LogLevel::Error, None) => tracing::error!(context, "{message}"),
        (LogLevel::Warn, Some(d)) => tracing::warn!(context, detail = %d, "{message}"),
        (LogLevel::Warn, None) => tracing::warn!(context, "{message}"),
        (LogLevel::Info, Some(d)) => tracing::info!(context, detail = %d, "{message}"),
        (LogLevel::Info, None) => tracing::info!(context, "{message}"),
        (LogLevel::Debug, Some(d)) => tracing::debug!(context, detail = %d, "{message}"),
        (LogLevel::Debug, None) => tracing::debug!(context, "{message}"),
        (LogLevel::Trace, Some(d)) => tracing::trace!(context, detail = %d, "{message}"),
        (LogLevel::Trace, None) => tracing::trace!(context, "{message}"),
    }
}
