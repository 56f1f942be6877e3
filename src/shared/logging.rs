//! Logging context.
//!
//! The subscriber is installed once by the binary; library components never
//! touch global logger state. Instead each component is handed a [`Logger`]
//! at construction time and records its events inside that logger's span,
//! so every line carries the component name it came from.

use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive (e.g. `debug`, `depsight=trace`)
pub const LOG_ENV_VAR: &str = "DEPSIGHT_LOG";

/// Level used when neither the flag, the environment nor the config set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// A span bound to a component name.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    /// Root logger for one CLI invocation.
    pub fn root(command: &str) -> Self {
        Self {
            span: tracing::info_span!("depsight", command = command),
        }
    }

    /// A logger that records nothing, for tests and library callers that
    /// don't care about diagnostics.
    pub fn disabled() -> Self {
        Self {
            span: Span::none(),
        }
    }

    /// Child logger bound to `component`.
    pub fn child(&self, component: &'static str) -> Self {
        Self {
            span: tracing::info_span!(parent: &self.span, "component", name = component),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Runs `f` with this logger's span entered.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }
}

/// Resolves the filter directive: explicit flag, then `DEPSIGHT_LOG`, then
/// the config file, then [`DEFAULT_LOG_LEVEL`].
pub fn resolve_filter(flag: Option<&str>, config: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV_VAR).ok().filter(|v| !v.trim().is_empty()))
        .or_else(|| config.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Installs the process-wide subscriber writing to stderr.
///
/// Stdout is reserved for the JSON report, so all diagnostics go to stderr.
/// Calling this twice is harmless: the second install is ignored.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
