//! Logging facilities for Tabula.
//!
//! Tabula uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; applications choose their own:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("tabula=debug,tabula_net=info")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted under one of the fixed [`targets`], so a single
//! subsystem can be enabled in isolation.

/// Span names used throughout Tabula for tracing.
pub mod span_names {
    /// List pipeline recompute (filter, sort, paginate).
    pub const RECOMPUTE: &str = "tabula::recompute";
    /// Remote list fetch.
    pub const FETCH: &str = "tabula::fetch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "tabula_core";
    /// Timer bookkeeping target.
    pub const TIMER: &str = "tabula_core::timer";
    /// Debouncer target.
    pub const DEBOUNCE: &str = "tabula_core::debounce";
    /// Signal target.
    pub const SIGNAL: &str = "tabula_core::signal";
    /// REST client target.
    pub const REST_API: &str = "tabula_net::rest_api";
    /// Local list pipeline target.
    pub const MODEL: &str = "tabula::model";
    /// Remote list controller target.
    pub const REMOTE_LIST: &str = "tabula::remote_list";
    /// UI and preference store target.
    pub const STORE: &str = "tabula::store";
    /// Form validation target.
    pub const FORM: &str = "tabula::form";
    /// Page controllers target.
    pub const PAGES: &str = "tabula::pages";
}

/// The `info` span under the `tabula::perf` target for `name`.
///
/// Unlike [`PerfSpan`] it is not entered, so it can wrap a future with
/// [`tracing::Instrument`].
pub fn perf_span(name: &'static str) -> tracing::Span {
    tracing::info_span!(target: "tabula::perf", "perf", operation = name)
}

/// Performance tracing span guard.
///
/// Creates an `info` span under the `tabula::perf` target that stays entered
/// until the guard is dropped.
///
/// ```
/// use tabula_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("recompute");
///     // timed work
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        Self {
            span: perf_span(name).entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}
