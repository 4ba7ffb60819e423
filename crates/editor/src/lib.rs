#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Inline diagnostics engine.
//!
//! Renders a compact dot summary at the end of every line that has
//! diagnostics and the full message on the cursor line. The editor itself is
//! reached only through [`EditorHost`]; this crate decides what to paint and
//! when.
//!
//! # Main Types
//!
//! - [`Coordinator`] - owns all state and reacts to host [`Event`]s
//! - [`DiagnosticAnalyzer`] - groups diagnostics per line and formats them
//! - [`Settings`] - immutable settings snapshot
//!
//! # Data flow
//!
//! ```text
//! host event ─► Coordinator ─► DiagnosticAnalyzer ─► DiagnosticStore
//!                   │                                      │
//!                   └── Debounce ─► RenderDue ─► RenderPlan ┴► EditorHost
//! ```

/// Settings snapshot, parsing, and store.
pub mod config;
/// Event loop and commands.
pub mod coordinator;
/// Per-line aggregation and message formatting.
pub mod diagnostics;
/// Error types.
pub mod error;
/// Host boundary.
pub mod host;
#[cfg(feature = "lsp")]
pub mod lsp;
pub mod metrics;
/// Decoration planning and painting.
pub mod render;
/// Style handle allocation.
pub mod styles;

pub use config::{ConfigChange, ConfigStore, Settings};
pub use coordinator::{Coordinator, Event, RenderOutcome, RenderState};
pub use diagnostics::{DiagnosticAnalyzer, DiagnosticStore, DiagnosticsUpdate, LineSummary, LineSummaryMap};
pub use error::{CommandError, CommandResult, ConfigError, HostError};
pub use glint_primitives::{DocumentId, EditorId, LinePosition, RawDiagnostic, Severity, StyleHandle};
pub use host::{ActiveEditor, Decoration, EditorHost, NoticeLevel};
#[cfg(feature = "lsp")]
pub use lsp::LspDiagnostics;
pub use metrics::CoordinatorMetrics;
pub use styles::{DecorationKind, RenderSpec};
