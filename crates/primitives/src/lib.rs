//! Core value types shared by the inline diagnostics workspace.

/// Raw diagnostics as delivered by the host.
pub mod diagnostic;
/// Grapheme-aware text measurement and truncation.
pub mod graphemes;
/// Identifier types for host entities.
pub mod ids;
/// Line/character positions and LSP interop.
pub mod lsp;
/// Diagnostic severity and its ranking.
pub mod severity;

pub use diagnostic::RawDiagnostic;
pub use ids::{DocumentId, EditorId, StyleHandle};
pub use lsp::LinePosition;
pub use severity::Severity;
