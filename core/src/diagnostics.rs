//! Collecting informational and warning messages produced while the pass runs.
//!
//! This pass has no token-range source map to annotate, so unlike a
//! frontend's diagnostics collector this one keys messages on
//! [`oraclex_ast::NodeId`] rather than a text range.

use oraclex_ast::NodeId;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DiagnosticMessage {
    severity: Severity,
    node: Option<NodeId>,
    message: String,
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Collection of diagnostic messages emitted by one pass run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Builder for a single diagnostic message, returned by [`Diagnostics::info`]/
/// [`Diagnostics::warning`]. Dropping it without calling `.emit()` discards
/// the message.
#[must_use = "diagnostic not recorded, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl Into<String>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage {
                severity: Severity::Info,
                node: None,
                message: msg.into(),
            },
        }
    }

    pub fn warning(&mut self, msg: impl Into<String>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage {
                severity: Severity::Warning,
                node: None,
                message: msg.into(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    pub fn at(mut self, node: NodeId) -> Self {
        self.message.node = Some(node);
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for message in &self.messages {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unemitted_builder_is_discarded() {
        let mut diags = Diagnostics::new();
        let _ = diags.info("not recorded");
        assert!(diags.is_empty());
    }

    #[test]
    fn emitted_message_is_counted() {
        let mut diags = Diagnostics::new();
        diags.warning("skipped contract").emit();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn extend_merges_two_collections() {
        let mut a = Diagnostics::new();
        a.info("first").emit();
        let mut b = Diagnostics::new();
        b.info("second").emit();
        a.extend(b);
        assert_eq!(a.len(), 2);
    }
}
