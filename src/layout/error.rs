//! Error types for script execution

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::ast::Span;

/// Errors that stop a script before or during its layout pass
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Reference to an undeclared view
    #[error("undefined view '{name}'")]
    UndefinedIdentifier {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// A view name declared twice
    #[error("view '{name}' is already declared")]
    DuplicateView { name: String, span: Span },

    /// A call that is not a pin operation
    #[error("unknown operation '{name}'")]
    UnknownOperation {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// An argument the operation cannot accept
    #[error("invalid argument for '{operation}': {reason}")]
    InvalidArgument {
        operation: String,
        reason: String,
        span: Span,
    },
}

impl LayoutError {
    /// Create an undefined identifier error with suggestions
    pub fn undefined(name: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UndefinedIdentifier {
            name: name.into(),
            span,
            suggestions,
        }
    }

    pub fn duplicate(name: impl Into<String>, span: Span) -> Self {
        Self::DuplicateView {
            name: name.into(),
            span,
        }
    }

    pub fn unknown_operation(name: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UnknownOperation {
            name: name.into(),
            span,
            suggestions,
        }
    }

    pub fn invalid_argument(operation: impl Into<String>, reason: impl Into<String>, span: Span) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            reason: reason.into(),
            span,
        }
    }

    /// Get the source span
    pub fn span(&self) -> &Span {
        match self {
            Self::UndefinedIdentifier { span, .. }
            | Self::DuplicateView { span, .. }
            | Self::UnknownOperation { span, .. }
            | Self::InvalidArgument { span, .. } => span,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedIdentifier { suggestions, .. }
            | Self::UnknownOperation { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let message = match self.suggestions() {
            Some(suggestions) if !suggestions.is_empty() => {
                format!("{}\ndid you mean: {}", self, suggestions.join(", "))
            }
            _ => self.to_string(),
        };
        let label = Label::new((filename, span.clone()))
            .with_message(message)
            .with_color(Color::Red);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(label)
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if written.is_err() {
            return format!("{}: {}", filename, self);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_identifier_display() {
        let err = LayoutError::undefined("titel", 0..5, vec!["title".to_string()]);
        assert_eq!(err.to_string(), "undefined view 'titel'");
        assert_eq!(err.suggestions(), Some(&["title".to_string()][..]));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = LayoutError::invalid_argument("width", "expected a number", 3..9);
        assert_eq!(err.to_string(), "invalid argument for 'width': expected a number");
        assert_eq!(err.span(), &(3..9));
        assert!(err.suggestions().is_none());
    }

    #[test]
    fn test_format_mentions_suggestion() {
        let source = "titel.left(10)";
        let err = LayoutError::undefined("titel", 0..5, vec!["title".to_string()]);
        let report = err.format(source, "demo.pin");
        assert!(report.contains("undefined view 'titel'"));
        assert!(report.contains("did you mean: title"));
    }
}
