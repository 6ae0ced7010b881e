//! Diagnostics for operations that could not be applied
//!
//! A diagnostic never interrupts a pin chain. It is formatted as
//! `"{context} won't be applied, {reason}"` where the context echoes the call
//! that was attempted, e.g. `below(of: [a, b], aligned: center)`.

/// Receiver of "won't be applied" messages. Reporting must not fail.
pub trait DiagnosticSink {
    fn report(&mut self, message: &str);
}

impl<F: FnMut(&str)> DiagnosticSink for F {
    fn report(&mut self, message: &str) {
        self(message)
    }
}

/// Keeps every reported message in order
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    messages: Vec<String>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

pub const REASON_NOT_VISIBLE: &str =
    "at least one view must be visible (hidden views are ignored)";
pub const REASON_NO_PARENT: &str = "the view must be added to a parent before being laid out";
pub const REASON_OTHER_HIERARCHY: &str =
    "the reference view must be in the same hierarchy as the laid out view";
pub const REASON_NOT_MEASURABLE: &str = "the view can't compute its content size";
pub const REASON_NO_CHILDREN: &str = "the view has no visible children to wrap";

/// Full message for an operation that was skipped
pub fn wont_be_applied(context: &str, reason: &str) -> String {
    format!("{} won't be applied, {}", context, reason)
}

/// Context of a relative positioning call
pub fn relative_context(operation: &str, refs: &[String], aligned: Option<&str>) -> String {
    let of = match refs {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    };
    match aligned {
        Some(aligned) => format!("{}(of: {}, aligned: {})", operation, of, aligned),
        None => format!("{}(of: {})", operation, of),
    }
}

/// Context of a call that takes a plain value, e.g. `width(80)`
pub fn value_context(operation: &str, value: impl std::fmt::Display) -> String {
    format!("{}({})", operation, value)
}

/// Context of a call pinning to another view, e.g. `top(to: a.bottom)`
pub fn target_context(operation: &str, view: &str, member: &str) -> String {
    format!("{}(to: {}.{})", operation, view, member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_context_single() {
        let ctx = relative_context("below", &["title".to_string()], None);
        assert_eq!(ctx, "below(of: title)");
    }

    #[test]
    fn test_relative_context_many_aligned() {
        let refs = vec!["a".to_string(), "b".to_string()];
        let ctx = relative_context("above", &refs, Some("center"));
        assert_eq!(ctx, "above(of: [a, b], aligned: center)");
    }

    #[test]
    fn test_relative_context_empty_list() {
        let ctx = relative_context("after", &[], Some("top"));
        assert_eq!(ctx, "after(of: [], aligned: top)");
    }

    #[test]
    fn test_wont_be_applied_message() {
        let msg = wont_be_applied(&value_context("width", 80.0), "left and right are pinned");
        insta::assert_snapshot!(msg, @"width(80) won't be applied, left and right are pinned");
    }

    #[test]
    fn test_target_context() {
        assert_eq!(target_context("top", "a", "bottom"), "top(to: a.bottom)");
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.report("one");
        sink.report("two");
        assert_eq!(sink.messages(), &["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = |_: &str| count += 1;
            sink.report("x");
            sink.report("y");
        }
        assert_eq!(count, 2);
    }
}
