//! Human-readable rendering of a resolved source context.

use crate::types::SourceContext;

/// Marker appended to the line the error position points at.
const ERROR_ARROW: &str = "<------";

/// Feed the rendered block to a line-consuming sink, one line per call.
///
/// Emits a blank line, the resolved file path under its header, a blank
/// line, then the numbered snippet lines under their header — the line
/// matching the error position gets the trailing arrow marker — and a final
/// blank line. Purely a formatting side effect; nothing is returned.
pub fn present<F: FnMut(&str)>(context: &SourceContext, mut sink: F) {
    sink("");
    sink("Source code file path:");
    sink(&format!("  {}", context.source_path));
    sink("");
    sink("Source code snippets:");

    for line in &context.lines {
        let mut rendered = format!("  {}  {}", line.number, line.text);
        if line.number == context.position.line {
            rendered.push_str(&format!(
                "   {ERROR_ARROW} Error({}:{})",
                context.position.line, context.position.column
            ));
        }
        sink(&rendered);
    }

    sink("");
}

#[cfg(test)]
mod tests {
    use super::present;
    use crate::types::{Position, SourceContext, SourceLine};

    fn context() -> SourceContext {
        SourceContext {
            lines: (3..=6)
                .map(|n| SourceLine {
                    number: n,
                    text: format!("line {n}"),
                })
                .collect(),
            position: Position::new(5, 12),
            source_path: "src/a.ts".to_string(),
        }
    }

    fn collect(context: &SourceContext) -> Vec<String> {
        let mut lines = Vec::new();
        present(context, |line| lines.push(line.to_string()));
        lines
    }

    #[test]
    fn marks_exactly_the_error_line() {
        let lines = collect(&context());
        let marked: Vec<&String> = lines.iter().filter(|l| l.contains("<------")).collect();
        assert_eq!(marked.len(), 1);
        let only = marked.first().unwrap();
        assert!(only.starts_with("  5  line 5"));
        assert!(only.ends_with("<------ Error(5:12)"));
    }

    #[test]
    fn unmarked_lines_have_no_suffix() {
        let lines = collect(&context());
        for number in [3u32, 4, 6] {
            let line = lines
                .iter()
                .find(|l| l.starts_with(&format!("  {number}  ")))
                .unwrap();
            assert_eq!(line, &format!("  {number}  line {number}"));
        }
    }

    #[test]
    fn block_layout_matches_expectation() {
        let expected = vec![
            "",
            "Source code file path:",
            "  src/a.ts",
            "",
            "Source code snippets:",
            "  3  line 3",
            "  4  line 4",
            "  5  line 5   <------ Error(5:12)",
            "  6  line 6",
            "",
        ];
        assert_eq!(collect(&context()), expected);
    }

    #[test]
    fn no_marker_when_target_outside_window() {
        let mut ctx = context();
        ctx.position = Position::new(9, 0);
        assert!(!collect(&ctx).iter().any(|l| l.contains("<------")));
    }
}
