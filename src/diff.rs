use console::style;
use similar::{ChangeTag, TextDiff};

const CONTEXT_LINES: usize = 2;

/// Renders a colorized line diff of a migrated file, used for `--dry-run` previews.
pub fn generate_diff(old: &str, new: &str) -> String {
    if old == new {
        return "No changes detected.".to_string();
    }

    let diff = TextDiff::from_lines(old, new);
    let mut diff_lines = Vec::new();

    for (hunk_idx, group) in diff.grouped_ops(CONTEXT_LINES).iter().enumerate() {
        if hunk_idx > 0 {
            diff_lines.push("...".to_string());
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let text = change.value().trim_end_matches(['\r', '\n']);
                let line_number = change
                    .new_index()
                    .or(change.old_index())
                    .map_or(0, |idx| idx + 1);
                match change.tag() {
                    ChangeTag::Delete => diff_lines
                        .push(style(format!("- {line_number:>4}: {text}")).red().to_string()),
                    ChangeTag::Insert => diff_lines
                        .push(style(format!("+ {line_number:>4}: {text}")).green().to_string()),
                    ChangeTag::Equal => diff_lines.push(format!("  {line_number:>4}: {text}")),
                }
            }
        }
    }

    diff_lines.join("\n")
}
