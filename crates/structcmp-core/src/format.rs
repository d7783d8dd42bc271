//! Flat rendering of a difference tree for failure reports.

use crate::difference::{Difference, DifferenceKind};

/// Renders a difference tree as one line per terminal mismatch.
///
/// Each line names the dotted path (`top level` for the comparison
/// root), the expected and actual values, and the mismatch message.
/// Unordered-collection nodes render the differences of their best-match
/// assignment. The tree is finite by construction, so the walk always
/// terminates.
pub fn format_difference(difference: &Difference) -> String {
    let mut out = String::new();
    render(difference, &mut out);
    out
}

fn render(difference: &Difference, out: &mut String) {
    if let DifferenceKind::UnorderedCollection(detail) = difference.kind() {
        render_line(difference, out);
        for (_, slot) in detail.iter() {
            if let Some(inner) = &slot.difference {
                render(inner, out);
            }
        }
        return;
    }

    if difference.is_leaf() {
        render_line(difference, out);
        return;
    }
    for child in difference.children().values() {
        render(child, out);
    }
}

fn render_line(difference: &Difference, out: &mut String) {
    let path = difference.path_string();
    let location = if path.is_empty() {
        "top level".to_owned()
    } else {
        path
    };
    out.push_str(&format!(
        "{location}: expected {}, actual {} ({})\n",
        difference.left(),
        difference.right(),
        difference.message()
    ));
}
