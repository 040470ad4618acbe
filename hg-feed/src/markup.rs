//! Commit list extraction from entry descriptions.
//!
//! Dashboard entries describe a push as an HTML list, one `<li>` per commit,
//! each item reading `<changeset> - <message>`.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// Separator between the changeset label and the commit message.
pub const COMMIT_SEPARATOR: &str = " - ";

/// Collect the text of every `<li>` in `html`, in document order.
///
/// The walk is pre-order over the whole tree, so a list item nested inside
/// another is recorded after its parent. Each item contributes the text of
/// its first child only; items without children are skipped.
pub fn extract_commits(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut commits = Vec::new();

    for node in fragment.tree.root().descendants() {
        let is_list_item = node
            .value()
            .as_element()
            .is_some_and(|element| element.name() == "li");
        if !is_list_item {
            continue;
        }

        let Some(first) = node.first_child() else {
            debug!("Skipping empty list item");
            continue;
        };

        let text = if let Some(text) = first.value().as_text() {
            String::from(&**text)
        } else if let Some(element) = ElementRef::wrap(first) {
            element.text().collect::<String>()
        } else {
            String::new()
        };

        commits.push(text.trim().to_string());
    }

    commits
}

/// The part of a raw commit line shown to the user.
///
/// Everything after the first [`COMMIT_SEPARATOR`]; a line without the
/// separator is returned unchanged.
pub fn commit_summary(line: &str) -> &str {
    match line.split_once(COMMIT_SEPARATOR) {
        Some((_, summary)) => summary.trim(),
        None => {
            warn!("Commit line without \"{}\" separator: {:?}", COMMIT_SEPARATOR, line);
            line
        }
    }
}
