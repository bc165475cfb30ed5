//! Presentation model for a finished call tree.
//!
//! The report is what exporters consume: labels already escaped and
//! truncated, percentages computed against the root, children sorted for
//! display. A tree with zero traces produces a report with no root node so
//! no exporter ever divides by zero.

use serde::Serialize;

use crate::domain::calltree::{CallTree, NodeId, ROOT};

/// Display labels longer than this many characters are cut and ellipsized.
pub const MAX_LABEL_CHARS: usize = 70;

/// Synthetic seconds per sample, a display heuristic only. Nothing here
/// measures wall-clock time.
const SECONDS_PER_SAMPLE: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ReportNode {
    /// Escaped, possibly truncated display label.
    pub label: String,
    /// Escaped label without truncation, for tooltips.
    pub full_label: String,
    /// Share of all traces passing through this node, 0..=100.
    pub percentage: f64,
    pub samples: u64,
    /// Sorted by descending sample count; ties keep creation order.
    pub children: Vec<ReportNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_traces: u64,
    pub running_time_secs: u64,
    /// `None` when the log held no usable traces.
    pub root: Option<ReportNode>,
}

/// Build the presentation model for a finished tree.
pub fn build_report(tree: &CallTree) -> Report {
    let total = tree.root().sample_count;
    Report {
        total_traces: total,
        running_time_secs: total * SECONDS_PER_SAMPLE,
        root: (total > 0).then(|| node_report(tree, ROOT, total)),
    }
}

fn node_report(tree: &CallTree, id: NodeId, total: u64) -> ReportNode {
    let node = tree.node(id);
    let full_label = escape_html(&node.signature);

    let mut child_ids = node.children.clone();
    // Stable sort, so equal counts stay in creation order.
    child_ids.sort_by(|a, b| tree.node(*b).sample_count.cmp(&tree.node(*a).sample_count));

    ReportNode {
        label: truncate_label(&full_label),
        percentage: node.sample_count as f64 / total as f64 * 100.0,
        samples: node.sample_count,
        children: child_ids
            .into_iter()
            .map(|child| node_report(tree, child, total))
            .collect(),
        full_label,
    }
}

/// Escape the HTML-special characters `& < > " '`.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate an escaped label to [`MAX_LABEL_CHARS`] characters plus an
/// ellipsis marker. Counts code points, matching how the threshold was
/// originally defined.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let mut cut: String = label.chars().take(MAX_LABEL_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        label.to_string()
    }
}
