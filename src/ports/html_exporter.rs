//! HTML Report Exporter
//!
//! Renders a report as a single self-contained page: a nested list mirroring
//! the call tree, a caret toggle per subtree, and a numeric threshold filter
//! that hides nodes below the entered percentage. Every subtree starts
//! collapsed; only the root row is visible until toggled.
//!
//! Labels arrive from the report layer already escaped and truncated; this
//! module never escapes or re-escapes anything.

use crate::domain::report::{Report, ReportNode};
use crate::ports::ReportExporter;

pub struct HtmlExporter;

impl ReportExporter for HtmlExporter {
    fn export(&self, report: &Report, path: &str) -> std::io::Result<()> {
        std::fs::write(path, Self::to_html(report))
    }
}

impl HtmlExporter {
    /// Convert a report to a standalone HTML document.
    pub fn to_html(report: &Report) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("<!DOCTYPE html>".to_string());
        lines.push("<html>".to_string());
        lines.push("<head>".to_string());
        lines.push("<meta charset=\"utf-8\">".to_string());
        lines.push("<title>stackfold report</title>".to_string());
        lines.push(STYLE.to_string());
        lines.push("</head>".to_string());
        lines.push("<body>".to_string());

        lines.push("<div class=\"summary\">".to_string());
        lines.push(format!(
            "<strong>Number of samples: {}</strong><br>",
            report.total_traces
        ));
        lines.push(format!(
            "<strong>Total running time: {} seconds</strong><br><br>",
            report.running_time_secs
        ));
        lines.push("<label for=\"threshold\">Threshold percentage:</label>".to_string());
        lines.push(
            "<input type=\"number\" id=\"threshold\" min=\"0\" max=\"100\" \
             placeholder=\"Enter threshold percentage\">"
                .to_string(),
        );
        lines.push("<button onclick=\"filterTree()\">Apply</button>".to_string());
        lines.push("</div>".to_string());

        match &report.root {
            Some(root) => {
                lines.push("<ul id=\"tree\">".to_string());
                let mut body = String::new();
                Self::node_html(root, &mut body);
                lines.push(body);
                lines.push("</ul>".to_string());
            }
            None => {
                lines.push("<p class=\"no-data\">No samples found in the log.</p>".to_string());
            }
        }

        lines.push(SCRIPT.to_string());
        lines.push("</body>".to_string());
        lines.push("</html>".to_string());

        lines.join("\n")
    }

    fn node_html(node: &ReportNode, out: &mut String) {
        let label = format!(
            "<span class=\"function-label\" title=\"{}\">{}</span> ({:.2}%)",
            node.full_label, node.label, node.percentage
        );
        if node.children.is_empty() {
            out.push_str(&format!(
                "<li data-percentage=\"{}\">{}</li>\n",
                node.percentage, label
            ));
        } else {
            out.push_str(&format!(
                "<li data-percentage=\"{}\"><span class=\"caret\">{}</span><ul class=\"nested\">\n",
                node.percentage, label
            ));
            for child in &node.children {
                Self::node_html(child, out);
            }
            out.push_str("</ul></li>\n");
        }
    }
}

const STYLE: &str = r#"<style>
#tree { list-style-type: none; padding-left: 0; }
.summary { margin-bottom: 20px; text-align: center; }
.nested { display: none; padding-left: 20px; position: relative; }
.active { display: block; }
.caret { cursor: pointer; user-select: none; display: flex; align-items: center; }
.caret::before { content: "\25B6"; color: black; display: inline-block; margin-right: 6px; }
.caret-down::before { transform: rotate(90deg); }
.function-label { display: inline-block; white-space: nowrap; padding-left: 5px; }
.nested::before { content: ""; position: absolute; left: -20px; top: 0; bottom: 0; border-left: 2px solid #ccc; }
.no-data { text-align: center; color: #666; }
</style>"#;

const SCRIPT: &str = r#"<script>
document.addEventListener('DOMContentLoaded', function() {
    const toggler = document.getElementsByClassName("caret");
    for (let i = 0; i < toggler.length; i++) {
        toggler[i].addEventListener("click", function() {
            this.parentElement.querySelector(".nested").classList.toggle("active");
            this.classList.toggle("caret-down");
        });
    }
});

function filterTree() {
    const threshold = parseFloat(document.getElementById('threshold').value);
    const nodes = document.querySelectorAll('li[data-percentage]');
    nodes.forEach(node => {
        const percentage = parseFloat(node.getAttribute('data-percentage'));
        if (percentage < threshold) {
            node.style.display = 'none';
        } else {
            node.style.display = 'block';
        }
    });
}
</script>"#;
