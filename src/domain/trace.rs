//! Trace splitting and recursion collapsing.
//!
//! A raw log holds many captures back to back. Frame lines start with `#`;
//! any other line (blank, thread banner, separator) ends the capture in
//! progress. Debuggers print frames innermost first, so each finished trace
//! is reversed into call order before anything downstream sees it.

/// Split a raw log into traces, each an outermost-call-first list of raw
/// frame lines.
pub fn split_traces(log: &str) -> Vec<Vec<&str>> {
    let mut traces = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in log.split('\n') {
        if line.starts_with('#') {
            current.push(line);
        } else if !current.is_empty() {
            current.reverse();
            traces.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        current.reverse();
        traces.push(current);
    }
    traces
}

/// Collapse immediate self-recursion: drop every signature equal to its
/// predecessor. Non-adjacent repeats (`a b a`) are kept.
pub fn collapse_recursion(mut calls: Vec<String>) -> Vec<String> {
    calls.dedup();
    calls
}
