//! Frame normalization.
//!
//! Turns one raw backtrace line into a canonical call signature. The expected
//! line shape is what debuggers print for a stack frame:
//!
//! `#<index> 0x<address> in <qualified_name> [arguments...]`
//!
//! Anything else is not a frame and yields `None`; callers treat that as a
//! line to skip, not as an error.

/// Parse one raw trace line into a call signature.
///
/// The signature is `name arguments` when trailing text is present and
/// `name ()` otherwise, truncated at the first `()` inclusive. A signature
/// whose body never contains `()` is left as constructed.
pub fn normalize_frame(line: &str) -> Option<String> {
    let rest = line.strip_prefix('#')?;
    let rest = eat1(rest, |c| c.is_ascii_digit())?;
    let rest = eat1(rest, char::is_whitespace)?;
    let rest = rest.strip_prefix("0x")?;
    let rest = eat1(rest, |c| c.is_ascii_hexdigit())?;
    let rest = eat1(rest, char::is_whitespace)?;
    let rest = rest.strip_prefix("in")?;
    let rest = eat1(rest, char::is_whitespace)?;
    let (name, rest) = take_qualified_name(rest)?;

    let arguments = rest.trim();
    let call = if arguments.is_empty() {
        format!("{} ()", name)
    } else {
        format!("{} {}", name, arguments)
    };
    Some(truncate_at_unit_parens(call))
}

/// Consume at least one character matching `pred`, returning the remainder.
fn eat1(input: &str, pred: impl Fn(char) -> bool) -> Option<&str> {
    let rest = input.trim_start_matches(&pred);
    if rest.len() == input.len() {
        None
    } else {
        Some(rest)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Take a function name: word characters, optionally qualified by segments
/// joined with one or two colons (`ns::f`, `label:f`). Colons not followed
/// by a word character are left in the remainder.
fn take_qualified_name(input: &str) -> Option<(&str, &str)> {
    let mut end = word_run_end(input, 0)?;
    loop {
        let rest = &input[end..];
        let colons = if rest.starts_with("::") {
            2
        } else if rest.starts_with(':') {
            1
        } else {
            break;
        };
        match word_run_end(input, end + colons) {
            Some(next) => end = next,
            None => break,
        }
    }
    Some((&input[..end], &input[end..]))
}

/// Byte offset just past the run of word characters starting at `from`,
/// or `None` if the run is empty.
fn word_run_end(input: &str, from: usize) -> Option<usize> {
    let run = input[from..]
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(input.len() - from, |(i, _)| i);
    if run == 0 {
        None
    } else {
        Some(from + run)
    }
}

/// Cut everything after the first `()`, keeping the `()` itself.
fn truncate_at_unit_parens(mut call: String) -> String {
    if let Some(idx) = call.find("()") {
        call.truncate(idx + 2);
    }
    call
}
