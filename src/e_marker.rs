use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment regex"));
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)@flow\b").expect("marker regex"));

/// Returns true when any block or line comment in `source` carries the
/// `@flow` token (case-insensitive), e.g. `/* @flow */`, `/** @flow weak */`
/// or `// @Flow`. A `//` right after `:` belongs to a URL (`http://...`) and
/// does not start a comment.
///
/// # Example
/// ```
/// use flow_e::has_flow_marker;
///
/// assert!(has_flow_marker("/* @flow */\nvar a = 1;"));
/// assert!(!has_flow_marker("var flow = '@flow';"));
/// assert!(!has_flow_marker("var url = 'https://cdn/@flow';"));
/// ```
pub fn has_flow_marker(source: &str) -> bool {
    let mut at = 0;
    while let Some(comment) = COMMENT.find_at(source, at) {
        let text = comment.as_str();
        if text.starts_with("//") && source[..comment.start()].ends_with(':') {
            at = comment.start() + 2;
            continue;
        }
        if MARKER.is_match(text) {
            return true;
        }
        at = comment.end();
    }
    false
}
