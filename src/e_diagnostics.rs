//! Flow's `--json` diagnostic payload and the per-file fragment filter.
//!
//! Flow reports one error as a list of message fragments, and a single error
//! can mention several files: `"string" with` (a.js) followed by `"number"
//! found` (b.js). When checking one file we keep only the fragments that
//! belong to it, either directly or because an adjacent fragment ending in a
//! connector word ("with", "found", "in") ties them together.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Matches a fragment description that hands off to the next fragment.
/// A plain suffix match: "within" and "begin" count too.
static CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(with|found|in)$").expect("connector regex"));

/// One piece of a Flow error, tagged with the file it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMessage {
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub endline: u32,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
}

impl FlowMessage {
    /// Builds a fragment with only a path and description, which is all the
    /// filter looks at.
    pub fn new(path: impl Into<String>, descr: impl Into<String>) -> Self {
        FlowMessage {
            descr: descr.into(),
            path: path.into(),
            level: None,
            line: 0,
            endline: 0,
            start: 0,
            end: 0,
        }
    }

    pub fn ends_with_connector(&self) -> bool {
        CONNECTOR.is_match(&self.descr)
    }

    fn is_in(&self, target: &Path) -> bool {
        Path::new(&self.path) == target
    }
}

/// One reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDiagnostic {
    #[serde(default)]
    pub message: Vec<FlowMessage>,
}

/// Everything Flow reported for one `flow check` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    #[serde(default)]
    pub errors: Vec<FlowDiagnostic>,
}

impl DiagnosticReport {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decides whether the fragment at `index` belongs to `target`.
///
/// A fragment belongs when its own path is the target, when the previous
/// fragment ends in a connector word and sits in the target, or when this
/// fragment ends in a connector word and the next one sits in the target.
fn fragment_belongs(messages: &[FlowMessage], index: usize, target: &Path) -> bool {
    let message = &messages[index];
    if message.is_in(target) {
        return true;
    }

    let continues_previous = index
        .checked_sub(1)
        .and_then(|i| messages.get(i))
        .is_some_and(|prev| prev.ends_with_connector() && prev.is_in(target));
    if continues_previous {
        return true;
    }

    message.ends_with_connector()
        && messages
            .get(index + 1)
            .is_some_and(|next| next.is_in(target))
}

/// Keeps the fragments of `diagnostic` that belong to `target`, in order.
pub fn filter_messages(diagnostic: &FlowDiagnostic, target: &Path) -> Vec<FlowMessage> {
    let messages = &diagnostic.message;
    (0..messages.len())
        .filter(|&i| fragment_belongs(messages, i, target))
        .map(|i| messages[i].clone())
        .collect()
}

/// Returns a new report holding only the diagnostics that still have at
/// least one fragment belonging to `target`. Each retained diagnostic is
/// trimmed to those fragments. Diagnostic order is preserved.
///
/// # Example
/// ```
/// use flow_e::{filter_for_file, DiagnosticReport, FlowDiagnostic, FlowMessage};
/// use std::path::Path;
///
/// let report = DiagnosticReport {
///     errors: vec![FlowDiagnostic {
///         message: vec![
///             FlowMessage::new("/src/a.js", "string with"),
///             FlowMessage::new("/src/b.js", "number found"),
///         ],
///     }],
/// };
/// assert_eq!(filter_for_file(&report, Path::new("/src/a.js")).errors[0].message.len(), 2);
/// assert!(filter_for_file(&report, Path::new("/src/c.js")).is_empty());
/// ```
pub fn filter_for_file(report: &DiagnosticReport, target: &Path) -> DiagnosticReport {
    let errors = report
        .errors
        .iter()
        .filter_map(|diagnostic| {
            let kept = filter_messages(diagnostic, target);
            if kept.is_empty() {
                None
            } else {
                Some(FlowDiagnostic { message: kept })
            }
        })
        .collect();
    DiagnosticReport { errors }
}
