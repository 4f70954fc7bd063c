//! Lint-report translation and the stylish console reporter.

use crate::e_diagnostics::DiagnosticReport;
use crate::e_fmt::pluralize;
use crate::prelude::*;
use comfy_table::{presets, Cell, CellAlignment, Color as CellColor, Table};
use nu_ansi_term::{Color, Style};

/// One entry in the lint-report shape the stylish reporter consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintEntry {
    pub file: String,
    pub line: u32,
    pub character: u32,
    /// `E` for errors, `W` for warnings.
    pub code: String,
    pub reason: String,
}

impl LintEntry {
    pub fn is_warning(&self) -> bool {
        self.code.starts_with('W')
    }

    pub fn severity(&self) -> &'static str {
        if self.is_warning() {
            "warning"
        } else {
            "error"
        }
    }
}

/// Flattens each diagnostic into a single lint entry. The location and file
/// come from the first fragment; the reason joins every fragment's text.
pub fn to_lint_entries(report: &DiagnosticReport) -> Vec<LintEntry> {
    report
        .errors
        .iter()
        .filter_map(|diagnostic| {
            let first = diagnostic.message.first()?;
            let reason = diagnostic
                .message
                .iter()
                .map(|m| m.descr.trim())
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            let code = match first.level.as_deref() {
                Some("warning") => "W",
                _ => "E",
            };
            Some(LintEntry {
                file: first.path.clone(),
                line: first.line,
                character: first.start,
                code: code.to_string(),
                reason,
            })
        })
        .collect()
}

/// Renders entries grouped by file, in order of first appearance, followed by
/// a problem count.
pub fn render_stylish(entries: &[LintEntry], color: bool) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut files: Vec<&str> = Vec::new();
    for entry in entries {
        if !files.contains(&entry.file.as_str()) {
            files.push(&entry.file);
        }
    }

    let mut out = String::new();
    for file in files {
        let heading = if color {
            Style::new().underline().paint(file).to_string()
        } else {
            file.to_string()
        };
        out.push_str(&heading);
        out.push('\n');

        let mut table = Table::new();
        table.load_preset(presets::NOTHING);
        if color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        for entry in entries.iter().filter(|e| e.file == file) {
            let severity_color = if entry.is_warning() {
                CellColor::Yellow
            } else {
                CellColor::Red
            };
            table.add_row(vec![
                Cell::new(format!("line {}", entry.line)).fg(CellColor::DarkGrey),
                Cell::new(format!("col {}", entry.character))
                    .fg(CellColor::DarkGrey)
                    .set_alignment(CellAlignment::Left),
                Cell::new(entry.severity()).fg(severity_color),
                Cell::new(&entry.reason),
            ]);
        }
        out.push_str(&table.to_string());
        out.push_str("\n\n");
    }

    let errors = entries.iter().filter(|e| !e.is_warning()).count();
    let warnings = entries.len() - errors;
    let mut summary = format!("✖ {}", pluralize(entries.len(), "problem"));
    if warnings > 0 {
        summary.push_str(&format!(
            " ({}, {})",
            pluralize(errors, "error"),
            pluralize(warnings, "warning")
        ));
    }
    if color {
        summary = Color::Red.bold().paint(summary).to_string();
    }
    out.push_str(&summary);
    out.push('\n');
    out
}

/// The line printed when a whole run retained no diagnostics.
pub fn success_line(color: bool) -> String {
    let glyph = if color {
        Color::Green.paint("✔").to_string()
    } else {
        "✔".to_string()
    };
    format!("{} Flow has found 0 errors", glyph)
}

pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Where the dispatcher sends human-facing output.
#[derive(Clone)]
pub struct Reporter {
    pub color: bool,
    out: Sink,
    err: Sink,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("color", &self.color)
            .field("out", &"Closure")
            .field("err", &"Closure")
            .finish()
    }
}

impl Reporter {
    /// Prints to stdout and stderr.
    pub fn console(color: bool) -> Self {
        Reporter {
            color,
            out: Arc::new(|s: &str| println!("{}", s)),
            err: Arc::new(|s: &str| eprintln!("{}", s)),
        }
    }

    pub fn with_sinks(color: bool, out: Sink, err: Sink) -> Self {
        Reporter { color, out, err }
    }

    /// Translates a filtered report and prints it. Empty reports print nothing.
    pub fn report(&self, report: &DiagnosticReport) {
        let rendered = render_stylish(&to_lint_entries(report), self.color);
        if !rendered.is_empty() {
            (self.out)(rendered.trim_end());
        }
    }

    pub fn success(&self) {
        (self.out)(&success_line(self.color));
    }

    pub fn failure(&self, path: &Path, message: &str) {
        let glyph = if self.color {
            Color::Red.paint("✖").to_string()
        } else {
            "✖".to_string()
        };
        (self.err)(&format!("{} {}: {}", glyph, path.display(), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_diagnostics::{FlowDiagnostic, FlowMessage};

    fn located(path: &str, descr: &str, level: &str, line: u32, start: u32) -> FlowMessage {
        FlowMessage {
            level: Some(level.to_string()),
            line,
            endline: line,
            start,
            end: start + 3,
            ..FlowMessage::new(path, descr)
        }
    }

    fn sample() -> DiagnosticReport {
        DiagnosticReport {
            errors: vec![
                FlowDiagnostic {
                    message: vec![
                        located("/p/a.js", "string", "error", 3, 9),
                        located("/p/a.js", "This type is incompatible with", "error", 3, 9),
                        located("/p/b.js", "number", "error", 7, 1),
                    ],
                },
                FlowDiagnostic {
                    message: vec![located("/p/a.js", "unused suppression", "warning", 10, 2)],
                },
            ],
        }
    }

    #[test]
    fn translation_uses_first_fragment_location() {
        let entries = to_lint_entries(&sample());
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            LintEntry {
                file: "/p/a.js".into(),
                line: 3,
                character: 9,
                code: "E".into(),
                reason: "string This type is incompatible with number".into(),
            }
        );
        assert_eq!(entries[1].code, "W");
        assert_eq!(entries[1].severity(), "warning");
    }

    #[test]
    fn translation_skips_empty_diagnostics() {
        let report = DiagnosticReport {
            errors: vec![FlowDiagnostic { message: vec![] }],
        };
        assert!(to_lint_entries(&report).is_empty());
    }

    #[test]
    fn stylish_plain_output() {
        let out = render_stylish(&to_lint_entries(&sample()), false);
        assert!(out.starts_with("/p/a.js\n"));
        assert!(out.contains("line 3"));
        assert!(out.contains("col 9"));
        assert!(out.contains("string This type is incompatible with number"));
        assert!(out.contains("warning"));
        assert!(out.trim_end().ends_with("✖ 2 problems (1 error, 1 warning)"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn stylish_empty_is_empty() {
        assert_eq!(render_stylish(&[], false), "");
    }

    #[test]
    fn success_text() {
        assert_eq!(success_line(false), "✔ Flow has found 0 errors");
        assert!(success_line(true).contains("Flow has found 0 errors"));
    }

    #[test]
    fn reporter_routes_to_sinks() {
        let out = Arc::new(Mutex::new(Vec::<String>::new()));
        let err = Arc::new(Mutex::new(Vec::<String>::new()));
        let (o, e) = (Arc::clone(&out), Arc::clone(&err));
        let reporter = Reporter::with_sinks(
            false,
            Arc::new(move |s: &str| o.lock().unwrap().push(s.to_string())),
            Arc::new(move |s: &str| e.lock().unwrap().push(s.to_string())),
        );

        reporter.report(&DiagnosticReport::default());
        assert!(out.lock().unwrap().is_empty());

        reporter.report(&sample());
        reporter.failure(Path::new("/p/c.js"), "boom");
        assert_eq!(out.lock().unwrap().len(), 1);
        assert_eq!(err.lock().unwrap()[0], "✖ /p/c.js: boom");
    }
}
