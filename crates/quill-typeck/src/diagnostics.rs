//! Ariadne-based rendering for solver diagnostics.
//!
//! Turns a [`Diagnostic`] into a formatted, labeled report against the
//! script source. When the offending constraint carried a span, the label
//! points at it; otherwise the report covers the start of the file.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::error::{Diagnostic, DiagnosticKind};

/// Rendering options.
#[derive(Clone, Debug)]
pub struct DiagnosticOptions {
    pub color: bool,
}

impl DiagnosticOptions {
    /// Colorless output, for deterministic test snapshots.
    pub fn colorless() -> Self {
        DiagnosticOptions { color: false }
    }
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        DiagnosticOptions { color: true }
    }
}

/// Error code per diagnostic kind.
fn error_code(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::TypeMismatch => "E0001",
        DiagnosticKind::CyclicBinding => "E0002",
        DiagnosticKind::NoApplicableMember => "E0003",
        DiagnosticKind::AmbiguousType => "E0004",
    }
}

fn label_text(diagnostic: &Diagnostic) -> String {
    match diagnostic.kind {
        DiagnosticKind::TypeMismatch => format!("required by `{}`", diagnostic.constraint),
        DiagnosticKind::CyclicBinding => "cyclic binding introduced here".to_string(),
        DiagnosticKind::NoApplicableMember => {
            format!("no type satisfies `{}`", diagnostic.constraint)
        }
        DiagnosticKind::AmbiguousType => format!("`{}` is undetermined", diagnostic.constraint),
    }
}

/// Render a diagnostic into a formatted report string.
pub fn render_diagnostic(
    diagnostic: &Diagnostic,
    source: &str,
    _filename: &str,
    opts: &DiagnosticOptions,
) -> String {
    let config = Config::default().with_color(opts.color);
    let source_len = source.len();

    // Clamp a range to be valid within source bounds; ariadne needs at
    // least a 1-char span.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e {
            s..e.saturating_add(1).min(source_len)
        } else {
            s..e
        }
    };

    let span = clamp(
        diagnostic
            .span
            .map(|s| s.range())
            .unwrap_or(0..source_len.max(1).min(source_len)),
    );

    let mut builder = Report::build(ReportKind::Error, span.clone())
        .with_code(error_code(diagnostic.kind))
        .with_message(&diagnostic.message)
        .with_config(config);

    builder.add_label(
        Label::new(span)
            .with_message(label_text(diagnostic))
            .with_color(Color::Red),
    );

    if diagnostic.kind == DiagnosticKind::AmbiguousType {
        builder.set_help("add a type annotation to pin this value down");
    }

    let report = builder.finish();
    let mut out = Vec::new();
    report
        .write(Source::from(source), &mut out)
        .expect("writing a report to a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}

/// Render every diagnostic, in order.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source: &str,
    filename: &str,
    opts: &DiagnosticOptions,
) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| render_diagnostic(d, source, filename, opts))
        .collect()
}
