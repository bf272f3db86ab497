//! Phase-agnostic diagnostic rendering (spec §6.4). One render path serves
//! the lexer, syntax analyzer, and semantic analyzer alike, since all three
//! report through the same [`Diagnostic`] shape (spec §7).
//!
//! The caret line underscores the *whole* offending lexeme, not just its
//! first byte (`examples/original_source/src/errorhandler.c`'s behavior,
//! carried over per SPEC_FULL §10) — `~` fills the gap from the line start
//! to the token, then `^` repeats across the token's byte length.

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::base::Span;
use crate::errors::{Diagnostic, Severity};

/// Renders one diagnostic as the three-line block spec §6.4 describes: a
/// header naming the error class and file, a location line, and a caret
/// line. `source` is the full file text the diagnostic's span indexes into.
pub fn render(diag: &Diagnostic, file: &str, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&header_line(diag, file));
    out.push('\n');
    if let Some(line_text) = source_line(source, diag.span) {
        let prefix = location_prefix(diag.span);
        out.push_str(&prefix);
        out.push_str(line_text);
        out.push('\n');
        out.push_str(&caret_line(&prefix, diag.span));
        out.push('\n');
    }
    if let Some(expected) = &diag.expected {
        out.push_str(&format!("  expected: {expected}\n"));
    }
    for related in &diag.related {
        out.push_str(&format!(
            "  note: {} ({})\n",
            related.message,
            location_prefix(related.span).trim_end()
        ));
    }
    out
}

/// Renders every diagnostic in `diags`, separated by a blank line, in the
/// order they were raised.
pub fn render_all(diags: &[Diagnostic], file: &str, source: &str) -> String {
    diags
        .iter()
        .map(|d| render(d, file, source))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same rendering, written through a `termcolor` stream so the driver can
/// colorize its stdout the way the rest of the corpus does (spec §6.4 is
/// silent on color; this is an additive presentation detail, not a new
/// diagnostic contract — SPEC_FULL §6.4).
pub fn write_colored(
    diag: &Diagnostic,
    file: &str,
    source: &str,
    stream: &mut dyn WriteColor,
) -> io::Result<()> {
    let color = severity_color(diag.severity);

    stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stream, "{}", diag.severity.as_str())?;
    stream.reset()?;
    writeln!(stream, "[{}] in {file}: {}", diag.code, diag.message)?;

    if let Some(line_text) = source_line(source, diag.span) {
        let prefix = location_prefix(diag.span);
        writeln!(stream, "{prefix}{line_text}")?;
        stream.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(stream, "{}", caret_line(&prefix, diag.span))?;
        stream.reset()?;
    }

    if let Some(expected) = &diag.expected {
        writeln!(stream, "  expected: {expected}")?;
    }
    for related in &diag.related {
        writeln!(
            stream,
            "  note: {} ({})",
            related.message,
            location_prefix(related.span).trim_end()
        )?;
    }
    Ok(())
}

pub fn write_all_colored(
    diags: &[Diagnostic],
    file: &str,
    source: &str,
    stream: &mut dyn WriteColor,
) -> io::Result<()> {
    for diag in diags {
        write_colored(diag, file, source, stream)?;
        writeln!(stream)?;
    }
    Ok(())
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn header_line(diag: &Diagnostic, file: &str) -> String {
    format!(
        "{}[{}] in {file}: {}",
        diag.severity.as_str(),
        diag.code,
        diag.message
    )
}

fn location_prefix(span: Span) -> String {
    format!(
        "{} : {} | ",
        span.start.display_line(),
        span.start.display_column()
    )
}

fn source_line(source: &str, span: Span) -> Option<&str> {
    source.lines().nth(span.start.line as usize)
}

fn caret_line(prefix: &str, span: Span) -> String {
    let mut line = " ".repeat(prefix.chars().count());
    line.push_str(&"~".repeat(span.start.column as usize));
    line.push_str(&"^".repeat(span.len().max(1)));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;
    use crate::errors::ErrorCode;
    use text_size::TextSize;

    fn span_at(line: u32, column: u32, len: u32) -> Span {
        Span::new(Position::new(line, column, TextSize::from(0)), TextSize::from(len))
    }

    #[test]
    fn header_names_code_file_and_message() {
        let diag = Diagnostic::new("boom", span_at(0, 0, 1), ErrorCode::E0101);
        let rendered = render(&diag, "demo.space", "x");
        assert!(rendered.starts_with("error[E0101] in demo.space: boom"));
    }

    #[test]
    fn caret_spans_the_whole_lexeme() {
        let diag = Diagnostic::new("bad ident", span_at(0, 4, 3), ErrorCode::E0302);
        let rendered = render(&diag, "demo.space", "var foo = 1;");
        let caret_line = rendered.lines().nth(2).unwrap();
        assert!(caret_line.ends_with("^^^"));
        assert!(caret_line.contains("~~~~"));
    }

    #[test]
    fn related_info_is_appended_as_a_note() {
        let diag = Diagnostic::builder(ErrorCode::E0601)
            .message("'x' already declared")
            .span(span_at(1, 4, 1))
            .related(crate::errors::RelatedInfo::new("first declared here", span_at(0, 4, 1)))
            .build();
        let rendered = render(&diag, "demo.space", "var x = 1;\nvar x = 2;");
        assert!(rendered.contains("note: first declared here"));
    }
}
