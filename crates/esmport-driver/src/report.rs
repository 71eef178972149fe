//! Diagnostics rendering with ariadne

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use esmport_lexer::{Token, TokenKind};
use esmport_parser::ParseError;
use esmport_transform::{TransformError, TransformErrorKind};
use std::io::{self, IsTerminal};

fn config() -> Config {
    Config::default()
        .with_index_type(IndexType::Byte)
        .with_color(io::stderr().is_terminal())
}

/// Prints one error report to stderr.
///
/// Without a span the report carries only its title.
pub fn report_error(
    code: &str,
    title: &str,
    label: Option<(&str, usize, usize)>,
    filename: &str,
    source: &str,
) -> io::Result<()> {
    let start = label.map_or(0, |(_, start, _)| start);
    let mut report = Report::build(ReportKind::Error, (filename, start..start))
        .with_config(config())
        .with_code(code)
        .with_message(title);

    if let Some((message, start, end)) = label {
        report = report.with_label(
            Label::new((filename, start..end))
                .with_message(message)
                .with_color(Color::Red),
        );
    }

    report.finish().eprint((filename, Source::from(source)))
}

pub fn report_lexer_errors(tokens: &[Token], filename: &str, source: &str) -> io::Result<()> {
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Error) {
        report_error(
            "E0001",
            "Lexical error",
            Some((token.value.as_str(), token.span.start, token.span.end)),
            filename,
            source,
        )?;
    }
    Ok(())
}

pub fn report_parse_error(error: &ParseError, filename: &str, source: &str) -> io::Result<()> {
    report_error(
        "E0001",
        "Syntax error",
        Some((error.message.as_str(), error.span.start, error.span.end)),
        filename,
        source,
    )
}

pub fn report_transform_error(error: &TransformError, filename: &str, source: &str) -> io::Result<()> {
    if let TransformErrorKind::Syntax(parse) = &error.kind {
        return report_parse_error(parse, filename, source);
    }

    let label = error
        .span
        .map(|span| (label_message(&error.kind), span.start, span.end));
    report_error(error.code(), &error.kind.to_string(), label, filename, source)
}

fn label_message(kind: &TransformErrorKind) -> &'static str {
    match kind {
        TransformErrorKind::BadExportAlias => "`exports` is reassigned here",
        TransformErrorKind::MultipleDeclarations { .. } => "second declaration",
        TransformErrorKind::UnsupportedCombination { .. } => "property assigned here",
        TransformErrorKind::ReservedExportName { .. } => "reserved word",
        TransformErrorKind::SelfExport { .. } => "exports the exports object",
        TransformErrorKind::NestedExportAssignment { .. } => "not a top-level export statement",
        TransformErrorKind::UndefinedExport { .. } => "no export site assigns this name",
        TransformErrorKind::ExportObjectValue { .. } => "used as a value",
        _ => "here",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_messages() {
        assert_eq!(label_message(&TransformErrorKind::BadExportAlias), "`exports` is reassigned here");
        assert_eq!(
            label_message(&TransformErrorKind::ReservedExportName {
                name: "class".to_string()
            }),
            "reserved word"
        );
    }
}
