//! Serializer for the module tree

use super::*;
use crate::tree::Edit;

/// Widest bundled export list printed on a single line.
const MAX_INLINE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
    /// Keep string literals as written
    Preserve,
}

impl QuoteStyle {
    fn quote(self) -> Option<char> {
        match self {
            QuoteStyle::Single => Some('\''),
            QuoteStyle::Double => Some('"'),
            QuoteStyle::Preserve => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Quote character for string literals in generated statements
    pub quote: QuoteStyle,
    /// Separate appended export declarations from the code above by an empty line
    pub export_blank_line: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            quote: QuoteStyle::Single,
            export_blank_line: true,
        }
    }
}

/// Renders an `export { ... };` list.
pub fn export_list<'a, I>(specifiers: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let specifiers: Vec<String> = specifiers
        .into_iter()
        .map(|(local, exported)| {
            if local == exported {
                local.to_string()
            } else {
                format!("{} as {}", local, exported)
            }
        })
        .collect();

    if specifiers.is_empty() {
        return "export {};".to_string();
    }

    let inline = format!("export {{ {} }};", specifiers.join(", "));
    if inline.chars().count() <= MAX_INLINE_WIDTH {
        inline
    } else {
        format!("export {{\n  {}\n}};", specifiers.join(",\n  "))
    }
}

/// Prints the module, reproducing untouched code and trivia byte for byte.
pub fn print(module: &Module, options: &PrintOptions) -> String {
    let mut printer = Printer {
        module,
        options,
        newline: line_ending(&module.source),
        out: String::with_capacity(module.source.len()),
    };
    printer.print_body();
    printer.print_footer();
    printer.out
}

struct Printer<'a> {
    module: &'a Module,
    options: &'a PrintOptions,
    /// Line terminator for generated code
    newline: &'static str,
    out: String,
}

/// The first line terminator of `source`, `\n` when there is none.
fn line_ending(source: &str) -> &'static str {
    match source.find('\n') {
        Some(at) if source[..at].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

impl<'a> Printer<'a> {
    fn print_body(&mut self) {
        let module = self.module;
        let source = module.source.as_str();
        let mut prev_end = 0;
        // Whitespace and header comments of leading removed statements
        let mut pending_gap: Option<&str> = None;

        for stmt in &module.stmts {
            let index = stmt.id.0;
            let gap = &source[prev_end..stmt.lead_start()];
            prev_end = stmt.full_end();
            let inserted = &module.inserted[index];

            match &module.edits[index] {
                Edit::Remove if inserted.is_empty() => {
                    if self.out.is_empty() && pending_gap.is_none() {
                        pending_gap = Some(gap);
                    }
                }
                Edit::Remove => {
                    self.out.push_str(pending_gap.take().unwrap_or(gap));
                    for (i, item) in inserted.iter().enumerate() {
                        if i > 0 {
                            self.out.push_str(self.newline);
                        }
                        self.print_synthetic(item);
                    }
                }
                edit => {
                    self.out.push_str(pending_gap.take().unwrap_or(gap));
                    for item in inserted {
                        self.print_synthetic(item);
                        self.out.push_str(self.newline);
                    }
                    if !module.detached[index] {
                        self.push_source(stmt.lead_start(), stmt.span.start, false);
                    }
                    match edit {
                        Edit::Replace(item) => self.print_code(item),
                        _ => self.push_source(stmt.span.start, stmt.span.end, false),
                    }
                    if !module.detached_trailing[index] {
                        self.push_source(stmt.span.end, stmt.full_end(), false);
                    }
                }
            }
        }

        if let Some(gap) = pending_gap {
            self.out.push_str(gap.trim_end());
        }
    }

    fn print_footer(&mut self) {
        let module = self.module;
        let start = module.stmts.last().map(|stmt| stmt.full_end()).unwrap_or(0);
        let footer = &module.source[start..];
        let body = footer.trim_end();

        self.out.push_str(body);
        for item in &module.appended {
            if !self.out.is_empty() {
                self.out.push_str(self.newline);
                if self.options.export_blank_line {
                    self.out.push_str(self.newline);
                }
            }
            self.print_synthetic(item);
        }
        self.out.push_str(&footer[body.len()..]);
    }

    fn print_synthetic(&mut self, item: &Synthetic) {
        for region in &item.leading {
            self.push_source(region.start, region.end, false);
        }
        self.print_code(item);
        for region in &item.trailing {
            self.push_source(region.start, region.end, false);
        }
    }

    fn print_code(&mut self, item: &Synthetic) {
        for piece in &item.code {
            match piece {
                Piece::Text(text) if self.newline != "\n" => {
                    self.out.push_str(&text.replace('\n', self.newline))
                }
                Piece::Text(text) => self.out.push_str(text),
                Piece::Source(span) => self.push_source(span.start, span.end, true),
            }
        }
    }

    /// Copies `start..end` from the source with splices applied and,
    /// for generated code, string literals requoted.
    fn push_source(&mut self, start: usize, end: usize, requote: bool) {
        let module = self.module;
        let source = module.source.as_str();

        let mut edits: Vec<(usize, usize, String)> = module
            .splices
            .range(start..end)
            .filter(|(_, (stop, _))| *stop <= end)
            .map(|(&from, (stop, text))| (from, *stop, text.clone()))
            .collect();

        if requote {
            if let Some(quote) = self.options.quote.quote() {
                let first = module.tokens.partition_point(|token| token.span.start < start);
                for token in module.tokens[first..]
                    .iter()
                    .take_while(|token| token.span.end <= end)
                {
                    if token.kind != TokenKind::StringLiteral {
                        continue;
                    }
                    if let Some(text) = requote_string(&source[token.span.start..token.span.end], quote) {
                        edits.push((token.span.start, token.span.end, text));
                    }
                }
                edits.sort_by_key(|(from, _, _)| *from);
            }
        }

        let mut pos = start;
        for (from, to, text) in edits {
            if from < pos {
                // Inside an earlier edit
                continue;
            }
            self.out.push_str(&source[pos..from]);
            self.out.push_str(&text);
            pos = to;
        }
        self.out.push_str(&source[pos..end]);
    }
}

/// Rewrites a string literal to use `quote` when no escaping is involved.
fn requote_string(raw: &str, quote: char) -> Option<String> {
    let current = raw.chars().next()?;
    if current == quote || raw.len() < 2 {
        return None;
    }

    let body = &raw[1..raw.len() - 1];
    if body.contains(['\'', '"']) {
        return None;
    }
    Some(format!("{quote}{body}{quote}"))
}
