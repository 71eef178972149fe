//! Byte offset to line/column conversion

/// 1-based line and column of a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Precomputed start offsets of every line in a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Location of `offset` in `source`; the column counts characters.
    pub fn location(&self, source: &str, offset: usize) -> Location {
        let offset = offset.min(source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = source
            .get(line_start..offset)
            .map(|text| text.chars().count())
            .unwrap_or(offset - line_start);

        Location {
            line: line + 1,
            column: column + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let source = "const a = 1;";
        let index = LineIndex::new(source);
        assert_eq!(index.location(source, 0), Location { line: 1, column: 1 });
        assert_eq!(index.location(source, 6), Location { line: 1, column: 7 });
    }

    #[test]
    fn test_later_lines() {
        let source = "a;\nbb;\n\nccc;";
        let index = LineIndex::new(source);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.location(source, 3), Location { line: 2, column: 1 });
        assert_eq!(index.location(source, 5), Location { line: 2, column: 3 });
        assert_eq!(index.location(source, 8), Location { line: 4, column: 1 });
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "const é = 1;";
        let index = LineIndex::new(source);
        let eq = source.find('=').unwrap();
        assert_eq!(index.location(source, eq), Location { line: 1, column: 9 });
    }
}
