//! Module tree with in-place mutation
//!
//! The parsed statements never move. Edits are recorded next to them by
//! `StmtId` and resolved when the module is printed, so every byte that no
//! edit touches is reproduced from the source.

use super::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("unknown statement {0}")]
    UnknownStatement(StmtId),

    #[error("statement {0} was already removed")]
    StatementRemoved(StmtId),

    #[error("splice {start}..{end} overlaps an earlier splice")]
    OverlappingSplice { start: usize, end: usize },
}

/// A piece of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// Literal text
    Text(String),
    /// Verbatim source range, splices applied
    Source(Span),
}

/// A statement that does not exist in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthetic {
    pub code: Vec<Piece>,
    /// Source regions (comments and the whitespace after them) printed before the code
    pub leading: Vec<Span>,
    /// Source regions (same-line comments) printed after the code
    pub trailing: Vec<Span>,
}

impl Synthetic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.code.push(Piece::Text(text.into()));
        self
    }

    pub fn source(mut self, span: Span) -> Self {
        self.code.push(Piece::Source(span));
        self
    }

    pub fn with_leading(mut self, regions: impl IntoIterator<Item = Span>) -> Self {
        self.leading.extend(regions);
        self
    }

    pub fn with_trailing(mut self, regions: impl IntoIterator<Item = Span>) -> Self {
        self.trailing.extend(regions);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Edit {
    Keep,
    Replace(Synthetic),
    Remove,
}

/// A parsed module, exclusively owned for the length of one transform.
#[derive(Debug, Clone)]
pub struct Module {
    pub(crate) source: String,
    pub(crate) file_id: usize,
    pub(crate) tokens: Vec<Token>,
    pub(crate) stmts: Vec<Stmt>,
    pub(crate) edits: Vec<Edit>,
    pub(crate) detached: Vec<bool>,
    pub(crate) detached_trailing: Vec<bool>,
    pub(crate) inserted: Vec<Vec<Synthetic>>,
    pub(crate) appended: Vec<Synthetic>,
    /// start -> (end, replacement)
    pub(crate) splices: BTreeMap<usize, (usize, String)>,
}

impl Module {
    pub(crate) fn new(source: String, file_id: usize, tokens: Vec<Token>, stmts: Vec<Stmt>) -> Self {
        let count = stmts.len();
        Self {
            source,
            file_id,
            tokens,
            stmts,
            edits: vec![Edit::Keep; count],
            detached: vec![false; count],
            detached_trailing: vec![false; count],
            inserted: vec![Vec::new(); count],
            appended: Vec::new(),
            splices: BTreeMap::new(),
        }
    }

    /// Parses `source` into a module tree.
    pub fn parse(source: &str, file_id: usize) -> ParseResult<Self> {
        parse_module(source, file_id)
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_id(&self) -> usize {
        self.file_id
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Every parsed statement in source order, removed ones included.
    pub fn statements(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.0)
    }

    pub fn tokens_of(&self, stmt: &Stmt) -> &[Token] {
        &self.tokens[stmt.tokens.clone()]
    }

    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    pub fn is_removed(&self, id: StmtId) -> bool {
        matches!(self.edits.get(id.0), Some(Edit::Remove))
    }

    /// True once any edit has been recorded.
    pub fn is_modified(&self) -> bool {
        !self.appended.is_empty()
            || !self.splices.is_empty()
            || self.edits.iter().any(|edit| *edit != Edit::Keep)
            || self.inserted.iter().any(|items| !items.is_empty())
    }

    /// Statements still in the module that satisfy `pred`, in source order.
    pub fn find<P>(&self, mut pred: P) -> Vec<&Stmt>
    where
        P: FnMut(&Stmt) -> bool,
    {
        self.stmts
            .iter()
            .filter(|stmt| !self.is_removed(stmt.id) && pred(stmt))
            .collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replaces the code of a statement; its position and leading comments stay.
    pub fn replace(&mut self, id: StmtId, with: Synthetic) -> Result<(), TreeError> {
        let edit = self.edit_mut(id)?;
        *edit = Edit::Replace(with);
        Ok(())
    }

    /// Removes a statement together with its comments.
    pub fn remove(&mut self, id: StmtId) -> Result<(), TreeError> {
        let edit = self.edit_mut(id)?;
        *edit = Edit::Remove;
        Ok(())
    }

    pub fn insert_before(&mut self, id: StmtId, item: Synthetic) -> Result<(), TreeError> {
        let items = self
            .inserted
            .get_mut(id.0)
            .ok_or(TreeError::UnknownStatement(id))?;
        items.push(item);
        Ok(())
    }

    /// Adds a statement after the last one.
    pub fn append(&mut self, item: Synthetic) {
        self.appended.push(item);
    }

    /// Detaches the leading comments of a statement.
    ///
    /// Returns the source region from the first leading comment up to the
    /// statement's code so the comments can be carried by another statement.
    pub fn take_leading(&mut self, id: StmtId) -> Result<Option<Span>, TreeError> {
        let stmt = self.stmts.get(id.0).ok_or(TreeError::UnknownStatement(id))?;
        if self.detached[id.0] || stmt.leading.is_empty() {
            return Ok(None);
        }

        let region = Span::new(stmt.lead_start(), stmt.span.start, self.file_id);
        self.detached[id.0] = true;
        Ok(Some(region))
    }

    /// Detaches the trailing comments of a statement.
    ///
    /// Returns the region from the end of the statement's code through its
    /// last same-line comment.
    pub fn take_trailing(&mut self, id: StmtId) -> Result<Option<Span>, TreeError> {
        let stmt = self.stmts.get(id.0).ok_or(TreeError::UnknownStatement(id))?;
        if self.detached_trailing[id.0] || stmt.trailing.is_empty() {
            return Ok(None);
        }

        let region = Span::new(stmt.span.end, stmt.full_end(), self.file_id);
        self.detached_trailing[id.0] = true;
        Ok(Some(region))
    }

    /// Replaces a source range inside retained code.
    pub fn splice(&mut self, span: Span, text: impl Into<String>) -> Result<(), TreeError> {
        let overlap = TreeError::OverlappingSplice {
            start: span.start,
            end: span.end,
        };

        if let Some((_, (end, _))) = self.splices.range(..=span.start).next_back() {
            if *end > span.start {
                return Err(overlap);
            }
        }
        if let Some((start, _)) = self.splices.range(span.start..).next() {
            if *start < span.end {
                return Err(overlap);
            }
        }

        self.splices.insert(span.start, (span.end, text.into()));
        Ok(())
    }

    fn edit_mut(&mut self, id: StmtId) -> Result<&mut Edit, TreeError> {
        match self.edits.get_mut(id.0) {
            None => Err(TreeError::UnknownStatement(id)),
            Some(Edit::Remove) => Err(TreeError::StatementRemoved(id)),
            Some(edit) => Ok(edit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(source: &str) -> Module {
        Module::parse(source, 0).unwrap()
    }

    #[test]
    fn test_find_in_source_order() {
        let module = module("a = 1;\nfoo();\nb = 2;\n");
        let assigns = module.find(|stmt| matches!(stmt.kind, StmtKind::Assign(_)));
        let ids: Vec<StmtId> = assigns.iter().map(|stmt| stmt.id).collect();
        assert_eq!(ids, [StmtId(0), StmtId(2)]);
    }

    #[test]
    fn test_find_skips_removed() {
        let mut module = module("a = 1;\nb = 2;\n");
        module.remove(StmtId(0)).unwrap();
        assert_eq!(module.find(|_| true).len(), 1);
        assert!(module.is_removed(StmtId(0)));
        assert!(module.is_modified());
    }

    #[test]
    fn test_edits_on_removed_statement_fail() {
        let mut module = module("a = 1;\n");
        module.remove(StmtId(0)).unwrap();
        assert_eq!(
            module.replace(StmtId(0), Synthetic::new().text("b;")),
            Err(TreeError::StatementRemoved(StmtId(0)))
        );
        assert_eq!(module.remove(StmtId(0)), Err(TreeError::StatementRemoved(StmtId(0))));
        assert_eq!(module.remove(StmtId(7)), Err(TreeError::UnknownStatement(StmtId(7))));
    }

    #[test]
    fn test_take_leading_once() {
        let mut module = module("a();\n\n/** Doc */\nb();\n");
        let region = module.take_leading(StmtId(1)).unwrap().unwrap();
        assert_eq!(module.text(region), "/** Doc */\n");
        assert_eq!(module.take_leading(StmtId(1)).unwrap(), None);
        assert_eq!(module.take_leading(StmtId(0)).unwrap(), None);
    }

    #[test]
    fn test_take_trailing_once() {
        let mut module = module("a(); // one /* two */
b();
");
        let region = module.take_trailing(StmtId(0)).unwrap().unwrap();
        assert_eq!(module.text(region), " // one /* two */");
        assert_eq!(module.take_trailing(StmtId(0)).unwrap(), None);
        assert_eq!(module.take_trailing(StmtId(1)).unwrap(), None);
    }

    #[test]
    fn test_overlapping_splices_rejected() {
        let mut module = module("foo.bar(foo.baz);\n");
        module.splice(Span::new(0, 7, 0), "bar").unwrap();
        module.splice(Span::new(8, 15, 0), "baz").unwrap();
        assert_eq!(
            module.splice(Span::new(4, 9, 0), "x"),
            Err(TreeError::OverlappingSplice { start: 4, end: 9 })
        );
    }

    #[test]
    fn test_unmodified_module() {
        let module = module("const a = 1;\n");
        assert!(!module.is_modified());
        assert_eq!(module.source(), "const a = 1;\n");
    }
}
