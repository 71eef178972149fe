//! Comment attachment

use super::*;

/// Attaches comments found between top-level statements.
///
/// A comment starting on the line a statement ends on trails that statement;
/// any other comment leads the next statement. Comments before the first
/// statement (the file header) and after the last one stay unattached, as do
/// comments inside a statement, which are reproduced with its code.
pub(crate) fn attach_comments(stmts: &mut [Stmt], comments: Vec<Comment>, source: &str) {
    let mut next = 0;

    for comment in comments {
        while next < stmts.len() && stmts[next].span.end <= comment.span.start {
            next += 1;
        }

        if let Some(stmt) = stmts.get(next) {
            if stmt.span.start < comment.span.start {
                continue;
            }
        }

        let Some(prev) = next.checked_sub(1) else {
            continue;
        };

        let between = &source[stmts[prev].span.end..comment.span.start];
        if !between.contains('\n') {
            stmts[prev].trailing.push(comment);
        } else if let Some(stmt) = stmts.get_mut(next) {
            stmt.leading.push(comment);
        }
    }
}
