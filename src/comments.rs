//! Comment relocation
//!
//! The code generator only prints comments that lead a statement. Before
//! generation, every comment that would otherwise vanish is re-attached as a
//! leading comment of a statement that is still in the tree:
//!
//! - trailing comments (`x = 1; // why`) move above the statement they close,
//!   or above the next statement when none ends on their line;
//! - comments on or inside removed statements move to the next surviving
//!   statement, or to the end of the file.

use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use tracing::debug;

/// Re-attaches comments so the generator prints them. Returns how many moved.
pub fn relocate_comments(program: &mut Program, removed: &[Span], absorbed: &[Span]) -> usize {
    let mut collector = StatementSpans::default();
    collector.visit_program(program);
    let mut statements = collector.spans;
    statements.sort_by_key(|span| (span.start, span.end));

    let source = program.source_text;
    let eof = program.span.end;
    let mut moved = 0;

    for comment in program.comments.iter_mut() {
        if absorbed.contains(&comment.span) {
            continue;
        }
        let target = if let Some(removed_stmt) = removed
            .iter()
            .find(|r| r.start <= comment.span.start && comment.span.end <= r.end)
        {
            next_statement(&statements, removed_stmt.end).unwrap_or(eof)
        } else if let Some(removed_stmt) = removed
            .iter()
            .find(|r| comment.is_leading() && comment.attached_to == r.start)
        {
            next_statement(&statements, removed_stmt.end).unwrap_or(eof)
        } else if comment.is_trailing() {
            closing_statement(&statements, source, comment.span)
                .or_else(|| next_statement(&statements, comment.span.end))
                .unwrap_or(eof)
        } else {
            continue;
        };

        comment.position = CommentPosition::Leading;
        comment.attached_to = target;
        comment.set_preceded_by_newline(true);
        comment.set_followed_by_newline(true);
        moved += 1;
    }

    debug!(moved, "comments relocated");
    moved
}

/// Start of the first statement beginning at or after `offset`.
fn next_statement(statements: &[Span], offset: u32) -> Option<u32> {
    statements
        .iter()
        .find(|span| span.start >= offset)
        .map(|span| span.start)
}

/// Start of the outermost statement that ends on the comment's line, right
/// before it.
fn closing_statement(statements: &[Span], source: &str, comment: Span) -> Option<u32> {
    let end = statements
        .iter()
        .filter(|span| span.end <= comment.start)
        .map(|span| span.end)
        .max()?;
    let gap = source.get(end as usize..comment.start as usize)?;
    if gap.contains('\n') {
        return None;
    }
    statements
        .iter()
        .filter(|span| span.end == end)
        .map(|span| span.start)
        .min()
}

#[derive(Default)]
struct StatementSpans {
    spans: Vec<Span>,
}

impl<'a> Visit<'a> for StatementSpans {
    fn visit_statement(&mut self, it: &Statement<'a>) {
        let span = it.span();
        // Synthesized statements carry an empty span and cannot anchor.
        if !span.is_empty() {
            self.spans.push(span);
        }
        walk::walk_statement(self, it);
    }
}
