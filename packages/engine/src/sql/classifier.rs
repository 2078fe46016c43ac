//! Decides for every `?` marker whether it sits in a literal output position
//! of a SELECT list (and may be inlined) or in a filter/comparison position
//! (and must stay bound).
//!
//! The classifier is a small pushdown automaton over the scanner's spans. Each
//! open parenthesis and each `CASE` pushes a frame; the clause keywords rewrite
//! the clause of the top frame; a closing parenthesis or `END` pops back to the
//! frame that was current before it opened. A marker therefore takes its role
//! from the innermost SELECT/WHERE/CASE that encloses it.

use crate::errors::{marker_outside_clause_error, union_branch_shape_error};
use crate::sql::scanner::{Keyword, Span, SpanKind};
use crate::IseriesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Projection,
    Predicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Between `SELECT` and the `FROM` of the same level.
    Projection,
    /// `WHERE`, `ON`, `HAVING` and `CASE ... WHEN` conditions.
    Predicate,
    /// `FROM`, `GROUP BY`, `ORDER BY`, `VALUES` and `SET`. Markers here stay bound.
    Other,
    /// After `THEN` or `ELSE` up to the next `WHEN`, `ELSE` or `END`.
    CaseValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Statement,
    Paren,
    Case,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    clause: Option<Clause>,
    owner: Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedMarker {
    /// Byte offset of the `?` in the statement text.
    pub offset: usize,
    /// Position among all markers, which is also the index of its parameter.
    pub index: usize,
    pub role: Role,
    /// Top-level set-operation branch the marker belongs to.
    pub branch: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub markers: Vec<ClassifiedMarker>,
    /// Number of top-level branches, always at least one.
    pub branches: usize,
    /// Offset of the set-operation keyword opening each branch after the first.
    pub branch_offsets: Vec<usize>,
}

impl Classification {
    pub fn projection_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|marker| marker.role == Role::Projection)
            .count()
    }

    /// Roles per branch must match whenever anything is going to be inlined,
    /// otherwise the per-branch parameter runs cannot be lined up.
    pub fn ensure_uniform_branches(&self) -> Result<(), IseriesError> {
        if self.branches < 2 || self.projection_count() == 0 {
            return Ok(());
        }
        for branch in 1..self.branches {
            if !self.branch_roles(branch).eq(self.branch_roles(0)) {
                return Err(union_branch_shape_error(
                    branch,
                    self.branch_offsets[branch - 1],
                ));
            }
        }
        Ok(())
    }

    fn branch_roles(&self, branch: usize) -> impl Iterator<Item = Role> + '_ {
        self.markers
            .iter()
            .filter(move |marker| marker.branch == branch)
            .map(|marker| marker.role)
    }
}

pub fn classify(sql: &str, spans: &[Span]) -> Result<Classification, IseriesError> {
    let significant = spans
        .iter()
        .filter(|span| !span.is_whitespace(sql) && !span.is_comment(sql))
        .collect::<Vec<_>>();

    let mut stack = vec![Frame {
        clause: None,
        owner: Owner::Statement,
    }];
    let mut markers = Vec::new();
    let mut branch_offsets = Vec::new();

    for (position, span) in significant.iter().enumerate() {
        match span.kind {
            SpanKind::ParenOpen => {
                let clause = top(&stack).clause;
                stack.push(Frame {
                    clause,
                    owner: Owner::Paren,
                });
            }
            SpanKind::ParenClose => {
                while stack.len() > 1 {
                    if let Some(Frame {
                        owner: Owner::Paren,
                        ..
                    }) = stack.pop()
                    {
                        break;
                    }
                }
            }
            // GROUP and ORDER open a clause only as GROUP BY and ORDER BY, not in `WITHIN GROUP`.
            SpanKind::Keyword(Keyword::Group | Keyword::Order)
                if !significant
                    .get(position + 1)
                    .is_some_and(|next| next.text(sql).eq_ignore_ascii_case("BY")) => {}
            SpanKind::Keyword(keyword) => {
                apply_keyword(&mut stack, keyword, span, &mut branch_offsets);
            }
            SpanKind::Marker => {
                let Some(clause) = top(&stack).clause else {
                    return Err(marker_outside_clause_error(span.start));
                };
                let compared = position
                    .checked_sub(1)
                    .and_then(|prev| significant.get(prev))
                    .is_some_and(|prev| is_comparison(sql, prev))
                    || significant
                        .get(position + 1)
                        .is_some_and(|next| is_comparison(sql, next));
                let role = match clause {
                    Clause::Projection | Clause::CaseValue if !compared => Role::Projection,
                    _ => Role::Predicate,
                };
                markers.push(ClassifiedMarker {
                    offset: span.start,
                    index: markers.len(),
                    role,
                    branch: branch_offsets.len(),
                });
            }
            SpanKind::QuotedLiteral | SpanKind::Other => {}
        }
    }

    Ok(Classification {
        markers,
        branches: branch_offsets.len() + 1,
        branch_offsets,
    })
}

fn apply_keyword(
    stack: &mut Vec<Frame>,
    keyword: Keyword,
    span: &Span,
    branch_offsets: &mut Vec<usize>,
) {
    let in_case = top(stack).owner == Owner::Case;
    match keyword {
        Keyword::Select => set_clause(stack, Clause::Projection),
        Keyword::Where | Keyword::On | Keyword::Having => set_clause(stack, Clause::Predicate),
        Keyword::From | Keyword::Group | Keyword::Order | Keyword::Values | Keyword::Set => {
            set_clause(stack, Clause::Other)
        }
        Keyword::Case => stack.push(Frame {
            clause: Some(Clause::Predicate),
            owner: Owner::Case,
        }),
        Keyword::When if in_case => set_clause(stack, Clause::Predicate),
        Keyword::Then | Keyword::Else if in_case => set_clause(stack, Clause::CaseValue),
        Keyword::End if in_case => {
            stack.pop();
        }
        Keyword::Union | Keyword::Intersect | Keyword::Except => {
            if span.depth == 0 && stack.len() == 1 {
                branch_offsets.push(span.start);
            }
            if let Some(frame) = stack.last_mut() {
                frame.clause = None;
            }
        }
        Keyword::When | Keyword::Then | Keyword::Else | Keyword::End | Keyword::Like => {}
    }
}

fn top(stack: &[Frame]) -> Frame {
    stack.last().copied().unwrap_or(Frame {
        clause: None,
        owner: Owner::Statement,
    })
}

fn set_clause(stack: &mut [Frame], clause: Clause) {
    if let Some(frame) = stack.last_mut() {
        frame.clause = Some(clause);
    }
}

fn is_comparison(sql: &str, span: &Span) -> bool {
    match span.kind {
        SpanKind::Keyword(Keyword::Like) => true,
        SpanKind::Other => matches!(
            span.text(sql),
            "=" | "<>" | "!=" | "^=" | "<" | ">" | "<=" | ">=" | "!<" | "!>" | "^<" | "^>"
        ),
        _ => false,
    }
}
