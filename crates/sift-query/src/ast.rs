//! Query tree produced by the parser.
//!
//! A [`Query`] pairs a [`QueryNode`] with a boost. Each node owns its
//! children outright; nothing in a tree is shared with another tree.
//!
//! A boolean query with no clauses is the "empty query": it matches nothing
//! and is what the parser returns when the input produced no query at all.
//! It is distinct from [`QueryNode::MatchAll`].

use std::{fmt, sync::Arc};

use serde::Serialize;

use crate::error::TooManyClauses;

/// Default limit on the number of clauses in a boolean query, and on the
/// number of terms a multi-term query may expand to.
pub const DEFAULT_MAX_CLAUSES: usize = 512;

/// Characters escaped when a term is rendered back into query text.
const ESCAPED_CHARS: &str = "&:()[]{}!\"~^|<>=*?+- \t\\";

/// A query node with its boost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// The node.
    #[serde(flatten)]
    pub node: QueryNode,
    /// Score multiplier, 1.0 unless set with `^`.
    #[serde(skip_serializing_if = "is_unit_boost")]
    pub boost: f32,
}

/// Returns true for the default boost.
#[allow(clippy::trivially_copy_pass_by_ref, clippy::float_cmp)]
fn is_unit_boost(boost: &f32) -> bool {
    *boost == 1.0
}

/// The kinds of query the parser builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryNode {
    /// Matches one term in one field.
    Term(TermQuery),
    /// Matches terms similar to a term.
    Fuzzy(FuzzyQuery),
    /// Matches terms starting with a prefix.
    Prefix(PrefixQuery),
    /// Matches terms against a `*`/`?` pattern.
    Wildcard(WildcardQuery),
    /// Matches a sequence of terms.
    Phrase(PhraseQuery),
    /// Matches terms in a lexicographic range.
    Range(RangeQuery),
    /// Combines clauses.
    Boolean(BooleanQuery),
    /// Matches every document.
    MatchAll,
    /// Matches any of a set of terms in one field.
    MultiTerm(MultiTermQuery),
}

/// Clause participation requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// The clause must match.
    Must,
    /// The clause must not match.
    MustNot,
    /// The clause may match.
    Should,
}

/// A sub-query with its occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    /// The sub-query.
    pub query: Query,
    /// How the sub-query participates.
    pub occur: Occur,
}

impl Clause {
    /// Creates a clause.
    pub fn new(query: Query, occur: Occur) -> Self {
        Self { query, occur }
    }

    /// Returns true if the clause excludes matches.
    pub fn is_prohibited(&self) -> bool {
        self.occur == Occur::MustNot
    }
}

/// A single term in a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Term text.
    pub term: String,
}

/// A fuzzy term match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Term to match approximately.
    pub term: String,
    /// Minimum similarity in `0.0..1.0`.
    pub min_similarity: f32,
    /// Number of leading characters that must match exactly.
    pub prefix_length: usize,
    /// Maximum number of terms the query may expand to.
    pub max_terms: usize,
}

/// A prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Prefix, without the trailing `*`.
    pub prefix: String,
    /// Maximum number of terms the query may expand to.
    pub max_terms: usize,
}

/// A wildcard pattern match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WildcardQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Pattern using `*` and `?`.
    pub pattern: String,
    /// Maximum number of terms the query may expand to.
    pub max_terms: usize,
}

/// One position of a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhrasePosition {
    /// Absolute position, starting at 0.
    pub position: u32,
    /// Alternative terms accepted at this position.
    pub terms: Vec<String>,
}

/// A phrase match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Positions in order.
    pub positions: Vec<PhrasePosition>,
    /// Allowed positional distance.
    pub slop: u32,
}

impl PhraseQuery {
    /// Creates an empty phrase for `field`.
    pub fn new(field: Arc<str>) -> Self {
        Self {
            field,
            positions: Vec::new(),
            slop: 0,
        }
    }

    /// Adds a term `pos_inc` positions after the last one.
    ///
    /// The first term is always at position 0. An increment of zero adds the
    /// term as an alternative at the last position.
    pub fn add_term(&mut self, term: impl Into<String>, pos_inc: u32) {
        let term = term.into();
        match self.positions.last_mut() {
            None => self.positions.push(PhrasePosition {
                position: 0,
                terms: vec![term],
            }),
            Some(last) if pos_inc == 0 => last.terms.push(term),
            Some(last) => {
                let position = last.position.saturating_add(pos_inc);
                self.positions.push(PhrasePosition {
                    position,
                    terms: vec![term],
                });
            }
        }
    }

    /// Adds an alternative term at the last position.
    pub fn append_multi_term(&mut self, term: impl Into<String>) {
        self.add_term(term, 0);
    }
}

/// A lexicographic range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Lower bound, open if absent.
    pub lower: Option<String>,
    /// Upper bound, open if absent.
    pub upper: Option<String>,
    /// Whether the lower bound itself matches.
    pub include_lower: bool,
    /// Whether the upper bound itself matches.
    pub include_upper: bool,
}

/// A boolean combination of clauses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanQuery {
    /// Clauses in order.
    pub clauses: Vec<Clause>,
    /// Whether coordination scoring is disabled.
    pub coord_disabled: bool,
    /// Limit enforced by [`add_clause`](Self::add_clause).
    #[serde(skip)]
    pub max_clauses: usize,
}

impl BooleanQuery {
    /// Creates an empty boolean query with the default clause limit.
    pub fn new(coord_disabled: bool) -> Self {
        Self::with_max_clauses(coord_disabled, DEFAULT_MAX_CLAUSES)
    }

    /// Creates an empty boolean query with a clause limit.
    pub fn with_max_clauses(coord_disabled: bool, max_clauses: usize) -> Self {
        Self {
            clauses: Vec::new(),
            coord_disabled,
            max_clauses,
        }
    }

    /// Adds a clause, failing once the clause limit is reached.
    pub fn add_clause(&mut self, query: Query, occur: Occur) -> Result<(), TooManyClauses> {
        if self.clauses.len() >= self.max_clauses {
            return Err(TooManyClauses {
                limit: self.max_clauses,
            });
        }
        self.clauses.push(Clause::new(query, occur));
        Ok(())
    }
}

/// A disjunction over terms of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiTermQuery {
    /// Field name.
    pub field: Arc<str>,
    /// Terms in insertion order.
    pub terms: Vec<String>,
    /// Maximum number of terms kept.
    pub max_terms: usize,
}

impl MultiTermQuery {
    /// Creates an empty multi-term query.
    pub fn new(field: Arc<str>, max_terms: usize) -> Self {
        Self {
            field,
            terms: Vec::new(),
            max_terms,
        }
    }

    /// Adds a term. Empty terms and terms past the limit are ignored.
    pub fn add_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if !term.is_empty() && self.terms.len() < self.max_terms {
            self.terms.push(term);
        }
    }
}

impl From<QueryNode> for Query {
    fn from(node: QueryNode) -> Self {
        Self { node, boost: 1.0 }
    }
}

impl Query {
    /// Creates a term query.
    pub fn term(field: Arc<str>, term: impl Into<String>) -> Self {
        QueryNode::Term(TermQuery {
            field,
            term: term.into(),
        })
        .into()
    }

    /// Creates a query matching every document.
    pub fn match_all() -> Self {
        QueryNode::MatchAll.into()
    }

    /// Creates the empty query: a boolean query without clauses.
    pub fn empty() -> Self {
        QueryNode::Boolean(BooleanQuery::new(false)).into()
    }

    /// Returns true for a boolean query without clauses.
    pub fn is_empty(&self) -> bool {
        matches!(&self.node, QueryNode::Boolean(bq) if bq.clauses.is_empty())
    }

    /// Returns the query with its boost replaced.
    #[must_use]
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Renders the query back into query text.
    ///
    /// Terms in `default_field` are written without a field prefix, so the
    /// output parses back to an equivalent tree when `default_field` is the
    /// parser's only default field.
    pub fn to_query_string(&self, default_field: &str) -> String {
        let mut out = String::new();
        self.write_query_string(&mut out, default_field, true);
        out
    }

    /// Appends the query text for this node to `out`.
    fn write_query_string(&self, out: &mut String, default_field: &str, top: bool) {
        let boosted = !is_unit_boost(&self.boost);
        match &self.node {
            QueryNode::Term(q) => {
                write_field(out, &q.field, default_field);
                out.push_str(&escape(&q.term, ""));
            }
            QueryNode::Fuzzy(q) => {
                write_field(out, &q.field, default_field);
                out.push_str(&escape(&q.term, ""));
                out.push_str(&format!("~{}", q.min_similarity));
            }
            QueryNode::Prefix(q) => {
                write_field(out, &q.field, default_field);
                out.push_str(&escape(&q.prefix, ""));
                out.push('*');
            }
            QueryNode::Wildcard(q) => {
                write_field(out, &q.field, default_field);
                out.push_str(&escape(&q.pattern, "*?"));
            }
            QueryNode::Phrase(q) => {
                write_field(out, &q.field, default_field);
                out.push('"');
                let mut previous: Option<u32> = None;
                for (i, pos) in q.positions.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    if let Some(prev) = previous {
                        for _ in prev.saturating_add(1)..pos.position {
                            out.push_str("<> ");
                        }
                    }
                    previous = Some(pos.position);
                    let alternatives: Vec<String> =
                        pos.terms.iter().map(|t| escape(t, "")).collect();
                    out.push_str(&alternatives.join("|"));
                }
                out.push('"');
                if q.slop > 0 {
                    out.push_str(&format!("~{}", q.slop));
                }
            }
            QueryNode::Range(q) => {
                write_field(out, &q.field, default_field);
                match (&q.lower, &q.upper) {
                    (Some(lower), Some(upper)) => {
                        out.push(if q.include_lower { '[' } else { '{' });
                        out.push_str(&escape(lower, ""));
                        out.push(' ');
                        out.push_str(&escape(upper, ""));
                        out.push(if q.include_upper { ']' } else { '}' });
                    }
                    (Some(lower), None) => {
                        out.push_str(if q.include_lower { ">=" } else { ">" });
                        out.push_str(&escape(lower, ""));
                    }
                    (None, Some(upper)) => {
                        out.push_str(if q.include_upper { "<=" } else { "<" });
                        out.push_str(&escape(upper, ""));
                    }
                    (None, None) => out.push('*'),
                }
            }
            QueryNode::Boolean(q) => {
                let wrap = !top || boosted;
                if wrap {
                    out.push('(');
                }
                for (i, clause) in q.clauses.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    match clause.occur {
                        Occur::Must => out.push('+'),
                        Occur::MustNot => out.push('-'),
                        Occur::Should => {}
                    }
                    clause.query.write_query_string(out, default_field, false);
                }
                if wrap {
                    out.push(')');
                }
            }
            QueryNode::MatchAll => out.push('*'),
            QueryNode::MultiTerm(q) => {
                write_field(out, &q.field, default_field);
                let terms: Vec<String> = q.terms.iter().map(|t| escape(t, "")).collect();
                out.push('"');
                out.push_str(&terms.join("|"));
                out.push('"');
            }
        }
        if boosted {
            out.push_str(&format!("^{}", self.boost));
        }
    }

    /// Formats the query as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        let boost = if is_unit_boost(&self.boost) {
            String::new()
        } else {
            format!(" ^{}", self.boost)
        };
        match &self.node {
            QueryNode::Term(q) => writeln!(f, "{prefix}Term({}:{:?}){boost}", q.field, q.term),
            QueryNode::Fuzzy(q) => writeln!(
                f,
                "{prefix}Fuzzy({}:{:?} ~{} prefix={}){boost}",
                q.field, q.term, q.min_similarity, q.prefix_length
            ),
            QueryNode::Prefix(q) => {
                writeln!(f, "{prefix}Prefix({}:{:?}){boost}", q.field, q.prefix)
            }
            QueryNode::Wildcard(q) => {
                writeln!(f, "{prefix}Wildcard({}:{:?}){boost}", q.field, q.pattern)
            }
            QueryNode::Phrase(q) => {
                let positions: Vec<String> = q
                    .positions
                    .iter()
                    .map(|p| format!("{}={}", p.position, p.terms.join("|")))
                    .collect();
                writeln!(
                    f,
                    "{prefix}Phrase({}: {} slop={}){boost}",
                    q.field,
                    positions.join(" "),
                    q.slop
                )
            }
            QueryNode::Range(q) => writeln!(
                f,
                "{prefix}Range({}: {}{:?}, {:?}{}){boost}",
                q.field,
                if q.include_lower { '[' } else { '{' },
                q.lower,
                q.upper,
                if q.include_upper { ']' } else { '}' },
            ),
            QueryNode::Boolean(q) => {
                if q.clauses.is_empty() {
                    return writeln!(f, "{prefix}Empty{boost}");
                }
                writeln!(f, "{prefix}Boolean{boost}")?;
                for clause in &q.clauses {
                    let occur = match clause.occur {
                        Occur::Must => "Must",
                        Occur::MustNot => "MustNot",
                        Occur::Should => "Should",
                    };
                    writeln!(f, "{prefix}  {occur}")?;
                    clause.query.fmt_tree(f, indent + 2)?;
                }
                Ok(())
            }
            QueryNode::MatchAll => writeln!(f, "{prefix}MatchAll{boost}"),
            QueryNode::MultiTerm(q) => {
                writeln!(f, "{prefix}MultiTerm({}:{:?}){boost}", q.field, q.terms)
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Writes `field:` unless `field` is the default field.
fn write_field(out: &mut String, field: &str, default_field: &str) {
    if field != default_field {
        out.push_str(&escape(field, ""));
        out.push(':');
    }
}

/// Backslash-escapes query syntax characters in `text`, except those in `keep`.
fn escape(text: &str, keep: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED_CHARS.contains(ch) && !keep.contains(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
