//! Clause accumulation for boolean expressions.
//!
//! Clauses that produced no query (a stop word, say) are skipped when joined,
//! so the array only ever holds real sub-queries.

use crate::ast::{BooleanQuery, Clause, DEFAULT_MAX_CLAUSES, Occur, Query, QueryNode};

/// Clauses of one boolean expression, in the order they were written.
#[derive(Debug, Default)]
pub struct ClauseArray {
    /// Accumulated clauses.
    clauses: Vec<Clause>,
}

impl ClauseArray {
    /// Starts an array, with the clause if there is one.
    pub fn first(clause: Option<Clause>) -> Self {
        Self {
            clauses: clause.into_iter().collect(),
        }
    }

    /// Joins with AND. Both sides become MUST unless they are MUST_NOT.
    pub fn add_and(&mut self, clause: Option<Clause>) {
        let Some(mut clause) = clause else {
            return;
        };
        if let [only] = self.clauses.as_mut_slice()
            && !only.is_prohibited()
        {
            only.occur = Occur::Must;
        }
        if !clause.is_prohibited() {
            clause.occur = Occur::Must;
        }
        self.clauses.push(clause);
    }

    /// Joins with OR. The clause keeps its occurrence.
    pub fn add_or(&mut self, clause: Option<Clause>) {
        if let Some(clause) = clause {
            self.clauses.push(clause);
        }
    }

    /// Joins two clauses written side by side.
    pub fn add_default(&mut self, clause: Option<Clause>, or_default: bool) {
        if or_default {
            self.add_or(clause);
        } else {
            self.add_and(clause);
        }
    }

    /// Reduces the array to a query.
    ///
    /// - no clauses: no query
    /// - one MUST_NOT clause: that clause plus a MUST match-all clause
    /// - one other clause: its query, unwrapped
    /// - more: a boolean query over all clauses with coordination disabled
    pub fn into_query(mut self) -> Option<Query> {
        match self.clauses.len() {
            0 => None,
            1 => {
                let clause = self.clauses.pop()?;
                if clause.is_prohibited() {
                    let mut bq = BooleanQuery::new(false);
                    bq.clauses.push(clause);
                    bq.clauses.push(Clause::new(Query::match_all(), Occur::Must));
                    Some(QueryNode::Boolean(bq).into())
                } else {
                    Some(clause.query)
                }
            }
            _ => Some(
                QueryNode::Boolean(BooleanQuery {
                    clauses: self.clauses,
                    coord_disabled: true,
                    max_clauses: DEFAULT_MAX_CLAUSES,
                })
                .into(),
            ),
        }
    }
}
