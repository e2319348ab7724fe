//! Builds query nodes for primaries, one field at a time.
//!
//! Every builder works against a single field. [`Factory::expand`] runs a
//! builder over the active field set and unions the results. A builder
//! returning `None` means the text analyzed to nothing for that field.

use std::{iter, sync::Arc};

use tracing::{trace, warn};

use crate::{
    ast::{
        BooleanQuery, FuzzyQuery, MultiTermQuery, Occur, PhraseQuery, PrefixQuery, Query,
        QueryNode, RangeQuery, WildcardQuery,
    },
    config::ParserConfig,
    fields::FieldSet,
    phrase::{Phrase, Slot},
    session::StreamCache,
};

/// Parses the longest leading float in `text`, like `%f`.
pub fn scan_float(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f32>().ok())
}

/// Parses the leading integer in `text`, like `%d`.
pub fn scan_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    text[..sign + digits].parse().ok()
}

/// Query builder bound to a parser's configuration and stream cache.
pub struct Factory<'a> {
    /// Parser configuration.
    config: &'a ParserConfig,
    /// Token streams for analysis.
    streams: &'a mut StreamCache,
}

impl<'a> Factory<'a> {
    /// Creates a factory.
    pub fn new(config: &'a ParserConfig, streams: &'a mut StreamCache) -> Self {
        Self { config, streams }
    }

    /// Builds a query for every field in `fields` and unions the results.
    ///
    /// No fields gives no query. One field gives that field's query. With
    /// more fields the per-field queries become SHOULD clauses of a boolean
    /// query; fields that produce nothing are left out, and if none produce
    /// anything there is no query. Clauses past the limit are dropped.
    pub fn expand<F>(&mut self, fields: &FieldSet, mut build: F) -> Option<Query>
    where
        F: FnMut(&mut Self, &Arc<str>) -> Option<Query>,
    {
        if fields.len() <= 1 {
            return fields.iter().next().and_then(|field| build(self, field));
        }

        let mut union = BooleanQuery::with_max_clauses(false, self.config.max_clauses);
        for field in fields.iter() {
            let Some(query) = build(self, field) else {
                continue;
            };
            if let Err(err) = union.add_clause(query, Occur::Should) {
                warn!(field = %field, error = %err, "truncating multi-field expansion");
                break;
            }
        }

        if union.clauses.is_empty() {
            None
        } else {
            Some(QueryNode::Boolean(union).into())
        }
    }

    /// Builds a term query from a word.
    ///
    /// A word that analyzes to several tokens becomes a phrase. Tokens at
    /// the same position become alternatives, each adding one to the slop.
    pub fn term(&mut self, field: &Arc<str>, word: &str) -> Option<Query> {
        let mut tokens = self.streams.tokens(field, word).into_iter();
        let first = tokens.next()?;
        let Some(second) = tokens.next() else {
            return Some(Query::term(Arc::clone(field), first.text));
        };

        let mut phrase = PhraseQuery::new(Arc::clone(field));
        phrase.add_term(first.text, 0);
        for token in iter::once(second).chain(tokens) {
            if token.pos_inc == 0 {
                phrase.append_multi_term(token.text);
                phrase.slop = phrase.slop.saturating_add(1);
            } else {
                phrase.add_term(token.text, token.pos_inc);
            }
        }
        Some(QueryNode::Phrase(phrase).into())
    }

    /// Builds a fuzzy query from the first token of a word.
    pub fn fuzzy(&mut self, field: &Arc<str>, word: &str, similarity: Option<&str>) -> Option<Query> {
        let token = self.streams.first_token(field, word)?;
        let min_similarity = similarity
            .and_then(scan_float)
            .unwrap_or(self.config.fuzzy_min_similarity);
        Some(
            QueryNode::Fuzzy(FuzzyQuery {
                field: Arc::clone(field),
                term: token.text,
                min_similarity,
                prefix_length: self.config.fuzzy_prefix_length,
                max_terms: self.config.max_clauses,
            })
            .into(),
        )
    }

    /// Builds a wildcard query, simplifying where possible.
    ///
    /// `*` matches everything. A pattern whose only wildcard is a trailing
    /// `*` becomes a prefix query.
    pub fn wildcard(&mut self, field: &Arc<str>, pattern: &str) -> Option<Query> {
        let pattern = if self.config.wild_lower && self.streams.is_tokenized(field) {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };

        if pattern == "*" {
            return Some(Query::match_all());
        }

        let max_terms = self.config.max_clauses;
        if let Some(prefix) = pattern.strip_suffix('*')
            && !prefix.contains(['*', '?'])
        {
            trace!(field = %field, %pattern, "wildcard simplified to prefix query");
            return Some(
                QueryNode::Prefix(PrefixQuery {
                    field: Arc::clone(field),
                    prefix: prefix.to_string(),
                    max_terms,
                })
                .into(),
            );
        }

        Some(
            QueryNode::Wildcard(WildcardQuery {
                field: Arc::clone(field),
                pattern,
                max_terms,
            })
            .into(),
        )
    }

    /// Builds a range query. Either bound may be open.
    pub fn range(
        &self,
        field: &Arc<str>,
        lower: Option<&str>,
        upper: Option<&str>,
        include_lower: bool,
        include_upper: bool,
    ) -> Option<Query> {
        let fold = |bound: &str| {
            if self.config.wild_lower {
                bound.to_lowercase()
            } else {
                bound.to_string()
            }
        };
        Some(
            QueryNode::Range(RangeQuery {
                field: Arc::clone(field),
                lower: lower.map(fold),
                upper: upper.map(fold),
                include_lower,
                include_upper,
            })
            .into(),
        )
    }

    /// Builds a query from a quoted phrase.
    pub fn phrase(&mut self, field: &Arc<str>, phrase: &Phrase, slop: Option<&str>) -> Option<Query> {
        match phrase.slots.as_slice() {
            [] => None,
            [slot] => self.single_slot(field, slot),
            slots => self.multi_slot(field, slots, slop),
        }
    }

    /// A phrase with one slot: a term, or a disjunction of its alternatives.
    fn single_slot(&mut self, field: &Arc<str>, slot: &Slot) -> Option<Query> {
        if let [word] = slot.words.as_slice() {
            return self.term(field, word);
        }

        let mut terms: Vec<String> = slot
            .words
            .iter()
            .filter_map(|word| self.streams.first_token(field, word))
            .map(|token| token.text)
            .collect();

        match terms.len() {
            0 => Some(Query::empty()),
            1 => terms.pop().map(|term| Query::term(Arc::clone(field), term)),
            count => {
                let mut multi = MultiTermQuery::new(Arc::clone(field), count);
                for term in terms {
                    multi.add_term(term);
                }
                Some(QueryNode::MultiTerm(multi).into())
            }
        }
    }

    /// A phrase with several slots.
    ///
    /// Gaps written as `<>` and slots that analyze to nothing widen the
    /// distance to the next term. A slot that analyzed to nothing adds one to
    /// the slop, as does every extra token at the same position.
    fn multi_slot(&mut self, field: &Arc<str>, slots: &[Slot], slop: Option<&str>) -> Option<Query> {
        let mut query = PhraseQuery::new(Arc::clone(field));
        if let Some(slop) = slop.and_then(scan_int).and_then(|s| u32::try_from(s).ok()) {
            query.slop = slop;
        }

        let mut pos_inc: u32 = 0;
        for slot in slots {
            if pos_inc > 0 {
                query.slop = query.slop.saturating_add(1);
            }
            pos_inc = pos_inc.saturating_add(slot.gap).saturating_add(1);

            if let [word] = slot.words.as_slice() {
                for token in self.streams.tokens(field, word) {
                    if token.pos_inc > 0 {
                        let inc = if pos_inc > 0 { pos_inc } else { token.pos_inc };
                        query.add_term(token.text, inc);
                    } else {
                        query.append_multi_term(token.text);
                        query.slop = query.slop.saturating_add(1);
                    }
                    pos_inc = 0;
                }
            } else {
                let mut opened = false;
                for word in &slot.words {
                    let Some(token) = self.streams.first_token(field, word) else {
                        continue;
                    };
                    if opened {
                        query.append_multi_term(token.text);
                    } else {
                        let inc = if pos_inc > 0 { pos_inc } else { token.pos_inc };
                        query.add_term(token.text, inc);
                        opened = true;
                        pos_inc = 0;
                    }
                }
            }
        }

        if query.positions.is_empty() {
            None
        } else {
            Some(QueryNode::Phrase(query).into())
        }
    }
}
