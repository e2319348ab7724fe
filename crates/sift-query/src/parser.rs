//! Query parser.
//!
//! Parses a token stream into a query tree using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query     → ε | clauses
//! clauses   → clause (("AND" | "OR")? clause)*
//! clause    → ("+" | "REQ") boosted | ("-" | "!" | "NOT") boosted | boosted
//! boosted   → primary ("^" WORD)*
//! primary   → WORD | WORD "~" WORD? | WILD
//!           | "(" ")" | "(" clauses ")"
//!           | field ":" primary | "*" ":" primary
//!           | phrase | range
//! field     → WORD ("|" WORD)*
//! phrase    → '"' words? '"' ("~" WORD)?
//! words     → (WORD | "<" ">") (WORD | "<" ">" | "|" WORD)*
//! range     → ("[" | "{") WORD WORD ("]" | "}") | ("[" | "{") WORD ">"
//!           | "<" WORD ("]" | "}")? | "<" "=" WORD | ">" "=" WORD | ">" WORD
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Primaries: terms, phrases, ranges, groups, field prefixes
//! 2. Boost: `^2`
//! 3. Prefix operators: `+`, `-`, `!`
//! 4. Joins: `AND`, `OR` and juxtaposition, left to right
//!
//! A primary that analyzes to nothing is absent rather than an error, and
//! absent clauses are skipped when joined.

use std::{borrow::Cow, sync::Arc};

use parking_lot::Mutex;
use sift_analysis::Analyzer;
use tracing::{debug, warn};

use crate::{
    ast::{Clause, Occur, Query},
    clauses::ClauseArray,
    clean::clean_query,
    config::ParserConfig,
    error::{QueryError, SyntaxError},
    factory::{Factory, scan_float},
    fields::FieldScope,
    lexer::{Lexeme, Token, tokenize},
    phrase::Phrase,
    session::{Session, StreamCache},
};

/// Result type used inside the grammar.
type ParseResult<T> = Result<T, SyntaxError>;

/// Parses query text into query trees.
///
/// A parser is built once for a field layout and analyzer and then reused.
/// It is `Send + Sync`; concurrent calls to [`parse`](Self::parse) take turns
/// on an internal lock that guards the field scope and the token stream
/// cache.
pub struct QueryParser {
    /// Parsing options.
    config: ParserConfig,
    /// State reused across parses.
    session: Mutex<Session>,
}

impl QueryParser {
    /// Creates a parser.
    pub fn new(config: ParserConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        let fields = FieldScope::new(
            &config.all_fields,
            &config.default_fields,
            config.allow_any_fields,
        );
        let streams = StreamCache::new(analyzer, config.tokenized_fields.clone());
        Self {
            config,
            session: Mutex::new(Session { fields, streams }),
        }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the fields searched when a query names none.
    pub fn default_fields(&self) -> Vec<String> {
        let session = self.session.lock();
        session
            .fields
            .defaults()
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    /// Parses `query` into a query tree.
    ///
    /// Input that produces no query at all, including the empty string,
    /// yields [`Query::empty`]. A syntax error is returned as a
    /// [`QueryError`], unless the parser handles parse errors, in which case
    /// the whole input is searched as a single term in the default fields.
    pub fn parse(&self, query: &str) -> Result<Query, QueryError> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.fields.reset();

        let text: Cow<'_, str> = if self.config.clean_str {
            Cow::Owned(clean_query(query))
        } else {
            Cow::Borrowed(query)
        };

        let lexemes = tokenize(&text, self.config.use_keywords);
        let outcome = Parser::new(lexemes, text.len(), &self.config, session).parse();

        match outcome {
            Ok(Some(parsed)) => {
                debug!(query = %text, "parsed query");
                Ok(parsed)
            }
            Ok(None) if self.config.handle_parse_errors => {
                Ok(self.fallback(session, &text).unwrap_or_else(Query::empty))
            }
            Ok(None) => Ok(Query::empty()),
            Err(err) if self.config.handle_parse_errors => {
                debug!(query = %text, error = %err.message, "falling back to term query");
                Ok(self.fallback(session, &text).unwrap_or_else(Query::empty))
            }
            Err(err) => {
                let err = QueryError::from_syntax(err, &text);
                warn!(query = %text, error = %err.message(), "query parse failed");
                Err(err)
            }
        }
    }

    /// Searches the whole text as one term in the default fields.
    fn fallback(&self, session: &mut Session, text: &str) -> Option<Query> {
        session.fields.reset();
        let fields = session.fields.active().clone();
        Factory::new(&self.config, &mut session.streams)
            .expand(&fields, |factory, field| factory.term(field, text))
    }
}

/// Recursive descent parser over one query's tokens.
struct Parser<'a> {
    /// Token stream to parse.
    lexemes: Vec<Lexeme>,
    /// Current position in token stream.
    position: usize,
    /// Length of the input, reported for errors at the end.
    input_len: usize,
    /// Parsing options.
    config: &'a ParserConfig,
    /// Field scope and stream cache.
    session: &'a mut Session,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `lexemes`.
    fn new(
        lexemes: Vec<Lexeme>,
        input_len: usize,
        config: &'a ParserConfig,
        session: &'a mut Session,
    ) -> Self {
        Self {
            lexemes,
            position: 0,
            input_len,
            config,
            session,
        }
    }

    /// Parses: query → ε | clauses
    fn parse(mut self) -> ParseResult<Option<Query>> {
        if self.peek().is_none() {
            return Ok(None);
        }

        let clauses = self.parse_clauses()?;

        if let Some(token) = self.peek() {
            return Err(self.error(format!("unexpected {}", token.describe())));
        }

        Ok(clauses.into_query())
    }

    /// Parses: clauses → clause (("AND" | "OR")? clause)*
    fn parse_clauses(&mut self) -> ParseResult<ClauseArray> {
        let mut clauses = ClauseArray::first(self.parse_clause()?);

        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.advance();
                    clauses.add_and(self.parse_clause()?);
                }
                Some(Token::Or) => {
                    self.advance();
                    clauses.add_or(self.parse_clause()?);
                }
                Some(token) if starts_clause(token) => {
                    clauses.add_default(self.parse_clause()?, self.config.or_default);
                }
                _ => break,
            }
        }

        Ok(clauses)
    }

    /// Parses: clause → REQ boosted | NOT boosted | boosted
    fn parse_clause(&mut self) -> ParseResult<Option<Clause>> {
        let occur = match self.peek() {
            Some(Token::Req) => {
                self.advance();
                Occur::Must
            }
            Some(Token::Not) => {
                self.advance();
                Occur::MustNot
            }
            _ => Occur::Should,
        };

        let query = self.parse_boosted()?;
        Ok(query.map(|q| Clause::new(q, occur)))
    }

    /// Parses: boosted → primary ("^" WORD)?
    ///
    /// A boost that is not a number leaves the boost unchanged.
    fn parse_boosted(&mut self) -> ParseResult<Option<Query>> {
        let mut query = self.parse_primary()?;

        if self.check_char('^') {
            self.advance();
            let Some(Token::Word(text)) = self.peek().cloned() else {
                return Err(self.error("expected a number after `^`"));
            };
            self.advance();
            if let Some(q) = query.as_mut()
                && let Some(boost) = scan_float(&text)
            {
                q.boost = boost;
            }
        }

        Ok(query)
    }

    /// Parses a primary query.
    fn parse_primary(&mut self) -> ParseResult<Option<Query>> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.error("unexpected end of query"));
        };

        match token {
            Token::Word(word) => {
                if matches!(self.peek_nth(1), Some(Token::Char(':' | '|'))) {
                    return self.parse_field_query();
                }
                self.advance();
                self.parse_term(word)
            }
            Token::Wild(pattern) => {
                self.advance();
                Ok(self.build(|factory, field| factory.wildcard(field, &pattern)))
            }
            Token::Char('(') => self.parse_group(),
            Token::Char('*') => {
                self.advance();
                self.expect_char(':', "expected `:` after `*`")?;
                self.session.fields.enter_all();
                let query = self.parse_primary()?;
                self.session.fields.reset();
                Ok(query)
            }
            Token::Char('"') => self.parse_phrase(),
            Token::Char('[' | '{' | '<' | '>') => self.parse_range(),
            other => Err(self.error(format!("unexpected {}", other.describe()))),
        }
    }

    /// Parses: WORD | WORD "~" WORD?
    fn parse_term(&mut self, word: String) -> ParseResult<Option<Query>> {
        if !self.check_char('~') {
            return Ok(self.build(|factory, field| factory.term(field, &word)));
        }
        self.advance();

        let similarity = match self.peek() {
            Some(Token::Word(text)) => {
                let text = text.clone();
                self.advance();
                Some(text)
            }
            _ => None,
        };
        Ok(self.build(|factory, field| factory.fuzzy(field, &word, similarity.as_deref())))
    }

    /// Parses: "(" ")" | "(" clauses ")"
    ///
    /// An empty group is absent.
    fn parse_group(&mut self) -> ParseResult<Option<Query>> {
        self.advance();
        if self.check_char(')') {
            self.advance();
            return Ok(None);
        }

        let clauses = self.parse_clauses()?;
        self.expect_char(')', "expected closing parenthesis")?;
        Ok(clauses.into_query())
    }

    /// Parses: field ":" primary
    ///
    /// The primary is built against the named fields. The default fields
    /// are active again afterwards, also inside an enclosing field group.
    fn parse_field_query(&mut self) -> ParseResult<Option<Query>> {
        let mut names = Vec::new();
        if let Some(Token::Word(name)) = self.peek().cloned() {
            names.push(name);
            self.advance();
        }

        while self.check_char('|') {
            self.advance();
            let Some(Token::Word(name)) = self.peek().cloned() else {
                return Err(self.error("expected a field name after `|`"));
            };
            names.push(name);
            self.advance();
        }

        self.expect_char(':', "expected `:` after field list")?;
        if self.peek().is_none() {
            return Err(self.error(format!("expected a query after field `{}`", names.join("|"))));
        }

        self.session.fields.enter_explicit(&names);
        let query = self.parse_primary()?;
        self.session.fields.reset();
        Ok(query)
    }

    /// Parses: '"' words? '"' ("~" WORD)?
    fn parse_phrase(&mut self) -> ParseResult<Option<Query>> {
        self.advance();

        if self.check_char('"') {
            self.advance();
            self.parse_phrase_slop()?;
            return Ok(None);
        }

        let mut phrase = match self.next_phrase_word()? {
            PhraseItem::Word(word) => Phrase::first_word(Some(word)),
            PhraseItem::Gap => Phrase::first_word(None),
            PhraseItem::Alternative(_) | PhraseItem::End => {
                return Err(self.error("expected a word in phrase"));
            }
        };

        loop {
            match self.next_phrase_word()? {
                PhraseItem::Word(word) => phrase.add_word(Some(word)),
                PhraseItem::Gap => phrase.add_word(None),
                PhraseItem::Alternative(word) => phrase.add_multi_word(word),
                PhraseItem::End => break,
            }
        }

        let slop = self.parse_phrase_slop()?;
        Ok(self.build(|factory, field| factory.phrase(field, &phrase, slop.as_deref())))
    }

    /// Consumes the next element of a phrase body.
    fn next_phrase_word(&mut self) -> ParseResult<PhraseItem> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.error("expected closing quote"));
        };
        self.advance();

        match token {
            Token::Word(word) => Ok(PhraseItem::Word(word)),
            Token::Char('"') => Ok(PhraseItem::End),
            Token::Char('<') => {
                self.expect_char('>', "expected `>` after `<` in phrase")?;
                Ok(PhraseItem::Gap)
            }
            Token::Char('|') => match self.peek().cloned() {
                Some(Token::Word(word)) => {
                    self.advance();
                    Ok(PhraseItem::Alternative(word))
                }
                _ => Err(self.error("expected a word after `|` in phrase")),
            },
            other => {
                self.position -= 1;
                Err(self.error(format!("unexpected {} in phrase", other.describe())))
            }
        }
    }

    /// Parses an optional `~WORD` after a phrase.
    fn parse_phrase_slop(&mut self) -> ParseResult<Option<String>> {
        if !self.check_char('~') {
            return Ok(None);
        }
        self.advance();
        match self.peek().cloned() {
            Some(Token::Word(slop)) => {
                self.advance();
                Ok(Some(slop))
            }
            _ => Err(self.error("expected a number after `~`")),
        }
    }

    /// Parses a range.
    fn parse_range(&mut self) -> ParseResult<Option<Query>> {
        let Some(Token::Char(open)) = self.peek().cloned() else {
            return Err(self.error("expected a range"));
        };
        self.advance();

        let (lower, upper, include_lower, include_upper) = match open {
            '[' | '{' => {
                let include_lower = open == '[';
                let lower = self.expect_range_bound()?;
                match self.peek().cloned() {
                    Some(Token::Word(upper)) => {
                        self.advance();
                        let include_upper = match self.peek() {
                            Some(Token::Char(']')) => true,
                            Some(Token::Char('}')) => false,
                            _ => return Err(self.error("expected `]` or `}` to close range")),
                        };
                        self.advance();
                        (Some(lower), Some(upper), include_lower, include_upper)
                    }
                    Some(Token::Char('>')) => {
                        self.advance();
                        (Some(lower), None, include_lower, false)
                    }
                    _ => return Err(self.error("expected an upper bound or `>` in range")),
                }
            }
            '<' => {
                if self.check_char('=') {
                    self.advance();
                    (None, Some(self.expect_range_bound()?), false, true)
                } else {
                    let upper = self.expect_range_bound()?;
                    let include_upper = match self.peek() {
                        Some(Token::Char(']')) => {
                            self.advance();
                            true
                        }
                        Some(Token::Char('}')) => {
                            self.advance();
                            false
                        }
                        _ => false,
                    };
                    (None, Some(upper), false, include_upper)
                }
            }
            _ => {
                let include_lower = self.check_char('=');
                if include_lower {
                    self.advance();
                }
                (Some(self.expect_range_bound()?), None, include_lower, false)
            }
        };

        Ok(self.build(|factory, field| {
            factory.range(
                field,
                lower.as_deref(),
                upper.as_deref(),
                include_lower,
                include_upper,
            )
        }))
    }

    /// Consumes a range bound.
    fn expect_range_bound(&mut self) -> ParseResult<String> {
        match self.peek().cloned() {
            Some(Token::Word(bound)) => {
                self.advance();
                Ok(bound)
            }
            _ => Err(self.error("expected a range bound")),
        }
    }

    /// Builds a primary against every field in the active scope.
    fn build<F>(&mut self, build: F) -> Option<Query>
    where
        F: for<'f> FnMut(&mut Factory<'f>, &Arc<str>) -> Option<Query>,
    {
        let fields = self.session.fields.active().clone();
        Factory::new(self.config, &mut self.session.streams).expand(&fields, build)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    /// Returns the token `n` places ahead without consuming anything.
    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.lexemes.get(self.position + n).map(|l| &l.token)
    }

    /// Checks whether the current token is the punctuation character `c`.
    fn check_char(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Char(found)) if *found == c)
    }

    /// Consumes the punctuation character `c` or fails with `message`.
    fn expect_char(&mut self, c: char, message: &str) -> ParseResult<()> {
        if self.check_char(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.lexemes.len() {
            self.position += 1;
        }
    }

    /// Creates an error at the current token.
    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let offset = self
            .lexemes
            .get(self.position)
            .map_or(self.input_len, |l| l.offset);
        SyntaxError::new(message, offset)
    }
}

/// One element of a phrase body.
enum PhraseItem {
    /// A word opening a new slot.
    Word(String),
    /// A `<>` gap.
    Gap,
    /// A `|word` alternative for the last slot.
    Alternative(String),
    /// The closing quote.
    End,
}

/// Returns true if `token` can begin a clause.
fn starts_clause(token: &Token) -> bool {
    matches!(
        token,
        Token::Word(_)
            | Token::Wild(_)
            | Token::Not
            | Token::Req
            | Token::Char('(' | '"' | '[' | '{' | '<' | '>' | '*')
    )
}

#[cfg(test)]
mod tests {
    use sift_analysis::WhitespaceAnalyzer;

    use super::*;
    use crate::ast::{BooleanQuery, QueryNode};

    fn parser(config: ParserConfig) -> QueryParser {
        QueryParser::new(config, Arc::new(WhitespaceAnalyzer::new(true)))
    }

    fn body_parser() -> QueryParser {
        parser(ParserConfig::new(["body"]))
    }

    fn parse(input: &str) -> Query {
        body_parser().parse(input).unwrap()
    }

    fn term(field: &str, text: &str) -> Query {
        Query::term(Arc::from(field), text)
    }

    fn boolean(query: &Query) -> &BooleanQuery {
        match &query.node {
            QueryNode::Boolean(bq) => bq,
            other => panic!("expected boolean, got {other:?}"),
        }
    }

    fn occurs(query: &Query) -> Vec<Occur> {
        boolean(query).clauses.iter().map(|c| c.occur).collect()
    }

    fn parse_err(input: &str) -> QueryError {
        body_parser().parse(input).unwrap_err()
    }

    #[test]
    fn empty_input_is_empty_query() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn single_term() {
        assert_eq!(parse("Rust"), term("body", "rust"));
    }

    #[test]
    fn default_or() {
        let q = parse("a b");
        assert_eq!(occurs(&q), [Occur::Should, Occur::Should]);
        assert!(boolean(&q).coord_disabled);
    }

    #[test]
    fn default_and() {
        let p = parser(ParserConfig::new(["body"]).with_or_default(false));
        let q = p.parse("a b -c").unwrap();
        assert_eq!(occurs(&q), [Occur::Must, Occur::Must, Occur::MustNot]);
    }

    #[test]
    fn explicit_operators() {
        for input in ["a AND b", "a && b", "+a +b"] {
            assert_eq!(occurs(&parse(input)), [Occur::Must, Occur::Must], "{input}");
        }
        for input in ["a OR b", "a || b"] {
            assert_eq!(occurs(&parse(input)), [Occur::Should, Occur::Should]);
        }
    }

    #[test]
    fn req_keyword_joins_by_default() {
        let q = parse("a REQ b");
        assert_eq!(occurs(&q), [Occur::Should, Occur::Must]);
    }

    #[test]
    fn lone_negation() {
        for input in ["-a", "!a", "NOT a"] {
            let q = parse(input);
            assert_eq!(occurs(&q), [Occur::MustNot, Occur::Must], "{input}");
            assert_eq!(boolean(&q).clauses[1].query, Query::match_all());
        }
    }

    #[test]
    fn groups() {
        let q = parse("a (b c)");
        let outer = boolean(&q);
        assert_eq!(outer.clauses.len(), 2);
        assert_eq!(boolean(&outer.clauses[1].query).clauses.len(), 2);
    }

    #[test]
    fn empty_group_is_absent() {
        assert!(parse("()").is_empty());
        assert_eq!(parse("a ()"), term("body", "a"));
    }

    #[test]
    fn boost() {
        assert_eq!(parse("a^2").boost, 2.0);
        assert_eq!(parse("a^2.5abc").boost, 2.5);
        assert_eq!(parse("a^x").boost, 1.0);
        assert_eq!(parse("(a b)^3").boost, 3.0);
        assert_eq!(parse_err("a^2^4").message(), "unexpected `^`");
    }

    #[test]
    fn fuzzy() {
        let q = parse("roam~");
        assert!(matches!(q.node, QueryNode::Fuzzy(ref f) if f.min_similarity == 0.5));
        let q = parse("roam~0.8");
        assert!(matches!(q.node, QueryNode::Fuzzy(ref f) if f.min_similarity == 0.8));
    }

    #[test]
    fn wildcard_forms() {
        assert_eq!(parse("*"), Query::match_all());
        assert!(matches!(parse("abc*").node, QueryNode::Prefix(ref p) if p.prefix == "abc"));
        assert!(matches!(parse("a*c*").node, QueryNode::Wildcard(_)));
    }

    #[test]
    fn field_prefix() {
        let p = parser(ParserConfig::new(["title", "body"]).with_default_fields(["body"]));
        assert_eq!(p.parse("title:Rust").unwrap(), term("title", "rust"));
        assert_eq!(p.parse("rust").unwrap(), term("body", "rust"));
    }

    #[test]
    fn unknown_field_is_absent() {
        let p = parser(ParserConfig::new(["title", "body"]).with_default_fields(["body"]));
        assert!(p.parse("author:smith").unwrap().is_empty());
        assert_eq!(p.parse("author:smith x").unwrap(), term("body", "x"));
    }

    #[test]
    fn field_scope_ends_after_primary() {
        let p = parser(ParserConfig::new(["title", "body"]).with_default_fields(["body"]));
        let q = p.parse("title:a b").unwrap();
        let bq = boolean(&q);
        assert_eq!(bq.clauses[0].query, term("title", "a"));
        assert_eq!(bq.clauses[1].query, term("body", "b"));
    }

    #[test]
    fn nested_field_prefix_returns_to_defaults() {
        let p = parser(
            ParserConfig::new(["title", "body", "text"]).with_default_fields(["text"]),
        );
        let q = p.parse("title:(a body:b c)").unwrap();
        let group = boolean(&q);
        let terms: Vec<&Query> = group.clauses.iter().map(|c| &c.query).collect();
        assert_eq!(
            terms,
            [&term("title", "a"), &term("body", "b"), &term("text", "c")]
        );
    }

    #[test]
    fn all_fields_prefix_ends_after_primary() {
        let p = parser(ParserConfig::new(["title", "body"]).with_default_fields(["body"]));
        let q = p.parse("*:a b").unwrap();
        let bq = boolean(&q);
        assert_eq!(boolean(&bq.clauses[0].query).clauses.len(), 2);
        assert_eq!(bq.clauses[1].query, term("body", "b"));
    }

    #[test]
    fn field_group_and_list() {
        let p = parser(ParserConfig::new(["title", "body", "tags"]).with_default_fields(["body"]));
        let q = p.parse("title|tags:(a b)").unwrap();
        let bq = boolean(&q);
        assert_eq!(bq.clauses.len(), 2);
        let first = boolean(&bq.clauses[0].query);
        assert_eq!(first.clauses[0].query, term("title", "a"));
        assert_eq!(first.clauses[1].query, term("tags", "a"));
        assert!(!first.coord_disabled);
    }

    #[test]
    fn star_field_uses_all_fields() {
        let p = parser(ParserConfig::new(["title", "body"]).with_default_fields(["body"]));
        let q = p.parse("*:a").unwrap();
        assert_eq!(boolean(&q).clauses.len(), 2);
    }

    #[test]
    fn phrases() {
        let q = parse("\"quick fox\"~2");
        let QueryNode::Phrase(pq) = &q.node else {
            panic!("expected phrase");
        };
        assert_eq!(pq.slop, 2);
        assert_eq!(pq.positions.len(), 2);

        let QueryNode::Phrase(pq) = parse("\"quick <> fox\"").node else {
            panic!("expected phrase");
        };
        assert_eq!(pq.slop, 0);
        assert_eq!(pq.positions[1].position, 2);

        assert_eq!(parse("\"Fox\""), term("body", "fox"));
        assert!(parse("\"\"").is_empty());
        assert!(parse("\"\"~3").is_empty());
        assert!(matches!(parse("\"red|blue\"").node, QueryNode::MultiTerm(_)));
    }

    #[test]
    fn ranges() {
        let range = |input: &str| match parse(input).node {
            QueryNode::Range(r) => (r.lower, r.upper, r.include_lower, r.include_upper),
            other => panic!("expected range, got {other:?}"),
        };
        let s = |v: &str| Some(v.to_string());
        assert_eq!(range("[a b]"), (s("a"), s("b"), true, true));
        assert_eq!(range("[a b}"), (s("a"), s("b"), true, false));
        assert_eq!(range("{a b]"), (s("a"), s("b"), false, true));
        assert_eq!(range("{A B}"), (s("a"), s("b"), false, false));
        assert_eq!(range("[a>"), (s("a"), None, true, false));
        assert_eq!(range("{a>"), (s("a"), None, false, false));
        assert_eq!(range("<b"), (None, s("b"), false, false));
        assert_eq!(range("<b]"), (None, s("b"), false, true));
        assert_eq!(range("<b}"), (None, s("b"), false, false));
        assert_eq!(range("<=b"), (None, s("b"), false, true));
        assert_eq!(range(">=a"), (s("a"), None, true, false));
        assert_eq!(range(">a"), (s("a"), None, false, false));
    }

    #[test]
    fn syntax_errors() {
        assert!(parse_err("(a b").message().contains("closing parenthesis"));
        assert!(parse_err("\"a b").message().contains("closing quote"));
        assert!(parse_err("a OR").message().contains("end of query"));
        assert!(parse_err("AND a").message().contains("AND"));
        assert!(parse_err("a)").message().contains("`)`"));
        assert!(parse_err("[a b").message().contains("range"));
        assert!(parse_err("a^").message().contains("`^`"));
        assert!(parse_err("title:").message().contains("after field"));
    }

    #[test]
    fn error_carries_query_and_position() {
        let err = parse_err("a b)");
        assert_eq!(err.query, "a b)");
        assert_eq!(err.position(), 3);
        assert_eq!(err.to_string(), "couldn't parse query `a b)`: unexpected `)`");
    }

    #[test]
    fn lenient_mode_falls_back_to_term() {
        let p = parser(ParserConfig::new(["body"]).with_handle_parse_errors(true));
        let q = p.parse("hello)").unwrap();
        assert_eq!(q, term("body", "hello)"));
    }

    #[test]
    fn clean_mode_repairs_input() {
        let p = parser(ParserConfig::new(["body"]).with_clean_str(true));
        let q = p.parse("(a b").unwrap();
        assert_eq!(boolean(&q).clauses.len(), 2);
    }

    #[test]
    fn keywords_can_be_disabled() {
        let p = parser(ParserConfig::new(["body"]).with_use_keywords(false));
        let q = p.parse("a AND b").unwrap();
        assert_eq!(boolean(&q).clauses.len(), 3);
    }

    #[test]
    fn parser_is_reusable() {
        let p = body_parser();
        assert!(p.parse("(").is_err());
        assert_eq!(p.parse("a").unwrap(), term("body", "a"));
        assert_eq!(p.default_fields(), ["body"]);
    }
}
