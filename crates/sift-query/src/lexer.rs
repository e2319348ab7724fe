//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser. The lexer
//! never fails: any character it does not treat specially becomes part of a
//! word, and the grammar decides what is acceptable.

/// Characters with a meaning of their own at the start of a token.
const SPECIAL_CHARS: &str = "&:()[]{}!\"~^|<>=*?+-";

/// Characters that end a word.
const NOT_WORD_CHARS: &str = " \t()[]{}!\"~^|<>=";

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A plain word, with escapes resolved.
    Word(String),

    /// A word containing an unescaped `*` or `?`.
    Wild(String),

    /// `AND` or `&&`.
    And,

    /// `OR` or `||`.
    Or,

    /// `NOT`, `-` or `!`.
    Not,

    /// `REQ` or `+`.
    Req,

    /// A single punctuation character: one of `: ( ) [ ] { } " ~ ^ | < > = *`.
    Char(char),
}

impl Token {
    /// Describes the token for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Word(w) | Self::Wild(w) => format!("`{w}`"),
            Self::And => "AND".to_string(),
            Self::Or => "OR".to_string(),
            Self::Not => "NOT".to_string(),
            Self::Req => "REQ".to_string(),
            Self::Char(c) => format!("`{c}`"),
        }
    }
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The token.
    pub token: Token,
    /// Byte offset of the token's first character.
    pub offset: usize,
}

/// Tokenizes a query string.
pub struct Lexer<'a> {
    /// The input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
    /// Whether `AND`, `OR`, `NOT` and `REQ` are operators.
    use_keywords: bool,
    /// Scratch buffer reused for every word.
    scratch: String,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    pub fn new(input: &'a str, use_keywords: bool) -> Self {
        Self {
            input,
            position: 0,
            use_keywords,
            scratch: String::with_capacity(64),
        }
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Lexeme> {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }

        let offset = self.position;
        let ch = self.peek()?;

        if SPECIAL_CHARS.contains(ch) {
            let next = self.peek_second();
            let token = match ch {
                '-' | '!' => Some(Token::Not),
                '+' => Some(Token::Req),
                '*' if next == Some(':') => Some(Token::Char('*')),
                '&' if next == Some('&') => {
                    self.advance();
                    Some(Token::And)
                }
                '|' if next == Some('|') => {
                    self.advance();
                    Some(Token::Or)
                }
                '*' | '?' | '&' => None,
                other => Some(Token::Char(other)),
            };
            if let Some(token) = token {
                self.advance();
                return Some(Lexeme { token, offset });
            }
        }

        let token = self.read_word();
        Some(Lexeme { token, offset })
    }

    /// Reads a word, a wildcard word, or a keyword.
    fn read_word(&mut self) -> Token {
        self.scratch.clear();
        let mut is_wild = false;

        while let Some(ch) = self.peek() {
            if NOT_WORD_CHARS.contains(ch) {
                break;
            }
            match ch {
                '\\' => {
                    self.advance();
                    match self.peek() {
                        Some(escaped) => {
                            self.scratch.push(escaped);
                            self.advance();
                        }
                        None => self.scratch.push('\\'),
                    }
                }
                ':' => {
                    if self.peek_second() != Some(':') {
                        break;
                    }
                    self.scratch.push_str("::");
                    self.advance();
                    self.advance();
                }
                '*' | '?' => {
                    is_wild = true;
                    self.scratch.push(ch);
                    self.advance();
                }
                _ => {
                    self.scratch.push(ch);
                    self.advance();
                }
            }
        }

        if self.use_keywords {
            match self.scratch.as_str() {
                "AND" => return Token::And,
                "OR" => return Token::Or,
                "NOT" => return Token::Not,
                "REQ" => return Token::Req,
                _ => {}
            }
        }

        let word = self.scratch.clone();
        if is_wild {
            Token::Wild(word)
        } else {
            Token::Word(word)
        }
    }

    /// Returns the character at the cursor.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the character after the one at the cursor.
    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    /// Advances past the character at the cursor.
    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        self.next_token()
    }
}

/// Tokenizes a whole query string.
pub fn tokenize(input: &str, use_keywords: bool) -> Vec<Lexeme> {
    Lexer::new(input, use_keywords).collect()
}
