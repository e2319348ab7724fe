//! Best-effort repair of query text before parsing.
//!
//! Cleaning makes most hand-typed queries parseable: special characters in
//! quoted phrases are escaped, unterminated quotes and groups are closed, and
//! a stray `)` gets a matching `(` at the front of the query.

/// Characters with a meaning inside a quoted phrase.
const PHRASE_CHARS: &str = "<>|\"";

/// Characters the lexer treats specially.
const SPECIAL_CHARS: &str = "&:()[]{}!\"~^|<>=*?+-";

/// Returns a cleaned copy of `query`.
///
/// Inside quotes every special character except `|` is escaped, and `<>` gap
/// markers are kept. A backslash inside quotes only survives in front of a
/// character that means something inside a phrase.
pub fn clean_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len() * 2);
    let mut previous: Option<char> = None;
    let mut open_groups = 0usize;
    let mut quote_open = false;

    for ch in query.chars() {
        if previous == Some('\\') {
            if quote_open && PHRASE_CHARS.contains(ch) {
                out.push('\\');
            }
            out.push(ch);
            // An escaped backslash escapes nothing further.
            previous = Some(if ch == '\\' { ':' } else { ch });
            continue;
        }

        match ch {
            '\\' => {
                if !quote_open {
                    out.push(ch);
                }
            }
            '"' => {
                quote_open = !quote_open;
                out.push(ch);
            }
            '(' => {
                if quote_open {
                    out.push('\\');
                } else {
                    open_groups += 1;
                }
                out.push(ch);
            }
            ')' => {
                if quote_open {
                    out.push('\\');
                } else if open_groups == 0 {
                    out.insert(0, '(');
                } else {
                    open_groups -= 1;
                }
                out.push(ch);
            }
            '>' => {
                if quote_open {
                    if previous == Some('<') {
                        // Turn the escaped `\<` back into a bare `<`.
                        out.pop();
                        out.pop();
                        out.push('<');
                    } else {
                        out.push('\\');
                    }
                }
                out.push(ch);
            }
            _ => {
                if quote_open && SPECIAL_CHARS.contains(ch) && ch != '|' {
                    out.push('\\');
                }
                out.push(ch);
            }
        }
        previous = Some(ch);
    }

    if quote_open {
        out.push('"');
    }
    for _ in 0..open_groups {
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(clean_query("title:rust -go"), "title:rust -go");
        assert_eq!(clean_query(""), "");
    }

    #[test]
    fn closes_quotes_and_groups() {
        assert_eq!(clean_query("\"hello world"), "\"hello world\"");
        assert_eq!(clean_query("((a b"), "((a b))");
    }

    #[test]
    fn stray_close_paren_opens_at_front() {
        assert_eq!(clean_query("a) b"), "(a) b");
        assert_eq!(clean_query("a)) b"), "((a)) b");
    }

    #[test]
    fn escapes_specials_in_phrase() {
        assert_eq!(clean_query("\"a:b (c)\""), "\"a\\:b \\(c\\)\"");
        assert_eq!(clean_query("\"a*b\""), "\"a\\*b\"");
    }

    #[test]
    fn keeps_pipes_and_gaps_in_phrase() {
        assert_eq!(clean_query("\"a|b <> c\""), "\"a|b <> c\"");
    }

    #[test]
    fn lone_angle_brackets_are_escaped() {
        assert_eq!(clean_query("\"a > b\""), "\"a \\> b\"");
        assert_eq!(clean_query("\"a < b\""), "\"a \\< b\"");
    }

    #[test]
    fn backslashes_in_phrase() {
        // Only escapes of phrase characters survive inside quotes.
        assert_eq!(clean_query("\"a\\\"b\""), "\"a\\\"b\"");
        assert_eq!(clean_query("\"a\\xb\""), "\"axb\"");
    }

    #[test]
    fn backslashes_outside_phrase_kept() {
        assert_eq!(clean_query("a\\)b"), "a\\)b");
        assert_eq!(clean_query("a\\\\)"), "(a\\\\)");
    }

    #[test]
    fn parens_in_phrase_are_not_counted() {
        assert_eq!(clean_query("\"(\" x"), "\"\\(\" x");
    }
}
