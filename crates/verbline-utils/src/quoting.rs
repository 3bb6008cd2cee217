//! Token quoting for joined command lines
//!
//! Targets common shells, not POSIX-complete escaping: a token is wrapped in
//! double quotes only when it contains a space, a double quote or a single
//! quote, and embedded double quotes are escaped with a backslash.
//! [`split_quoted`] splits a joined line back into the original values.

use std::collections::HashSet;

const NEEDS_QUOTING: [char; 3] = [' ', '"', '\''];

/// Wrap `value` in double quotes when it contains a space or a quote character.
///
/// Values without those characters (including the empty string) are returned
/// verbatim.
///
/// # Example
///
/// ```rust
/// use verbline_utils::quoting::quote_if_needed;
///
/// assert_eq!(quote_if_needed("nginx"), "nginx");
/// assert_eq!(quote_if_needed("nginx 1.2"), "\"nginx 1.2\"");
/// assert_eq!(quote_if_needed("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
#[must_use]
pub fn quote_if_needed(value: &str) -> String {
    if value.contains(NEEDS_QUOTING) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Reverse [`quote_if_needed`] on a single token.
///
/// A token that starts and ends with a double quote has the quotes removed and
/// `\"` sequences unescaped. Any other token is returned unchanged.
#[must_use]
pub fn unquote(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        token[1..token.len() - 1].replace("\\\"", "\"")
    } else {
        token.to_string()
    }
}

/// Split a line of [`quote_if_needed`] tokens back into their values.
///
/// Spaces outside double quotes separate tokens. Inside double quotes the
/// only escape is `\"`; every other backslash is literal. A `\"` that ends a
/// token is read as an escaped quote first and, when that leaves the line
/// unparseable, as a trailing backslash followed by the closing quote, so
/// `"C:\my dir\"` yields `C:\my dir\`.
///
/// Lines are first read as whole-token quoting only, the form
/// [`quote_if_needed`] produces, which has a single reading. Hand-written
/// lines such as `--file="my file"` fall back to quotes opening and closing
/// anywhere in a token.
///
/// Returns `None` when a quoted section is never closed.
///
/// # Example
///
/// ```rust
/// use verbline_utils::quoting::split_quoted;
///
/// let tokens = split_quoted(r#"cp --source "\\server\share dir" "C:\my dir\""#).unwrap();
/// assert_eq!(tokens, ["cp", "--source", r"\\server\share dir", r"C:\my dir\"]);
/// assert_eq!(split_quoted("--file=\"my file\"").unwrap(), ["--file=my file"]);
/// assert_eq!(split_quoted("run \"unterminated"), None);
/// ```
#[must_use]
pub fn split_quoted(line: &str) -> Option<Vec<String>> {
    let chars: Vec<char> = line.chars().collect();
    Splitter::new(&chars, true)
        .split_from(0)
        .or_else(|| Splitter::new(&chars, false).split_from(0))
}

/// Backtracking tokenizer over one line.
struct Splitter<'a> {
    chars: &'a [char],
    /// Quotes may only wrap whole tokens.
    whole_tokens: bool,
    /// Token start offsets known not to parse.
    failed: HashSet<usize>,
}

impl<'a> Splitter<'a> {
    fn new(chars: &'a [char], whole_tokens: bool) -> Self {
        Self {
            chars,
            whole_tokens,
            failed: HashSet::new(),
        }
    }

    fn split_from(&mut self, start: usize) -> Option<Vec<String>> {
        let Some(start) = (start..self.chars.len()).find(|&at| self.chars[at] != ' ') else {
            return Some(Vec::new());
        };
        if self.failed.contains(&start) {
            return None;
        }

        let tokens = self.scan(start, String::new(), false);
        if tokens.is_none() {
            self.failed.insert(start);
        }
        tokens
    }

    /// Continue the token begun in `token`, then split the rest of the line.
    fn scan(&mut self, mut at: usize, mut token: String, mut quoted: bool) -> Option<Vec<String>> {
        while let Some(&c) = self.chars.get(at) {
            if !quoted {
                match c {
                    ' ' => break,
                    '"' if self.whole_tokens && !self.starts_token(at) => return None,
                    '"' => quoted = true,
                    _ => token.push(c),
                }
                at += 1;
            } else if c == '"' {
                at += 1;
                if self.whole_tokens && !self.ends_token(at) {
                    return None;
                }
                quoted = false;
            } else if c == '\\' && self.chars.get(at + 1) == Some(&'"') {
                at += 2;
                if !self.ends_token(at) {
                    token.push('"');
                    continue;
                }
                let mut escaped = token.clone();
                escaped.push('"');
                if let Some(tokens) = self.scan(at, escaped, true) {
                    return Some(tokens);
                }
                token.push('\\');
                quoted = false;
            } else {
                token.push(c);
                at += 1;
            }
        }

        if quoted {
            return None;
        }
        let mut tokens = vec![token];
        tokens.extend(self.split_from(at)?);
        Some(tokens)
    }

    fn starts_token(&self, at: usize) -> bool {
        at == 0 || self.chars[at - 1] == ' '
    }

    fn ends_token(&self, at: usize) -> bool {
        self.chars.get(at).is_none_or(|&c| c == ' ')
    }
}
