use std::fmt;

use crate::error::TokenizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    CaptureStart,    // (
    NonCaptureStart, // (?:
    LookaheadStart,  // (?=
    ReferenceStart,  // (?<digit>
    Char,            // a-z
    Or,              // |
    Star,            // *
    Close,           // )
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::CaptureStart => "'('",
            TokenKind::NonCaptureStart => "'(?:'",
            TokenKind::LookaheadStart => "'(?='",
            TokenKind::ReferenceStart => "back-reference",
            TokenKind::Char => "character",
            TokenKind::Or => "'|'",
            TokenKind::Star => "'*'",
            TokenKind::Close => "')'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token. `payload` holds the letter of a `Char` and the digit of a
/// `ReferenceStart`; `offset` is the byte offset of the token's first
/// character in the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: Option<char>,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Token {
            kind,
            payload: None,
            offset,
        }
    }

    pub fn with_payload(kind: TokenKind, payload: char, offset: usize) -> Self {
        Token {
            kind,
            payload: Some(payload),
            offset,
        }
    }
}

pub fn tokenize(pattern: &str) -> Result<Vec<Token>, TokenizeError> {
    if pattern.is_empty() {
        return Err(TokenizeError::EmptyInput);
    }

    let mut tokens = Vec::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '(' => {
                // `(` is a capture start unless `?` follows; a trailing `(` can't open anything
                let Some(&(_, next)) = chars.peek() else {
                    return Err(TokenizeError::UnexpectedEof {
                        offset: pattern.len(),
                    });
                };
                if next != '?' {
                    tokens.push(Token::new(TokenKind::CaptureStart, offset));
                    continue;
                }
                chars.next();
                match chars.next() {
                    Some((_, ':')) => tokens.push(Token::new(TokenKind::NonCaptureStart, offset)),
                    Some((_, '=')) => tokens.push(Token::new(TokenKind::LookaheadStart, offset)),
                    Some((_, digit)) if digit.is_ascii_digit() => {
                        tokens.push(Token::with_payload(TokenKind::ReferenceStart, digit, offset))
                    }
                    Some((at, other)) => {
                        return Err(TokenizeError::BadGroupPrefix {
                            ch: other,
                            offset: at,
                        });
                    }
                    None => {
                        return Err(TokenizeError::UnexpectedEof {
                            offset: pattern.len(),
                        });
                    }
                }
            }
            ')' => tokens.push(Token::new(TokenKind::Close, offset)),
            '|' => tokens.push(Token::new(TokenKind::Or, offset)),
            '*' => tokens.push(Token::new(TokenKind::Star, offset)),
            c if c.is_ascii_lowercase() => {
                tokens.push(Token::with_payload(TokenKind::Char, c, offset))
            }
            other => return Err(TokenizeError::UnexpectedChar { ch: other, offset }),
        }
    }
    Ok(tokens)
}
