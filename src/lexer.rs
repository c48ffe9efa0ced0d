use std::sync::LazyLock;

use num_bigint::BigInt;
use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::ast::{CommandKind, CompareOp, Token, TokenKind};

pub use crate::ast::Position;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+").expect("whitespace pattern compiles"));

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]*)""#).expect("double-quote pattern compiles"));

static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'([^']*)'").expect("single-quote pattern compiles"));

// Alphanumerics plus symbols; never `= < > ( ) | ,`, quotes or whitespace.
static BARE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\-$.*!:/@#%+?\&\[\]{}\~^\\]+").expect("bare word pattern compiles")
});

/// Errors raised while splitting query text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting at {position}: missing closing {delimiter}")]
    UnterminatedString { delimiter: char, position: Position },

    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

/// Lazy tokenizer over query text.
///
/// Yields every token including whitespace, so the source can be
/// reconstructed from the stream. Stops after the first error.
pub struct Lexer<'a> {
    input: &'a str,
    position: Position,
    depth: usize,
    segment_start: bool,
    commands: bool,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: Position::start(),
            depth: 0,
            segment_start: true,
            commands: true,
            failed: false,
        }
    }

    /// Lexer for a standalone expression, where `search`, `where`, `eval` and
    /// `stats` are ordinary words.
    pub fn expression(input: &'a str) -> Self {
        Lexer {
            commands: false,
            ..Lexer::new(input)
        }
    }

    fn rest(&self) -> &'a str {
        let input = self.input;
        &input[self.position.offset..]
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let input = self.input;
        let start = self.position;
        let text = &input[start.offset..start.offset + len];
        self.position.advance_over(text);
        Token::new(kind, text, start)
    }

    fn read_quoted(&mut self, delimiter: char) -> Result<Token, LexError> {
        let pattern = if delimiter == '"' {
            &DOUBLE_QUOTED
        } else {
            &SINGLE_QUOTED
        };

        let Some(captures) = pattern.captures(self.rest()) else {
            return Err(LexError::UnterminatedString {
                delimiter,
                position: self.position,
            });
        };

        let len = captures[0].len();
        let value = captures[1].to_string();
        Ok(self.emit(TokenKind::Quoted { value, delimiter }, len))
    }

    fn read_word(&mut self, ch: char) -> Result<Token, LexError> {
        let Some(found) = BARE_WORD.find(self.rest()) else {
            return Err(LexError::UnexpectedCharacter {
                ch,
                position: self.position,
            });
        };
        let word = found.as_str();
        let len = word.len();

        if word.bytes().all(|b| b.is_ascii_digit())
            && let Ok(value) = word.parse::<BigInt>()
        {
            return Ok(self.emit(TokenKind::Number(value), len));
        }

        if self.commands
            && self.segment_start
            && self.ends_word(len)
            && let Some(kind) = CommandKind::from_keyword(word)
        {
            return Ok(self.emit(TokenKind::Command(kind), len));
        }

        Ok(self.emit(TokenKind::Word(word.to_string()), len))
    }

    /// A command keyword must be followed by whitespace, a pipe, or the end.
    fn ends_word(&self, len: usize) -> bool {
        match self.rest()[len..].chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || c == '|',
        }
    }

    fn compare(&mut self, single: CompareOp, with_eq: CompareOp) -> Token {
        if self.rest()[1..].starts_with('=') {
            self.emit(TokenKind::Compare(with_eq), 2)
        } else {
            self.emit(TokenKind::Compare(single), 1)
        }
    }

    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        let ch = self.rest().chars().next()?;

        let token = match ch {
            c if c.is_whitespace() => {
                let len = WHITESPACE.find(self.rest()).map_or(c.len_utf8(), |m| m.len());
                return Some(Ok(self.emit(TokenKind::Whitespace, len)));
            }
            '|' => {
                let token = self.emit(TokenKind::Pipe, 1);
                if self.depth == 0 {
                    self.segment_start = true;
                    return Some(Ok(token));
                }
                Ok(token)
            }
            '(' => {
                self.depth += 1;
                Ok(self.emit(TokenKind::LParen, 1))
            }
            ')' => {
                self.depth = self.depth.saturating_sub(1);
                Ok(self.emit(TokenKind::RParen, 1))
            }
            ',' => Ok(self.emit(TokenKind::Comma, 1)),
            '=' => Ok(self.emit(TokenKind::Compare(CompareOp::Equal), 1)),
            '<' => Ok(self.compare(CompareOp::LessThan, CompareOp::LessEqual)),
            '>' => Ok(self.compare(CompareOp::GreaterThan, CompareOp::GreaterEqual)),
            '"' | '\'' => self.read_quoted(ch),
            _ => self.read_word(ch),
        };

        self.segment_start = false;
        Some(token)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token()?;
        self.failed = item.is_err();
        Some(item)
    }
}

/// Tokenizes the whole input.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).collect::<Result<Vec<_>, _>>()?;
    trace!(count = tokens.len(), "tokenized query");
    Ok(tokens)
}

/// Tokenizes a standalone expression; command keywords stay words.
pub fn tokenize_expression(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::expression(input).collect::<Result<Vec<_>, _>>()?;
    trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .filter(|t| !t.is_whitespace())
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_command_keywords() {
    assert_eq!(
        kinds("search a | WHERE b"),
        vec![
            TokenKind::Command(CommandKind::Search),
            TokenKind::Word("a".to_string()),
            TokenKind::Pipe,
            TokenKind::Command(CommandKind::Where),
            TokenKind::Word("b".to_string()),
        ]
    );
}

#[test]
fn test_pipe_in_parens_does_not_start_segment() {
    assert_eq!(
        kinds("(a | eval)"),
        vec![
            TokenKind::LParen,
            TokenKind::Word("a".to_string()),
            TokenKind::Pipe,
            TokenKind::Word("eval".to_string()),
            TokenKind::RParen,
        ]
    );
}
