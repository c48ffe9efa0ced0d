use crate::{
    ast::{Position, Token, TokenKind},
    parser::ParseError,
};

/// Cursor over the tokens of one pipeline segment.
///
/// Every lookahead is side-effect free: `eat` only moves when it matches, and
/// `checkpoint`/`rewind` restore an earlier cursor for backtracking.
pub struct ParseContext<'a> {
    source: &'a str,
    tokens: &'a [Token],
    cursor: usize,
    end: Position,
    max_depth: usize,
}

impl<'a> ParseContext<'a> {
    /// `end` is reported when the tokens run out (the next pipe, or the end of input).
    pub fn new(source: &'a str, tokens: &'a [Token], end: Position, max_depth: usize) -> Self {
        ParseContext {
            source,
            tokens,
            cursor: 0,
            end,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Consumes the next token only if its kind equals `expected`.
    pub fn eat(&mut self, expected: &TokenKind) -> bool {
        if self.peek_kind() == Some(expected) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn checkpoint(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self, checkpoint: usize) {
        self.cursor = checkpoint;
    }

    /// Position of the next token, or of the segment end.
    pub fn position(&self) -> Position {
        self.peek().map_or(self.end, |token| token.position)
    }

    /// Error for a required construct missing at the cursor.
    pub fn expected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::ExpectedToken {
                expected,
                found: token.text.clone(),
                position: token.position,
            },
            None => ParseError::UnexpectedEnd {
                expected,
                position: self.end,
            },
        }
    }

    /// Source text covering tokens `from..to`, trimmed of surrounding whitespace.
    pub fn text_between(&self, from: usize, to: usize) -> &'a str {
        let tokens = &self.tokens[from.min(to)..to];
        let mut significant = tokens.iter().filter(|token| !token.is_whitespace());
        let Some(first) = significant.next() else {
            return "";
        };
        let last = significant.last().unwrap_or(first);
        &self.source[first.position.offset..last.end_offset()]
    }
}
