//! Precedence-climbing expression engine.
//!
//! Binding strength, tightest first: literal or parenthesized group,
//! comparison, NOT, AND, OR. AND and OR are left-associative.

use crate::{
    ast::{Casing, Expr, Keyword, Token, TokenKind},
    parser::{ParseContext, ParseError},
};

/// Which surface syntax the expression is written in.
///
/// Passed explicitly to every call so the casing rule is visible at each call
/// site rather than toggled on shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprMode {
    /// Inside a `search` filter list: only `AND`, `OR`, `NOT` are operators
    /// and build uppercase nodes; `and` is just a word.
    FilterList,
    /// Where and eval: `and`, `or`, `not` in any case build lowercase nodes.
    Expression,
}

impl ExprMode {
    pub fn casing(self) -> Casing {
        match self {
            ExprMode::FilterList => Casing::Upper,
            ExprMode::Expression => Casing::Lower,
        }
    }

    /// The logical keyword `token` spells in this mode, if any.
    pub fn keyword(self, token: &Token) -> Option<Keyword> {
        let TokenKind::Word(word) = &token.kind else {
            return None;
        };
        match self {
            ExprMode::FilterList => Keyword::from_uppercase(word),
            ExprMode::Expression => Keyword::from_any_case(word),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Or,
    And,
}

impl Precedence {
    fn of(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Or => Some(Precedence::Or),
            Keyword::And => Some(Precedence::And),
            Keyword::Not => None,
        }
    }
}

/// Parse one expression at the cursor.
///
/// Returns `Ok(None)` with the cursor untouched when no expression can start
/// here. Errors mean an expression was started but could not be completed.
pub fn parse_expression(
    ctx: &mut ParseContext<'_>,
    mode: ExprMode,
) -> Result<Option<Expr>, ParseError> {
    parse_binary(ctx, mode, Precedence::Lowest, 0)
}

fn parse_binary(
    ctx: &mut ParseContext<'_>,
    mode: ExprMode,
    min: Precedence,
    depth: usize,
) -> Result<Option<Expr>, ParseError> {
    let Some(mut left) = parse_unary(ctx, mode, depth)? else {
        return Ok(None);
    };

    loop {
        let checkpoint = ctx.checkpoint();
        ctx.skip_whitespace();

        let Some(token) = ctx.peek() else {
            ctx.rewind(checkpoint);
            break;
        };
        let Some(precedence) = mode
            .keyword(token)
            .and_then(Precedence::of)
            .filter(|precedence| *precedence > min)
        else {
            ctx.rewind(checkpoint);
            break;
        };

        ctx.advance();
        let right = parse_binary(ctx, mode, precedence, depth)?
            .ok_or_else(|| missing_operand(ctx, &token.text))?;

        let casing = mode.casing();
        left = match precedence {
            Precedence::And => casing.and(left, right),
            _ => casing.or(left, right),
        };
    }

    Ok(Some(left))
}

fn parse_unary(
    ctx: &mut ParseContext<'_>,
    mode: ExprMode,
    depth: usize,
) -> Result<Option<Expr>, ParseError> {
    let checkpoint = ctx.checkpoint();
    ctx.skip_whitespace();

    let Some(token) = ctx.peek() else {
        ctx.rewind(checkpoint);
        return Ok(None);
    };
    if mode.keyword(token) != Some(Keyword::Not) {
        ctx.rewind(checkpoint);
        return parse_comparison(ctx, mode, depth);
    }

    check_depth(ctx, depth + 1)?;
    ctx.advance();
    let operand = parse_unary(ctx, mode, depth + 1)?
        .ok_or_else(|| missing_operand(ctx, &token.text))?;

    Ok(Some(mode.casing().not(operand)))
}

fn parse_comparison(
    ctx: &mut ParseContext<'_>,
    mode: ExprMode,
    depth: usize,
) -> Result<Option<Expr>, ParseError> {
    let Some(left) = parse_primary(ctx, mode, depth)? else {
        return Ok(None);
    };

    let checkpoint = ctx.checkpoint();
    ctx.skip_whitespace();

    let Some(Token {
        kind: TokenKind::Compare(op),
        text,
        ..
    }) = ctx.peek()
    else {
        ctx.rewind(checkpoint);
        return Ok(Some(left));
    };

    ctx.advance();
    let right = parse_primary(ctx, mode, depth)?.ok_or_else(|| missing_operand(ctx, text))?;

    Ok(Some(Expr::compare(*op, left, right)))
}

/// Literal (quoted string, number, bare word) or parenthesized group.
fn parse_primary(
    ctx: &mut ParseContext<'_>,
    mode: ExprMode,
    depth: usize,
) -> Result<Option<Expr>, ParseError> {
    let checkpoint = ctx.checkpoint();
    ctx.skip_whitespace();

    let Some(token) = ctx.peek() else {
        ctx.rewind(checkpoint);
        return Ok(None);
    };

    let expr = match &token.kind {
        TokenKind::Quoted { value, .. } => Expr::quoted(value.clone()),
        TokenKind::Number(value) => Expr::number(value.clone()),
        TokenKind::Word(word) if mode.keyword(token).is_none() => Expr::bare(word.clone()),
        TokenKind::LParen => {
            check_depth(ctx, depth + 1)?;
            ctx.advance();
            let inner = parse_binary(ctx, mode, Precedence::Lowest, depth + 1)?
                .ok_or_else(|| missing_operand(ctx, "("))?;
            ctx.skip_whitespace();
            if !ctx.eat(&TokenKind::RParen) {
                return Err(ctx.expected("`)`"));
            }
            return Ok(Some(inner));
        }
        _ => {
            ctx.rewind(checkpoint);
            return Ok(None);
        }
    };

    ctx.advance();
    Ok(Some(expr))
}

fn check_depth(ctx: &ParseContext<'_>, depth: usize) -> Result<(), ParseError> {
    if depth > ctx.max_depth() {
        return Err(ParseError::NestingTooDeep {
            limit: ctx.max_depth(),
            position: ctx.position(),
        });
    }
    Ok(())
}

fn missing_operand(ctx: &mut ParseContext<'_>, after: &str) -> ParseError {
    ctx.skip_whitespace();
    ParseError::ExpectedExpression {
        after: after.to_string(),
        position: ctx.position(),
    }
}
