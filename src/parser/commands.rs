//! Pipeline splitting and per-command grammars.

use tracing::{debug, trace};

use crate::{
    ast::{Aggregation, Binding, Command, CommandKind, CompareOp, Expr, Position, Query, Token, TokenKind},
    lexer::tokenize,
    parser::{ExprMode, ParseContext, ParseError, ParseOptions, parse_expression},
};

struct Segment<'a> {
    tokens: &'a [Token],
    /// Position of the pipe closing this segment, or of the end of input
    end: Position,
}

pub(super) fn parse_pipeline(source: &str, options: &ParseOptions) -> Result<Query, ParseError> {
    let tokens = tokenize(source)?;
    let end = Position::end_of(source);

    if tokens.iter().all(Token::is_whitespace) {
        return Err(ParseError::EmptyQuery { position: end });
    }

    let mut commands = Vec::new();
    for (index, segment) in split_segments(&tokens, end).into_iter().enumerate() {
        let mut ctx = ParseContext::new(source, segment.tokens, segment.end, options.max_depth);
        commands.push(parse_segment(&mut ctx, index == 0)?);
    }

    debug!(commands = commands.len(), "parsed pipeline");
    Ok(Query::new(commands))
}

/// Splits on pipes outside parentheses.
fn split_segments(tokens: &[Token], end: Position) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Pipe if depth == 0 => {
                segments.push(Segment {
                    tokens: &tokens[start..index],
                    end: token.position,
                });
                start = index + 1;
            }
            _ => {}
        }
    }

    segments.push(Segment {
        tokens: &tokens[start..],
        end,
    });
    segments
}

fn parse_segment(ctx: &mut ParseContext<'_>, first: bool) -> Result<Command, ParseError> {
    ctx.skip_whitespace();
    let Some(token) = ctx.peek() else {
        return Err(ParseError::EmptySegment {
            position: ctx.position(),
        });
    };

    let (command, stopped) = match &token.kind {
        TokenKind::Command(kind) => {
            ctx.advance();
            debug!(command = kind.keyword(), "routing pipeline segment");
            match kind {
                CommandKind::Search => {
                    let (filters, stopped) = parse_filters(ctx);
                    (Command::Search { filters }, stopped)
                }
                CommandKind::Where => {
                    let condition = require_expression(ctx, "where")?;
                    (Command::Where { condition }, None)
                }
                CommandKind::Stats => {
                    let aggregations = parse_aggregations(ctx)?;
                    (Command::Stats { aggregations }, None)
                }
                CommandKind::Eval => (parse_eval(ctx)?, None),
            }
        }
        _ if first => {
            debug!("no command keyword, parsing implicit search");
            let (filters, stopped) = parse_filters(ctx);
            if filters.is_empty() {
                return Err(stopped.unwrap_or_else(|| ctx.expected("search term")));
            }
            (Command::Search { filters }, stopped)
        }
        _ => {
            return Err(ParseError::UnknownCommand {
                found: token.text.clone(),
                position: token.position,
            });
        }
    };

    expect_segment_end(ctx, stopped)?;
    Ok(command)
}

/// Collects filter terms until an attempt yields no expression.
///
/// A failed attempt ends the list with the cursor rewound to where that term
/// began; its error is handed back for reporting if the segment has leftovers.
fn parse_filters(ctx: &mut ParseContext<'_>) -> (Vec<Expr>, Option<ParseError>) {
    let mut filters = Vec::new();
    loop {
        let checkpoint = ctx.checkpoint();
        match parse_expression(ctx, ExprMode::FilterList) {
            Ok(Some(filter)) => filters.push(filter),
            Ok(None) => return (filters, None),
            Err(error) => {
                trace!(%error, filters = filters.len(), "filter list ended on a failed term");
                ctx.rewind(checkpoint);
                return (filters, Some(error));
            }
        }
    }
}

fn require_expression(ctx: &mut ParseContext<'_>, after: &str) -> Result<Expr, ParseError> {
    if let Some(expr) = parse_expression(ctx, ExprMode::Expression)? {
        return Ok(expr);
    }
    ctx.skip_whitespace();
    Err(ParseError::ExpectedExpression {
        after: after.to_string(),
        position: ctx.position(),
    })
}

/// `name = expression` bindings, separated by commas or plain juxtaposition.
fn parse_eval(ctx: &mut ParseContext<'_>) -> Result<Command, ParseError> {
    let mut bindings = Vec::new();

    loop {
        ctx.skip_whitespace();
        let required = bindings.is_empty() || {
            let separated = ctx.eat(&TokenKind::Comma);
            ctx.skip_whitespace();
            separated
        };

        let Some(Token {
            kind: TokenKind::Word(name),
            ..
        }) = ctx.peek()
        else {
            if required {
                return Err(ctx.expected("binding name"));
            }
            break;
        };
        ctx.advance();

        ctx.skip_whitespace();
        if !ctx.eat(&TokenKind::Compare(CompareOp::Equal)) {
            return Err(ctx.expected("`=`"));
        }

        let value = require_expression(ctx, "=")?;
        trace!(name = name.as_str(), "parsed eval binding");
        bindings.push(Binding::new(name.clone(), value));
    }

    Ok(Command::Eval { bindings })
}

/// Placeholder grammar for `stats`: each top-level comma-separated chunk is
/// kept as one opaque descriptor. An empty list is valid. Parentheses must
/// balance within the segment.
fn parse_aggregations(ctx: &mut ParseContext<'_>) -> Result<Vec<Aggregation>, ParseError> {
    let mut aggregations = Vec::new();
    ctx.skip_whitespace();
    if ctx.is_at_end() {
        return Ok(aggregations);
    }

    let mut depth = 0usize;
    let mut start = ctx.checkpoint();
    loop {
        let at = ctx.checkpoint();
        let Some(token) = ctx.advance() else {
            if depth > 0 {
                return Err(ctx.expected("`)`"));
            }
            let text = ctx.text_between(start, at);
            if text.is_empty() {
                return Err(ctx.expected("aggregation"));
            }
            aggregations.push(Aggregation::new(text));
            break;
        };

        let boundary = match &token.kind {
            TokenKind::LParen => {
                depth += 1;
                false
            }
            TokenKind::RParen if depth == 0 => {
                return Err(ParseError::UnexpectedToken {
                    found: token.text.clone(),
                    position: token.position,
                });
            }
            TokenKind::RParen => {
                depth -= 1;
                false
            }
            TokenKind::Comma => depth == 0,
            _ => false,
        };
        if !boundary {
            continue;
        }

        let text = ctx.text_between(start, at);
        if text.is_empty() {
            ctx.rewind(at);
            return Err(ctx.expected("aggregation"));
        }
        aggregations.push(Aggregation::new(text));
        start = ctx.checkpoint();
    }

    trace!(count = aggregations.len(), "parsed stats aggregations");
    Ok(aggregations)
}

fn expect_segment_end(
    ctx: &mut ParseContext<'_>,
    stopped: Option<ParseError>,
) -> Result<(), ParseError> {
    ctx.skip_whitespace();
    match ctx.peek() {
        None => Ok(()),
        Some(token) => Err(stopped.unwrap_or_else(|| ParseError::UnexpectedToken {
            found: token.text.clone(),
            position: token.position,
        })),
    }
}
