//! Restricted literal parser.
//!
//! Reads literal data written in the familiar `{'9000000009': 2}` notation. Only literals are
//! accepted:
//! - mappings `{k: v}`, lists `[a, b]`, tuples `(a, b)` / `(a,)` / `()`, sets `{a, b}`
//! - strings in single, double or triple quotes, with optional `r`, `u` or `b` prefixes,
//!   backslash escapes and implicit concatenation of adjacent strings
//! - integers (decimal, `0x`, `0o`, `0b`, `_` separators) and floats, with a unary sign
//! - `True`, `False` and `None`
//!
//! Comments, trailing commas and any whitespace between tokens are allowed. Names other than
//! the three constants are rejected, so calls, attribute access and operators can never
//! appear in a parsed value.
//!
//! Input is split into tokens by a `logos` lexer; a small recursive-descent parser builds the
//! value from those tokens and decodes string and number tokens.

use crate::constants::MAX_LITERAL_DEPTH;
use crate::{LiteralError, LiteralResult};
use logos::{Logos, SpannedIter};
use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

/// A parsed literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    /// Distinct elements in first-seen order.
    Set(Vec<Literal>),
    /// Key/value pairs in insertion order. A repeated key keeps its first position and takes
    /// the last value.
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::Bytes(_) => "bytes",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }

    fn is_hashable(&self) -> bool {
        match self {
            Literal::List(_) | Literal::Set(_) | Literal::Dict(_) => false,
            Literal::Tuple(items) => items.iter().all(Literal::is_hashable),
            _ => true,
        }
    }
}

/// Prefix letters in front of a string token's opening quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StringPrefix {
    len: usize,
    raw: bool,
    bytes: bool,
}

/// Raw tokens of the literal notation.
///
/// String and number tokens only check the overall shape; escapes, underscores, radix digits
/// and ranges are validated by the parser so errors can name the exact offset.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"\\\n")]
pub(crate) enum Token {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    NoneValue,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9][0-9_]*")]
    Int,
    #[regex(r"0[xXoObB][0-9a-zA-Z_]*")]
    RadixInt,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    Float,

    #[regex(r#"([rRuUbB]|[bB][rR]|[rR][bB])?'([^'\\\n]|\\(.|\n))*'"#, string_prefix)]
    #[regex(r#"([rRuUbB]|[bB][rR]|[rR][bB])?"([^"\\\n]|\\(.|\n))*""#, string_prefix)]
    #[regex(r#"([rRuUbB]|[bB][rR]|[rR][bB])?'''('?'?([^'\\]|\\(.|\n)))*'''"#, string_prefix)]
    #[regex(r#"([rRuUbB]|[bB][rR]|[rR][bB])?"""("?"?([^"\\]|\\(.|\n)))*""""#, string_prefix)]
    Str(StringPrefix),
}

fn string_prefix(lex: &mut logos::Lexer<Token>) -> StringPrefix {
    let len = string_prefix_len(lex.slice()).unwrap_or(0);
    let prefix = lex.slice()[..len].to_ascii_lowercase();
    StringPrefix {
        len,
        raw: prefix.contains('r'),
        bytes: prefix.contains('b'),
    }
}

/// Length of the string prefix (`r`, `b`, `rb`, ...) when `text` starts with a string literal.
fn string_prefix_len(text: &str) -> Option<usize> {
    let quote_at = text
        .bytes()
        .take(3)
        .position(|b| b == b'\'' || b == b'"')?;
    let prefix = text[..quote_at].to_ascii_lowercase();

    matches!(prefix.as_str(), "" | "r" | "u" | "b" | "br" | "rb").then_some(quote_at)
}

/// Parses `text` as a single literal value.
///
/// # Errors
///
/// Returns a [`LiteralError`] naming the byte offset of the first problem if `text` is not a
/// complete literal, contains anything other than literal data, or nests containers deeper
/// than the parser allows.
pub fn parse_literal(text: &str) -> LiteralResult<Literal> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value()?;

    match parser.tokens.peek() {
        Some((_, span)) => Err(LiteralError::TrailingInput(span.start)),
        None => Ok(value),
    }
}

enum StringValue {
    Text(String),
    Bytes(Vec<u8>),
}

struct Parser<'a> {
    input: &'a str,
    tokens: Peekable<SpannedIter<'a, Token>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Token::lexer(input).spanned().peekable(),
            depth: 0,
        }
    }

    fn next_token(&mut self) -> LiteralResult<(Token, Range<usize>)> {
        match self.tokens.next() {
            None => Err(LiteralError::UnexpectedEnd),
            Some((Ok(token), span)) => Ok((token, span)),
            Some((Err(()), span)) => Err(self.rejected(span.start, false)),
        }
    }

    fn eat(&mut self, expected: Token) -> bool {
        let found = matches!(self.tokens.peek(), Some((Ok(token), _)) if *token == expected);
        if found {
            self.tokens.next();
        }
        found
    }

    fn peek_offset(&mut self) -> usize {
        self.tokens
            .peek()
            .map_or(self.input.len(), |(_, span)| span.start)
    }

    /// Error for whatever token comes next.
    fn unexpected(&mut self) -> LiteralError {
        match self.tokens.peek() {
            None => LiteralError::UnexpectedEnd,
            Some((token, span)) => {
                let (offset, recognised) = (span.start, token.is_ok());
                self.rejected(offset, recognised)
            }
        }
    }

    /// Error for a token starting at `offset`. Input the lexer could not match that opens
    /// with a quote is a string missing its closing quote.
    fn rejected(&self, offset: usize, recognised: bool) -> LiteralError {
        let rest = &self.input[offset..];
        if !recognised && string_prefix_len(rest).is_some() {
            return LiteralError::UnterminatedString(offset);
        }

        match rest.chars().next() {
            Some(found) => LiteralError::UnexpectedChar { found, offset },
            None => LiteralError::UnexpectedEnd,
        }
    }

    fn parse_value(&mut self) -> LiteralResult<Literal> {
        let (token, span) = self.next_token()?;
        match token {
            Token::LBrace => self.nested(Self::parse_braces),
            Token::LBracket => self.nested(|parser| {
                parser
                    .parse_items(Token::RBracket, Vec::new())
                    .map(Literal::List)
            }),
            Token::LParen => self.nested(Self::parse_parens),
            Token::Plus => self.parse_signed_number(false),
            Token::Minus => self.parse_signed_number(true),
            Token::Int | Token::RadixInt | Token::Float => self.parse_number(token, span, false),
            Token::Str(prefix) => self.parse_strings(prefix, span),
            Token::True => Ok(Literal::Bool(true)),
            Token::False => Ok(Literal::Bool(false)),
            Token::NoneValue => Ok(Literal::None),
            Token::Name => Err(LiteralError::UnknownName {
                name: self.input[span.clone()].to_string(),
                offset: span.start,
            }),
            Token::RBrace
            | Token::RBracket
            | Token::RParen
            | Token::Comma
            | Token::Colon => Err(self.rejected(span.start, true)),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> LiteralResult<Literal>,
    ) -> LiteralResult<Literal> {
        if self.depth >= MAX_LITERAL_DEPTH {
            return Err(LiteralError::TooDeep(MAX_LITERAL_DEPTH));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_parens(&mut self) -> LiteralResult<Literal> {
        if self.eat(Token::RParen) {
            return Ok(Literal::Tuple(Vec::new()));
        }

        let first = self.parse_value()?;
        if self.eat(Token::RParen) {
            // Parentheses without a comma only group.
            return Ok(first);
        }
        if !self.eat(Token::Comma) {
            return Err(self.unexpected());
        }

        Ok(Literal::Tuple(self.parse_items(Token::RParen, vec![first])?))
    }

    /// Parses comma-separated values up to and including `close`, appending to `items`.
    fn parse_items(&mut self, close: Token, mut items: Vec<Literal>) -> LiteralResult<Vec<Literal>> {
        loop {
            if self.eat(close) {
                return Ok(items);
            }

            items.push(self.parse_value()?);

            if self.eat(close) {
                return Ok(items);
            }
            if !self.eat(Token::Comma) {
                return Err(self.unexpected());
            }
        }
    }

    fn parse_braces(&mut self) -> LiteralResult<Literal> {
        if self.eat(Token::RBrace) {
            return Ok(Literal::Dict(Vec::new()));
        }

        let offset = self.peek_offset();
        let first = self.parse_value()?;

        if self.eat(Token::Colon) {
            self.parse_dict(offset, first)
        } else {
            self.parse_set(offset, first)
        }
    }

    fn parse_dict(&mut self, first_offset: usize, first_key: Literal) -> LiteralResult<Literal> {
        let mut pairs: Vec<(Literal, Literal)> = Vec::new();
        let mut key_offset = first_offset;
        let mut key = first_key;

        loop {
            ensure_hashable(&key, key_offset)?;
            let value = self.parse_value()?;
            insert_pair(&mut pairs, key, value);

            if self.eat(Token::RBrace) {
                return Ok(Literal::Dict(pairs));
            }
            if !self.eat(Token::Comma) {
                return Err(self.unexpected());
            }
            if self.eat(Token::RBrace) {
                return Ok(Literal::Dict(pairs));
            }

            key_offset = self.peek_offset();
            key = self.parse_value()?;
            if !self.eat(Token::Colon) {
                return Err(self.unexpected());
            }
        }
    }

    fn parse_set(&mut self, first_offset: usize, first: Literal) -> LiteralResult<Literal> {
        ensure_hashable(&first, first_offset)?;
        let mut elements = vec![first];

        loop {
            if self.eat(Token::RBrace) {
                return Ok(Literal::Set(elements));
            }
            if !self.eat(Token::Comma) {
                return Err(self.unexpected());
            }
            if self.eat(Token::RBrace) {
                return Ok(Literal::Set(elements));
            }

            let offset = self.peek_offset();
            let element = self.parse_value()?;
            ensure_hashable(&element, offset)?;
            if !elements.contains(&element) {
                elements.push(element);
            }
        }
    }

    fn parse_strings(&mut self, prefix: StringPrefix, span: Range<usize>) -> LiteralResult<Literal> {
        let mut value = decode_string(&self.input[span.clone()], span.start, prefix)?;

        while let Some((Ok(Token::Str(prefix)), span)) = self.tokens.peek().cloned() {
            self.tokens.next();
            let more = decode_string(&self.input[span.clone()], span.start, prefix)?;
            value = match (value, more) {
                (StringValue::Text(mut text), StringValue::Text(more)) => {
                    text.push_str(&more);
                    StringValue::Text(text)
                }
                (StringValue::Bytes(mut bytes), StringValue::Bytes(more)) => {
                    bytes.extend(more);
                    StringValue::Bytes(bytes)
                }
                _ => return Err(LiteralError::MixedStringKinds(span.start)),
            };
        }

        Ok(match value {
            StringValue::Text(text) => Literal::Str(text),
            StringValue::Bytes(bytes) => Literal::Bytes(bytes),
        })
    }

    fn parse_signed_number(&mut self, negative: bool) -> LiteralResult<Literal> {
        match self.tokens.peek() {
            Some((Ok(Token::Int | Token::RadixInt | Token::Float), _)) => {
                let (token, span) = self.next_token()?;
                self.parse_number(token, span, negative)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_number(
        &mut self,
        token: Token,
        span: Range<usize>,
        negative: bool,
    ) -> LiteralResult<Literal> {
        let start = span.start;
        let end = self.glued_end(span.end);
        if end > span.end {
            // Anything glued on (imaginary `1j`, a second `.5`, a name) makes the token invalid.
            return Err(self.invalid_number(start, end));
        }
        let text = &self.input[start..end];

        match token {
            Token::RadixInt => {
                let radix = match text.as_bytes().get(1) {
                    Some(b'x' | b'X') => 16,
                    Some(b'o' | b'O') => 8,
                    _ => 2,
                };
                let digits = &text[2..];
                let digits = digits.strip_prefix('_').unwrap_or(digits);
                self.integer(digits, radix, negative, start, end)
            }
            Token::Int => {
                let leading_zero = text.len() > 1
                    && text.starts_with('0')
                    && text.chars().any(|c| c != '0' && c != '_');
                if leading_zero {
                    return Err(self.invalid_number(start, end));
                }
                self.integer(text, 10, negative, start, end)
            }
            _ => {
                if has_misplaced_underscore(text, |c| c.is_ascii_digit()) {
                    return Err(self.invalid_number(start, end));
                }
                let cleaned: String = text.chars().filter(|c| *c != '_').collect();
                let value: f64 = cleaned
                    .parse()
                    .map_err(|_| self.invalid_number(start, end))?;

                Ok(Literal::Float(if negative { -value } else { value }))
            }
        }
    }

    /// Consumes names and numbers that touch a number token, returning the end offset of the
    /// combined text.
    fn glued_end(&mut self, mut end: usize) -> usize {
        while let Some((token, span)) = self.tokens.peek() {
            let touching = span.start == end
                && match token {
                    Ok(Token::Name | Token::True | Token::False | Token::NoneValue) => true,
                    Ok(Token::Int | Token::RadixInt | Token::Float) => true,
                    _ => false,
                };
            if !touching {
                break;
            }
            end = span.end;
            self.tokens.next();
        }
        end
    }

    fn integer(
        &self,
        digits: &str,
        radix: u32,
        negative: bool,
        start: usize,
        end: usize,
    ) -> LiteralResult<Literal> {
        if digits.is_empty() || has_misplaced_underscore(digits, |c| c.is_ascii_alphanumeric()) {
            return Err(self.invalid_number(start, end));
        }

        let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
        let magnitude =
            i128::from_str_radix(&cleaned, radix).map_err(|_| self.invalid_number(start, end))?;
        let value = if negative { -magnitude } else { magnitude };

        i64::try_from(value)
            .map(Literal::Int)
            .map_err(|_| self.invalid_number(start, end))
    }

    fn invalid_number(&self, start: usize, end: usize) -> LiteralError {
        LiteralError::InvalidNumber {
            text: self.input[start..end].to_string(),
            offset: start,
        }
    }
}

/// Decodes one string token starting at byte `start` of the input.
fn decode_string(token: &str, start: usize, prefix: StringPrefix) -> LiteralResult<StringValue> {
    let quoted = &token[prefix.len..];
    let quote_len = if quoted.starts_with("'''") || quoted.starts_with("\"\"\"") {
        3
    } else {
        1
    };
    let body = &quoted[quote_len..quoted.len() - quote_len];
    let body_start = start + prefix.len + quote_len;

    // Bytes are collected as chars no wider than 0xFF and narrowed at the end.
    let mut text = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let offset = body_start + i;
        if c != '\\' {
            if prefix.bytes && !c.is_ascii() {
                return Err(LiteralError::NonAsciiBytes(offset));
            }
            text.push(c);
            continue;
        }

        let Some((_, escape)) = chars.next() else {
            return Err(LiteralError::UnterminatedString(start));
        };
        if prefix.raw {
            if prefix.bytes && !escape.is_ascii() {
                return Err(LiteralError::NonAsciiBytes(offset));
            }
            text.push('\\');
            text.push(escape);
        } else {
            push_escape(&mut text, &mut chars, escape, offset, prefix.bytes)?;
        }
    }

    if !prefix.bytes {
        return Ok(StringValue::Text(text));
    }

    text.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| LiteralError::NonAsciiBytes(start)))
        .collect::<LiteralResult<Vec<u8>>>()
        .map(StringValue::Bytes)
}

fn push_escape(
    text: &mut String,
    chars: &mut Peekable<CharIndices<'_>>,
    escape: char,
    offset: usize,
    bytes: bool,
) -> LiteralResult<()> {
    let decoded = match escape {
        // Line continuation inside the string.
        '\n' => return Ok(()),
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        '0'..='7' => {
            let mut value = u32::from(escape) - u32::from('0');
            for _ in 0..2 {
                let Some(digit) = chars
                    .next_if(|(_, c)| matches!(c, '0'..='7'))
                    .and_then(|(_, c)| c.to_digit(8))
                else {
                    break;
                };
                value = value * 8 + digit;
            }
            code_point(value, offset, bytes)?
        }
        'x' => code_point(hex_digits(chars, 2, offset)?, offset, bytes)?,
        'u' if !bytes => code_point(hex_digits(chars, 4, offset)?, offset, bytes)?,
        'U' if !bytes => code_point(hex_digits(chars, 8, offset)?, offset, bytes)?,
        'N' if !bytes => return Err(LiteralError::InvalidEscape(offset)),
        other => {
            // Unrecognised escapes keep their backslash.
            if bytes && !other.is_ascii() {
                return Err(LiteralError::NonAsciiBytes(offset));
            }
            text.push('\\');
            text.push(other);
            return Ok(());
        }
    };

    text.push(decoded);
    Ok(())
}

fn hex_digits(
    chars: &mut Peekable<CharIndices<'_>>,
    count: usize,
    offset: usize,
) -> LiteralResult<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .peek()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(LiteralError::InvalidEscape(offset))?;
        chars.next();
        value = value * 16 + digit;
    }
    Ok(value)
}

/// An underscore is only allowed between two digits.
fn has_misplaced_underscore(text: &str, is_digit: impl Fn(char) -> bool) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        c == '_'
            && !(i > 0
                && is_digit(chars[i - 1])
                && chars.get(i + 1).is_some_and(|next| is_digit(*next)))
    })
}

fn code_point(value: u32, offset: usize, bytes: bool) -> LiteralResult<char> {
    if bytes && value > 0xFF {
        return Err(LiteralError::InvalidEscape(offset));
    }
    char::from_u32(value).ok_or(LiteralError::InvalidEscape(offset))
}

fn ensure_hashable(value: &Literal, offset: usize) -> LiteralResult<()> {
    if value.is_hashable() {
        Ok(())
    } else {
        Err(LiteralError::Unhashable {
            kind: value.kind(),
            offset,
        })
    }
}

fn insert_pair(pairs: &mut Vec<(Literal, Literal)>, key: Literal, value: Literal) {
    match pairs.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, slot)) => *slot = value,
        None => pairs.push((key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Literal {
        Literal::Str(value.to_string())
    }

    #[test]
    fn test_parse_nhs_number_mapping() {
        let parsed = parse_literal("{'9000000009': 2, \"9000000017\": 1}").unwrap();
        assert_eq!(
            parsed,
            Literal::Dict(vec![
                (text("9000000009"), Literal::Int(2)),
                (text("9000000017"), Literal::Int(1)),
            ])
        );
    }

    #[test]
    fn test_parse_mapping_with_layout_comments_and_trailing_comma() {
        let input = "
            {
                # two transfers for this patient
                '9000000009': 2,
                '9000000017': 1,   # and one here
            }
        ";
        let parsed = parse_literal(input).unwrap();
        assert!(matches!(parsed, Literal::Dict(pairs) if pairs.len() == 2));
    }

    #[test]
    fn test_parse_repeated_key_keeps_first_position_and_last_value() {
        let parsed = parse_literal("{'a': 1, 'b': 2, 'a': 3}").unwrap();
        assert_eq!(
            parsed,
            Literal::Dict(vec![(text("a"), Literal::Int(3)), (text("b"), Literal::Int(2))])
        );
    }

    #[test]
    fn test_parse_empty_containers() {
        assert_eq!(parse_literal("{}").unwrap(), Literal::Dict(vec![]));
        assert_eq!(parse_literal("[]").unwrap(), Literal::List(vec![]));
        assert_eq!(parse_literal("()").unwrap(), Literal::Tuple(vec![]));
    }

    #[test]
    fn test_parse_tuples_and_grouping() {
        assert_eq!(parse_literal("(1)").unwrap(), Literal::Int(1));
        assert_eq!(
            parse_literal("(1,)").unwrap(),
            Literal::Tuple(vec![Literal::Int(1)])
        );
        assert_eq!(
            parse_literal("(1, 'a', None)").unwrap(),
            Literal::Tuple(vec![Literal::Int(1), text("a"), Literal::None])
        );
    }

    #[test]
    fn test_parse_set_removes_duplicates() {
        assert_eq!(
            parse_literal("{1, 2, 1}").unwrap(),
            Literal::Set(vec![Literal::Int(1), Literal::Int(2)])
        );
    }

    #[test]
    fn test_parse_nested_values() {
        let parsed = parse_literal("{'k': [True, False, None, (1.5, -2)]}").unwrap();
        assert_eq!(
            parsed,
            Literal::Dict(vec![(
                text("k"),
                Literal::List(vec![
                    Literal::Bool(true),
                    Literal::Bool(false),
                    Literal::None,
                    Literal::Tuple(vec![Literal::Float(1.5), Literal::Int(-2)]),
                ])
            )])
        );
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_literal("0").unwrap(), Literal::Int(0));
        assert_eq!(parse_literal("1_000").unwrap(), Literal::Int(1000));
        assert_eq!(parse_literal("0xff").unwrap(), Literal::Int(255));
        assert_eq!(parse_literal("0o17").unwrap(), Literal::Int(15));
        assert_eq!(parse_literal("0b101").unwrap(), Literal::Int(5));
        assert_eq!(parse_literal("- 7").unwrap(), Literal::Int(-7));
        assert_eq!(parse_literal("+7").unwrap(), Literal::Int(7));
        assert_eq!(
            parse_literal("-9223372036854775808").unwrap(),
            Literal::Int(i64::MIN)
        );
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(parse_literal("2.5").unwrap(), Literal::Float(2.5));
        assert_eq!(parse_literal("1.").unwrap(), Literal::Float(1.0));
        assert_eq!(parse_literal(".5").unwrap(), Literal::Float(0.5));
        assert_eq!(parse_literal("1e3").unwrap(), Literal::Float(1000.0));
        assert_eq!(parse_literal("-2.5E-1").unwrap(), Literal::Float(-0.25));
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        for input in ["007", "1__0", "1_", "0x", "1j", "1.2.3", "9223372036854775808"] {
            let err = parse_literal(input).expect_err(input);
            assert!(
                matches!(err, LiteralError::InvalidNumber { offset: 0, .. }),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_parse_numbers_split_by_whitespace_are_separate_tokens() {
        assert_eq!(parse_literal("0x_ff").unwrap(), Literal::Int(255));
        assert_eq!(parse_literal("1 .5").expect_err("two values"), LiteralError::TrailingInput(2));
        assert!(matches!(
            parse_literal("12abc").expect_err("glued name"),
            LiteralError::InvalidNumber { text, offset: 0 } if text == "12abc"
        ));
    }

    #[test]
    fn test_parse_skips_line_continuations() {
        assert_eq!(
            parse_literal("{'a': \\\n 1}").unwrap(),
            Literal::Dict(vec![(text("a"), Literal::Int(1))])
        );
        assert_eq!(
            parse_literal("[1, \\ 2]").expect_err("stray backslash"),
            LiteralError::UnexpectedChar {
                found: '\\',
                offset: 4
            }
        );
    }

    #[test]
    fn test_parse_empty_strings() {
        assert_eq!(parse_literal("''").unwrap(), text(""));
        assert_eq!(parse_literal("\"\"\"\"\"\"").unwrap(), text(""));
        assert_eq!(parse_literal("b''").unwrap(), Literal::Bytes(vec![]));
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            parse_literal(r#"'a\tb\n\'q\' \x41\101é\U0001F600 \d'"#).unwrap(),
            text("a\tb\n'q' AA\u{e9}\u{1F600} \\d")
        );
    }

    #[test]
    fn test_parse_raw_and_triple_quoted_strings() {
        assert_eq!(parse_literal(r"r'\n'").unwrap(), text("\\n"));
        assert_eq!(
            parse_literal("'''line one\nit's \"two\"'''").unwrap(),
            text("line one\nit's \"two\"")
        );
        assert_eq!(parse_literal("U\"upper\"").unwrap(), text("upper"));
    }

    #[test]
    fn test_parse_adjacent_strings_concatenate() {
        assert_eq!(parse_literal("'9000' \"000009\"").unwrap(), text("9000000009"));
        assert_eq!(
            parse_literal("b'\\x00' rb'\\x'").unwrap(),
            Literal::Bytes(vec![0, b'\\', b'x'])
        );
    }

    #[test]
    fn test_parse_rejects_mixed_string_kinds() {
        let err = parse_literal("'a' b'b'").expect_err("text and bytes");
        assert_eq!(err, LiteralError::MixedStringKinds(4));
    }

    #[test]
    fn test_parse_rejects_non_ascii_bytes() {
        let err = parse_literal("b'caf\u{e9}'").expect_err("non-ASCII bytes");
        assert!(matches!(err, LiteralError::NonAsciiBytes(_)));
    }

    #[test]
    fn test_parse_rejects_unterminated_strings() {
        assert_eq!(
            parse_literal("{'a: 1}").expect_err("unterminated"),
            LiteralError::UnterminatedString(1)
        );
        assert_eq!(
            parse_literal("'a\nb'").expect_err("newline in short string"),
            LiteralError::UnterminatedString(0)
        );
    }

    #[test]
    fn test_parse_rejects_bad_escapes() {
        assert!(matches!(
            parse_literal(r"'\xZZ'").expect_err("bad hex"),
            LiteralError::InvalidEscape(1)
        ));
        assert!(matches!(
            parse_literal(r"'\N{BULLET}'").expect_err("named escape"),
            LiteralError::InvalidEscape(1)
        ));
    }

    #[test]
    fn test_parse_rejects_code() {
        let err = parse_literal("__import__('os').system('rm -rf /')").expect_err("call");
        assert!(matches!(err, LiteralError::UnknownName { name, offset: 0 } if name == "__import__"));

        let err = parse_literal("{'a': len('abc')}").expect_err("call in value");
        assert!(matches!(err, LiteralError::UnknownName { name, .. } if name == "len"));

        let err = parse_literal("1 + 2").expect_err("operator");
        assert_eq!(err, LiteralError::TrailingInput(2));

        let err = parse_literal("true").expect_err("lower-case constant");
        assert!(matches!(err, LiteralError::UnknownName { .. }));
    }

    #[test]
    fn test_parse_rejects_double_sign() {
        let err = parse_literal("--1").expect_err("double sign");
        assert_eq!(
            err,
            LiteralError::UnexpectedChar {
                found: '-',
                offset: 1
            }
        );
    }

    #[test]
    fn test_parse_rejects_unhashable_keys() {
        let err = parse_literal("{[1]: 2}").expect_err("list key");
        assert_eq!(
            err,
            LiteralError::Unhashable {
                kind: "list",
                offset: 1
            }
        );

        let err = parse_literal("{(1, [2]), 3}").expect_err("tuple holding a list");
        assert!(matches!(err, LiteralError::Unhashable { kind: "tuple", .. }));

        assert!(parse_literal("{(1, 2): 3}").is_ok());
    }

    #[test]
    fn test_parse_rejects_structural_errors() {
        assert_eq!(parse_literal("").expect_err("empty"), LiteralError::UnexpectedEnd);
        assert_eq!(parse_literal("   ").expect_err("blank"), LiteralError::UnexpectedEnd);
        assert_eq!(
            parse_literal("{'a': 1").expect_err("unclosed"),
            LiteralError::UnexpectedEnd
        );
        assert_eq!(
            parse_literal("{'a' 1}").expect_err("missing colon"),
            LiteralError::UnexpectedChar {
                found: '1',
                offset: 5
            }
        );
        assert_eq!(
            parse_literal("[1,,2]").expect_err("empty item"),
            LiteralError::UnexpectedChar {
                found: ',',
                offset: 3
            }
        );
        assert_eq!(
            parse_literal("{'a': 1} {}").expect_err("two values"),
            LiteralError::TrailingInput(9)
        );
    }

    #[test]
    fn test_parse_rejects_excessive_nesting() {
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(
            parse_literal(&deep).expect_err("too deep"),
            LiteralError::TooDeep(MAX_LITERAL_DEPTH)
        );

        let shallow = format!("{}{}", "[".repeat(50), "]".repeat(50));
        assert!(parse_literal(&shallow).is_ok());
    }
}
