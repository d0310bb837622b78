use memchr::memchr;
use smol_str::SmolStr;

use crate::constants::{is_alpha, is_digit, MAX_DEPTH_LIMIT};
use crate::error::{ErrorKind, Expected, SyntaxError};
use crate::options::{KeyPolicy, ParseOptions, TrailingContent};
use crate::value::{Map, Value};

use super::cursor::Cursor;

type ParseResult<T> = Result<T, SyntaxError>;

pub fn parse_str(input: &str, options: &ParseOptions) -> ParseResult<Value> {
    let mut parser = Parser::new(input, options);
    parser.parse_document()
}

/// Recursive-descent parser over a single input. One instance per call.
struct Parser<'a, 'o> {
    cursor: Cursor<'a>,
    options: &'o ParseOptions,
    depth: usize,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(input: &'a str, options: &'o ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        if self.options.trailing == TrailingContent::Reject {
            self.cursor.skip_whitespace();
            if let Some(ch) = self.cursor.peek() {
                return Err(self.error(ErrorKind::TrailingContent(ch)));
            }
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.cursor.skip_whitespace();
        self.cursor.mark_start();
        let Some(ch) = self.cursor.advance() else {
            return Err(self.error(ErrorKind::UnexpectedEnd(Expected::Value)));
        };
        match ch {
            '"' => self.parse_string(),
            '[' => self.parse_array(),
            '{' => self.parse_object(),
            ch if is_alpha(ch) => Ok(self.parse_literal()),
            ch if is_digit(ch) => Ok(self.parse_number()),
            other => Err(self.error_at(self.cursor.start(), ErrorKind::UnexpectedCharacter(other))),
        }
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter_container()?;
        let mut map = Map::new();
        while !self.at_closing('}')? {
            if !map.is_empty() {
                self.parse_comma()?;
            }
            let key = self.parse_key()?;
            self.parse_colon()?;
            let value = self.parse_value()?;
            map.insert(key, value);
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter_container()?;
        let mut items = Vec::new();
        while !self.at_closing(']')? {
            if !items.is_empty() {
                self.parse_comma()?;
            }
            items.push(self.parse_value()?);
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Skips whitespace and consumes `close` if it is next. Running out of
    /// input inside a container is an error.
    fn at_closing(&mut self, close: char) -> ParseResult<bool> {
        self.cursor.skip_whitespace();
        if self.cursor.is_end_of_input() {
            return Err(self.error(ErrorKind::UnexpectedEnd(Expected::Char(close))));
        }
        if self.cursor.peek() == Some(close) {
            self.cursor.advance();
            return Ok(true);
        }
        Ok(false)
    }

    fn enter_container(&mut self) -> ParseResult<()> {
        let max_depth = self.options.max_depth.min(MAX_DEPTH_LIMIT);
        self.depth += 1;
        if self.depth > max_depth {
            return Err(self.error_at(
                self.cursor.start(),
                ErrorKind::NestingTooDeep(max_depth),
            ));
        }
        Ok(())
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        self.cursor.skip_whitespace();
        let key_start = self.cursor.current();
        match self.parse_value()? {
            Value::String(key) => Ok(key),
            Value::Literal(text) | Value::Number(text)
                if self.options.key_policy == KeyPolicy::Coerce =>
            {
                Ok(text.to_string())
            }
            other => Err(self.error_at(key_start, ErrorKind::InvalidKey(other.kind_name()))),
        }
    }

    // The opening quote is already consumed. No escapes: the next quote ends
    // the string.
    fn parse_string(&mut self) -> ParseResult<Value> {
        let body_start = self.cursor.current();
        match memchr(b'"', self.cursor.rest().as_bytes()) {
            Some(len) => {
                let body = &self.cursor.input()[body_start..body_start + len];
                self.cursor.jump_to(body_start + len + 1);
                Ok(Value::String(body.to_string()))
            }
            None => {
                self.cursor.jump_to(self.cursor.input().len());
                Err(self.error(ErrorKind::UnexpectedEnd(Expected::Char('"'))))
            }
        }
    }

    fn parse_literal(&mut self) -> Value {
        self.cursor.advance_while(is_alpha);
        Value::Literal(SmolStr::new(self.cursor.slice_from_start()))
    }

    fn parse_number(&mut self) -> Value {
        self.cursor.advance_while(is_digit);
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(is_digit) {
            self.cursor.advance();
            self.cursor.advance_while(is_digit);
        }
        Value::Number(SmolStr::new(self.cursor.slice_from_start()))
    }

    fn parse_comma(&mut self) -> ParseResult<()> {
        self.expect(',')
    }

    fn parse_colon(&mut self) -> ParseResult<()> {
        self.cursor.skip_whitespace();
        self.expect(':')
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        match self.cursor.peek() {
            Some(ch) if ch == expected => {
                self.cursor.advance();
                Ok(())
            }
            Some(found) => Err(self.error(ErrorKind::UnexpectedToken { expected, found })),
            None => Err(self.error(ErrorKind::UnexpectedEnd(Expected::Char(expected)))),
        }
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        self.error_at(self.cursor.current(), kind)
    }

    fn error_at(&self, position: usize, kind: ErrorKind) -> SyntaxError {
        SyntaxError::report(self.cursor.input(), position, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParseResult<Value> {
        parse_str(input, &ParseOptions::default())
    }

    fn kind_of(input: &str) -> ErrorKind {
        parse(input).expect_err("should fail").kind().clone()
    }

    #[rstest::rstest]
    fn scalars_keep_raw_text() {
        assert_eq!(parse(r#""hello""#).unwrap(), Value::string("hello"));
        assert_eq!(parse("true").unwrap(), Value::literal("true"));
        assert_eq!(parse("nothing").unwrap(), Value::literal("nothing"));
        assert_eq!(parse("42").unwrap(), Value::number("42"));
        assert_eq!(parse("3.14").unwrap(), Value::number("3.14"));
    }

    #[rstest::rstest]
    fn number_without_fraction_digit_stops_before_dot() {
        assert_eq!(parse("3.").unwrap(), Value::number("3"));
        assert_eq!(parse("[3.x]").unwrap_err().position(), 2);
    }

    #[rstest::rstest]
    fn number_takes_a_single_fraction() {
        let err = parse("[1.2.3]").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnexpectedToken {
                expected: ',',
                found: '.'
            }
        );
    }

    #[rstest::rstest]
    fn literal_stops_at_first_non_alpha() {
        assert_eq!(parse("tru3").unwrap(), Value::literal("tru"));
        assert_eq!(
            kind_of("[tru3]"),
            ErrorKind::UnexpectedToken {
                expected: ',',
                found: '3'
            }
        );
    }

    #[rstest::rstest]
    fn string_ends_at_first_quote_even_after_backslash() {
        assert_eq!(parse(r#""a\"b""#).unwrap(), Value::string("a\\"));
    }

    #[rstest::rstest]
    fn string_keeps_multibyte_text() {
        assert_eq!(parse("\"héllo 💩\"").unwrap(), Value::string("héllo 💩"));
    }

    #[rstest::rstest]
    fn empty_containers() {
        assert_eq!(parse("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(parse("{ }").unwrap(), Value::Object(Map::new()));
    }

    #[rstest::rstest]
    fn object_consumes_closing_brace() {
        let value = parse(r#"[{"a":1},{"b":2}]"#).unwrap();
        assert_eq!(value.as_array().map(<[Value]>::len), Some(2));
    }

    #[rstest::rstest]
    fn duplicate_keys_keep_last_value() {
        let value = parse(r#"{"a":1,"a":2}"#).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&Value::number("2")));
    }

    #[rstest::rstest]
    fn leading_minus_is_rejected_at_dispatch() {
        let err = parse("-5").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedCharacter('-'));
        assert_eq!(err.position(), 0);
    }

    #[rstest::rstest]
    fn unexpected_character_reports_its_own_offset() {
        let err = parse("[1, @]").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedCharacter('@'));
        assert_eq!(err.position(), 4);
        assert_eq!(err.context(), "[1,");
    }

    #[rstest::rstest]
    fn missing_comma_names_found_character() {
        let err = parse("[1 2]").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnexpectedToken {
                expected: ',',
                found: '2'
            }
        );
        assert_eq!(err.position(), 3);
    }

    #[rstest::rstest]
    fn missing_colon_names_found_character() {
        assert_eq!(
            kind_of(r#"{"a" 1}"#),
            ErrorKind::UnexpectedToken {
                expected: ':',
                found: '1'
            }
        );
    }

    #[rstest::rstest]
    #[case("", Expected::Value)]
    #[case("   ", Expected::Value)]
    #[case("\"abc", Expected::Char('"'))]
    #[case("[1,2", Expected::Char(']'))]
    #[case("[1,", Expected::Value)]
    #[case("{", Expected::Char('}'))]
    #[case(r#"{"a""#, Expected::Char(':'))]
    #[case(r#"{"a":"#, Expected::Value)]
    #[case(r#"{"a":1"#, Expected::Char('}'))]
    fn exhausted_input_is_reported(#[case] input: &str, #[case] expected: Expected) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEnd(expected));
        assert_eq!(err.position(), input.len());
    }

    #[rstest::rstest]
    fn trailing_comma_is_rejected() {
        assert_eq!(kind_of("[1,]"), ErrorKind::UnexpectedCharacter(']'));
        assert_eq!(kind_of(r#"{"a":1,}"#), ErrorKind::UnexpectedCharacter('}'));
    }

    #[rstest::rstest]
    fn non_string_keys_are_rejected_by_default() {
        let err = parse("{a:1}").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidKey("literal"));
        assert_eq!(err.position(), 1);
    }

    #[rstest::rstest]
    fn coerced_keys_use_raw_text() {
        let options = ParseOptions::new().with_key_policy(KeyPolicy::Coerce);
        let value = parse_str("{a:1, 2:b}", &options).unwrap();
        assert_eq!(value.get("a"), Some(&Value::number("1")));
        assert_eq!(value.get("2"), Some(&Value::literal("b")));
        let err = parse_str("{[1]:2}", &options).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidKey("array"));
    }

    #[rstest::rstest]
    fn nesting_limit_is_enforced() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(parse_str("[[1]]", &options).is_ok());
        let err = parse_str("[[[1]]]", &options).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NestingTooDeep(2));
        assert_eq!(err.position(), 2);
    }

    #[rstest::rstest]
    fn nesting_limit_is_capped_even_when_set_directly() {
        let mut options = ParseOptions::default();
        options.max_depth = usize::MAX;
        let input = "[".repeat(MAX_DEPTH_LIMIT + 1);
        let err = parse_str(&input, &options).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NestingTooDeep(MAX_DEPTH_LIMIT));
        assert_eq!(err.position(), MAX_DEPTH_LIMIT);
    }

    #[rstest::rstest]
    fn siblings_do_not_accumulate_depth() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(parse_str("[[1],[2],{\"a\":[3]}]", &options).is_ok());
    }

    #[rstest::rstest]
    fn trailing_content_is_ignored_by_default() {
        assert_eq!(parse("[1] [2]").unwrap(), Value::Array(vec![Value::number("1")]));
    }

    #[rstest::rstest]
    fn trailing_content_can_be_rejected() {
        let options = ParseOptions::strict();
        assert!(parse_str("[1]  \n", &options).is_ok());
        let err = parse_str("[1] x", &options).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TrailingContent('x'));
        assert_eq!(err.position(), 4);
    }
}
