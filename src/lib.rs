//! Recursive-descent parser for a narrowed JSON dialect.
//!
//! The dialect has objects, arrays, strings, numbers and bareword literals.
//! Strings have no escape sequences, numbers have no sign or exponent, and
//! literals such as `true` or `null` are kept as raw text. Typed coercion is
//! available separately through [`Value::to_json`].
//!
//! ```
//! let value = jason::parse(r#"{"a": [1, 2.5, true]}"#).unwrap();
//! let items = value.get("a").and_then(jason::Value::as_array).unwrap();
//! assert_eq!(items[1], jason::Value::number("2.5"));
//! assert_eq!(items[2], jason::Value::literal("true"));
//! ```

pub mod constants;
pub mod decode;
pub mod error;
pub mod json;
pub mod options;
pub mod value;

use std::io::Read;

pub use crate::error::{Error, ErrorKind, Expected, Location, SyntaxError};
pub use crate::options::{KeyPolicy, ParseOptions, TrailingContent};
pub use crate::value::{Map, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> std::result::Result<Value, SyntaxError> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> std::result::Result<Value, SyntaxError> {
    decode::from_str(input, options)
}

pub fn from_slice(input: &[u8]) -> Result<Value> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<Value> {
    decode::from_slice(input, options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Value> {
    decode::from_reader(reader, options)
}

pub fn validate_str(input: &str) -> std::result::Result<(), SyntaxError> {
    validate_str_with_options(input, &ParseOptions::default())
}

pub fn validate_str_with_options(
    input: &str,
    options: &ParseOptions,
) -> std::result::Result<(), SyntaxError> {
    decode::validate_str(input, options)
}
