mod cursor;
mod parser;

use std::io::Read;

use crate::error::SyntaxError;
use crate::value::Value;
use crate::{ParseOptions, Result};

pub fn from_str(input: &str, options: &ParseOptions) -> std::result::Result<Value, SyntaxError> {
    parser::parse_str(input, options)
}

pub fn from_slice(input: &[u8], options: &ParseOptions) -> Result<Value> {
    let text = std::str::from_utf8(input)?;
    Ok(from_str(text, options)?)
}

pub fn from_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Value> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_slice(&buf, options)
}

pub fn validate_str(input: &str, options: &ParseOptions) -> std::result::Result<(), SyntaxError> {
    from_str(input, options).map(|_| ())
}
