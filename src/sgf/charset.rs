//! Byte input and the charset pre-pass
//!
//! Files declare their charset in the root `CA` property. Before anything is tokenized the raw
//! bytes are searched for the first `CA[...]`, and the result decides how the bytes become text.
//! Only UTF-8 is decoded; any other declaration is reported and the bytes are read as UTF-8
//! anyway, with invalid sequences replaced.

use crate::sgf::parsing::{Collection, ParseError, ParseOptions, Parser, Warning};
use std::borrow::Cow;
use tracing::debug;

const CHARSET_KEY: &[u8] = b"CA[";

/// The value of the first `CA[...]` in the raw bytes, if there is a non-empty one
pub fn sniff_charset(data: &[u8]) -> Option<String> {
    let start = data
        .windows(CHARSET_KEY.len())
        .position(|window| window == CHARSET_KEY)?
        + CHARSET_KEY.len();
    let len = data[start..].iter().position(|&b| b == b']')?;
    let name = String::from_utf8_lossy(&data[start..start + len]);
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Decode raw bytes, returning the text and the notices produced on the way
pub fn decode(data: &[u8]) -> (Cow<'_, str>, Vec<Warning>) {
    let mut warnings = Vec::new();
    match sniff_charset(data) {
        None => warnings.push(Warning::MissingCharset),
        Some(charset) if charset.eq_ignore_ascii_case("UTF-8") => {}
        Some(charset) => warnings.push(Warning::UnsupportedCharset { charset }),
    }

    let text = String::from_utf8_lossy(data);
    if matches!(text, Cow::Owned(_)) {
        warnings.push(Warning::InvalidUtf8);
    }
    debug!(bytes = data.len(), notices = warnings.len(), "decoded input");
    (text, warnings)
}

/// Parse raw bytes. Decoding notices come before any lexical warnings.
pub fn parse_bytes(data: &[u8], options: &ParseOptions) -> Result<Collection, ParseError> {
    let (text, notices) = decode(data);
    Parser::new(&text, *options).with_warnings(notices).parse()
}
