use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::{CoreError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Serialize)]
pub struct DecodedText {
    pub encoding: String,
    pub text: String,
    pub had_errors: bool,
}

/// Picks an encoding for `bytes`: UTF-8 when a BOM is present, otherwise
/// whatever `chardetng` guesses.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if bytes.starts_with(&UTF8_BOM) {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

pub fn decode(bytes: &[u8]) -> DecodedText {
    let encoding = detect(bytes);
    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    let (text, _, had_errors) = encoding.decode(body);

    if had_errors {
        log::warn!("input had bytes invalid for {}", encoding.name());
    }

    DecodedText {
        encoding: encoding.name().to_lowercase(),
        text: text.into_owned(),
        had_errors,
    }
}

pub fn read_text(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(decode(&bytes))
}
