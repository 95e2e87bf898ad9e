//! Text encoding helpers for XML files
//!
//! ERDDAP's `datasets.xml` is conventionally ISO-8859-1. These helpers
//! sniff the declared encoding and convert between Latin-1 bytes and
//! Rust strings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::descriptor::errors::{ErddapError, ErddapResult};

lazy_static! {
    static ref ENCODING_DECL: Regex =
        Regex::new(r#"^\s*<\?xml[^>]*\bencoding\s*=\s*["']([A-Za-z0-9._-]+)["']"#)
            .expect("encoding declaration pattern is valid");
}

/// Encoding named in the XML declaration, if there is one
pub fn declared_encoding(head: &str) -> Option<String> {
    ENCODING_DECL
        .captures(head)
        .map(|c| c[1].to_ascii_lowercase())
}

/// Whether an encoding label means ISO-8859-1
pub fn is_latin1(label: &str) -> bool {
    matches!(
        label.to_ascii_lowercase().as_str(),
        "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "l1"
    )
}

/// Decode raw XML bytes according to their declaration
///
/// Latin-1 input maps every byte to the code point of the same value;
/// anything else must be valid UTF-8.
pub fn decode_xml_bytes(bytes: &[u8]) -> ErddapResult<String> {
    // The declaration is ASCII in both encodings we handle
    let head_len = bytes.len().min(200);
    let head = String::from_utf8_lossy(&bytes[..head_len]);

    match declared_encoding(&head) {
        Some(label) if is_latin1(&label) => Ok(bytes.iter().map(|&b| b as char).collect()),
        _ => String::from_utf8(bytes.to_vec())
            .map_err(|e| ErddapError::XmlError(format!("input is not valid UTF-8: {}", e))),
    }
}

/// Encode serialised XML as ISO-8859-1
///
/// Characters outside Latin-1 become numeric character references, which
/// is only valid inside text and attribute values.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        if code <= 0xFF {
            out.push(code as u8);
        } else {
            out.extend_from_slice(format!("&#{};", code).as_bytes());
        }
    }
    out
}
