use base64::{engine::general_purpose, Engine as _};

use crate::parser::DecodeError;

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Reverses a URL-safe Base64 string to the standard alphabet and restores
/// the `=` padding that link producers routinely strip.
pub fn repair_base64(input: &str) -> String {
    let mut repaired = input.trim().replace('-', "+").replace('_', "/");
    while repaired.len() % 4 != 0 {
        repaired.push('=');
    }
    repaired
}

/// Decodes a URL-safe (or standard) Base64 string to UTF-8 text.
///
/// # Arguments
/// * `input` - The Base64 text, padded or not, in either alphabet.
///
/// # Returns
/// The decoded string, or `DecodeError::MalformedEncoding` when the input is
/// not Base64 or does not decode to valid UTF-8.
pub fn url_safe_base64_decode(input: &str) -> Result<String, DecodeError> {
    let bytes = general_purpose::STANDARD
        .decode(repair_base64(input))
        .map_err(|e| DecodeError::MalformedEncoding(format!("invalid base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|_| DecodeError::MalformedEncoding("base64 payload is not UTF-8".to_string()))
}

/// Best-effort variant used for optional parameters: the decoded text when
/// the value is valid Base64, otherwise the value exactly as given.
pub fn url_safe_base64_decode_or_raw(input: &str) -> String {
    url_safe_base64_decode(input).unwrap_or_else(|_| input.to_string())
}
