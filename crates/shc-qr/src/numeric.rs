//! # Numeric Remap — Token Characters to Digit Pairs
//!
//! QR numeric mode packs decimal digits roughly 1.7× denser than byte mode,
//! so each token character `c` is remapped to the zero-padded two-digit
//! decimal of `ord(c) - 45`.
//!
//! The offset 45 is `'-'`, the smallest code point in the base64url-plus-dot
//! token alphabet. Only characters in `'-'..='~'` (0x2D..=0x7E) yield
//! non-negative two-digit groups; anything else is rejected before any
//! output is produced. Within that range the remap is a bijection: the
//! decoder recovers `c` as `pair + 45`.

use shc_core::QrError;

/// Offset subtracted from each character's code point.
const CHAR_OFFSET: u8 = b'-'; // 45

/// Smallest encodable character.
const MIN_CHAR: char = '-'; // 0x2D
/// Largest encodable character.
const MAX_CHAR: char = '~'; // 0x7E

/// Remap a token string to its even-length numeric body.
///
/// Output length is exactly `2 × token.len()`.
///
/// # Errors
///
/// Returns `QrError::UnencodableCharacter` for the first character outside
/// `'-'..='~'`, with its zero-based position.
pub fn encode_numeric(token: &str) -> Result<String, QrError> {
    let mut digits = String::with_capacity(token.len() * 2);
    for (position, ch) in token.chars().enumerate() {
        if !(MIN_CHAR..=MAX_CHAR).contains(&ch) {
            return Err(QrError::UnencodableCharacter { ch, position });
        }
        let value = ch as u8 - CHAR_OFFSET; // 0..=81
        digits.push((b'0' + value / 10) as char);
        digits.push((b'0' + value % 10) as char);
    }
    Ok(digits)
}

/// Reverse the remap: digit pairs back to token characters.
///
/// # Errors
///
/// Returns `QrError::MalformedNumeric` for odd-length input, non-digit
/// characters, or a pair that maps outside the encodable alphabet.
pub fn decode_numeric(digits: &str) -> Result<String, QrError> {
    let bytes = digits.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(QrError::MalformedNumeric(format!(
            "digit string length {} is odd",
            bytes.len()
        )));
    }
    let mut token = String::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        let (hi, lo) = (pair[0], pair[1]);
        if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
            return Err(QrError::MalformedNumeric(format!(
                "non-digit pair {:?}",
                std::str::from_utf8(pair).unwrap_or("<non-utf8>")
            )));
        }
        let value = (hi - b'0') * 10 + (lo - b'0');
        let ch = value + CHAR_OFFSET;
        if ch > MAX_CHAR as u8 {
            return Err(QrError::MalformedNumeric(format!(
                "pair value {value} maps outside the token alphabet"
            )));
        }
        token.push(ch as char);
    }
    Ok(token)
}
