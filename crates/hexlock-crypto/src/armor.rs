//! Chunked hex armor: the textual on-disk form of a sealed buffer
//!
//! `.enc` files hold lowercase hex broken into 64-character lines so the
//! ciphertext diffs line by line under version control instead of as one
//! opaque blob. The transform is an exact round trip.

use hexlock_core::{HexlockError, HexlockResult};

/// Hex characters per armored line.
pub const LINE_WIDTH: usize = 64;

/// Hex-encode and wrap into 64-character newline-terminated lines.
///
/// The final partial line is newline-terminated too; empty input encodes
/// to the empty string.
pub fn encode(data: &[u8]) -> String {
    let raw = hex::encode(data);
    let mut out = String::with_capacity(raw.len() + raw.len() / LINE_WIDTH + 1);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && i % LINE_WIDTH == 0 {
            out.push('\n');
        }
        out.push(c);
    }
    if !raw.is_empty() {
        out.push('\n');
    }
    out
}

/// Strip line breaks and hex-decode.
///
/// Any residual non-hex character, or an odd number of hex digits, fails
/// with `MalformedEncoding`.
pub fn decode(text: &str) -> HexlockResult<Vec<u8>> {
    let stripped: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    hex::decode(&stripped).map_err(|e| HexlockError::MalformedEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"some sealed bytes that are long enough to wrap across several armored lines";
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn test_line_shape() {
        // 100 bytes -> 200 hex chars -> three lines of 64 + one of 8
        let encoded = encode(&[0xA5u8; 100]);
        let lines: Vec<&str> = encoded.split_terminator('\n').collect();

        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() <= LINE_WIDTH));
        assert!(lines[..3].iter().all(|l| l.len() == LINE_WIDTH));
        assert_eq!(lines[3].len(), 8);
        assert!(encoded.ends_with('\n'));
    }

    #[test]
    fn test_exact_multiple_of_line_width() {
        // 32 bytes -> exactly one 64-char line, still newline-terminated
        let encoded = encode(&[0u8; 32]);
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded.matches('\n').count(), 1);
    }

    #[test]
    fn test_crlf_tolerated() {
        let encoded = encode(b"hexlock").replace('\n', "\r\n");
        assert_eq!(decode(&encoded).unwrap(), b"hexlock");
    }

    #[test]
    fn test_non_hex_rejected() {
        let err = decode("deadbeefgg\n").unwrap_err();
        assert!(matches!(err, HexlockError::MalformedEncoding(_)));
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(decode("abc").is_err());
    }
}
