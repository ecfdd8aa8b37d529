//! Base64 VLQ decoding for source map `mappings` segments.

use crate::error::Error;

/// Continuation bit: set when more 5-bit groups follow.
const CONTINUATION: u32 = 1 << 5;

/// Mask for the low 5 payload bits of a base64 digit.
const MASK: u32 = 31;

/// Value of one base64 digit in the source map alphabet.
fn base64_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    match c {
        'A'..='Z' => Some(code - u32::from('A')),
        'a'..='z' => Some(code - u32::from('a') + 26),
        '0'..='9' => Some(code - u32::from('0') + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

/// Decode one comma-free mappings segment into its signed field values.
///
/// Each value is a little-endian sequence of 5-bit groups with a continuation
/// bit, and the sign lives in the least significant bit of the assembled
/// number.
///
/// # Errors
///
/// Returns `Error::DecodeFailed` on characters outside the base64 alphabet,
/// on values too large for the accumulator, and on a trailing group whose
/// continuation bit promises more input than the segment holds.
pub fn decode_segment(segment: &str) -> Result<Vec<i64>, Error> {
    let mut values = Vec::new();
    let mut accumulator: i64 = 0;
    let mut shift: u32 = 0;

    for c in segment.chars() {
        let digit = base64_value(c).ok_or_else(|| Error::DecodeFailed {
            reason: format!("invalid VLQ character `{c}`"),
        })?;

        if shift > 31 {
            return Err(Error::DecodeFailed {
                reason: "VLQ value too large".to_string(),
            });
        }

        accumulator |= i64::from(digit & MASK) << shift;

        if digit & CONTINUATION == 0 {
            let negative = accumulator & 1 == 1;
            let magnitude = accumulator >> 1;
            values.push(if negative { -magnitude } else { magnitude });
            accumulator = 0;
            shift = 0;
        } else {
            shift = shift.saturating_add(5);
        }
    }

    if shift > 0 {
        return Err(Error::DecodeFailed {
            reason: "unterminated VLQ sequence".to_string(),
        });
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::decode_segment;

    #[test]
    fn four_field_segment() {
        // generated column 10, source 0, original line 6, original column 2.
        assert_eq!(decode_segment("UAME").unwrap(), vec![10, 0, 6, 2]);
    }

    #[test]
    fn single_zero() {
        assert_eq!(decode_segment("A").unwrap(), vec![0]);
    }

    #[test]
    fn negative_value() {
        // 'D' is digit 3: payload 1 with sign bit set.
        assert_eq!(decode_segment("D").unwrap(), vec![-1]);
    }

    #[test]
    fn multi_group_value() {
        // 'yB' = 50 then 1: (18 | (1 << 5)) >> 1 = 25.
        assert_eq!(decode_segment("yB").unwrap(), vec![25]);
    }

    #[test]
    fn empty_segment() {
        assert_eq!(decode_segment("").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn rejects_invalid_character() {
        assert!(decode_segment("U*").is_err());
    }

    #[test]
    fn rejects_unterminated_sequence() {
        // 'g' is digit 32: continuation bit set with nothing following.
        assert!(decode_segment("g").is_err());
    }
}
