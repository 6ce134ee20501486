//! Standard base64 decoding.

use crate::constants::{is_skipped, DECODE_TABLE, INVALID, PAD_BYTE};
use crate::DecodeError;

/// Upper bound on the decoded length of `symbols` base64 symbols.
pub fn decoded_len_upper_bound(symbols: usize) -> usize {
    (symbols / 4) * 3 + 3
}

/// Incremental base64 decoder.
///
/// Bytes are fed one at a time with [`Decoder::push`]. Symbols are gathered
/// into 4-symbol blocks, and a block is appended to the output only once it
/// is complete and valid. Padding may only close the final block: once a
/// padded block has been decoded, any further symbol is rejected.
///
/// ```
/// use b64_base64::Decoder;
///
/// let mut decoder = Decoder::new();
/// let mut out = Vec::new();
/// for (position, &byte) in b"TW\r\nFu".iter().enumerate() {
///     decoder.push(byte, position, &mut out).unwrap();
/// }
/// decoder.finish().unwrap();
/// assert_eq!(out, b"Man");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    sextets: [u8; 4],
    filled: usize,
    padding: usize,
    finished: bool,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            sextets: [0; 4],
            filled: 0,
            padding: 0,
            finished: false,
        }
    }

    /// Feeds one input byte found at `position`, appending to `out` when a
    /// block completes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidCharacter`] for a byte outside the
    /// alphabet, `=` and whitespace, and [`DecodeError::InvalidPadding`] for a
    /// misplaced `=` or a symbol following padding.
    pub fn push(
        &mut self,
        byte: u8,
        position: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), DecodeError> {
        if is_skipped(byte) {
            return Ok(());
        }

        if byte == PAD_BYTE {
            // xx== and xxx= are the only padded shapes.
            if self.finished || self.filled < 2 {
                return Err(DecodeError::InvalidPadding { position });
            }
            self.padding += 1;
            self.sextets[self.filled] = 0;
        } else {
            let sextet = DECODE_TABLE[byte as usize];
            if sextet == INVALID {
                return Err(DecodeError::InvalidCharacter {
                    character: char::from(byte),
                    position,
                });
            }
            if self.finished || self.padding > 0 {
                return Err(DecodeError::InvalidPadding { position });
            }
            self.sextets[self.filled] = sextet;
        }
        self.filled += 1;

        if self.filled == 4 {
            self.flush(position, out)?;
        }
        Ok(())
    }

    fn flush(&mut self, position: usize, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let count = 3 - self.padding;
        if count == 0 {
            return Err(DecodeError::InvalidPadding { position });
        }

        let [s0, s1, s2, s3] = self.sextets.map(u32::from);
        let triple = (s0 << 18) | (s1 << 12) | (s2 << 6) | s3;
        let bytes = [(triple >> 16) as u8, (triple >> 8) as u8, triple as u8];
        out.extend_from_slice(&bytes[..count]);

        self.finished = self.padding > 0;
        self.filled = 0;
        self.padding = 0;
        Ok(())
    }

    /// Checks that the input ended on a block boundary.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedInput`] if 1 to 3 symbols are pending.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.filled != 0 {
            return Err(DecodeError::TruncatedInput {
                leftover: self.filled,
            });
        }
        Ok(())
    }
}

/// Decodes standard base64 text to bytes.
///
/// CR, LF, space and tab are skipped anywhere in the input. Empty or
/// whitespace-only input decodes to an empty vector.
///
/// # Errors
///
/// See [`Decoder::push`] and [`Decoder::finish`]. Also returns
/// [`DecodeError::AllocationFailed`] if the output cannot be allocated.
///
/// # Example
///
/// ```
/// use b64_base64::{decode, DecodeError};
///
/// assert_eq!(decode("TWFu").unwrap(), b"Man");
/// assert_eq!(
///     decode("AB%D"),
///     Err(DecodeError::InvalidCharacter { character: '%', position: 2 })
/// );
/// ```
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    let input = text.as_ref();
    let symbols = input.iter().filter(|&&byte| !is_skipped(byte)).count();
    let bound = decoded_len_upper_bound(symbols);
    log::trace!("decoding {symbols} symbols into at most {bound} bytes");

    let mut out = Vec::new();
    out.try_reserve_exact(bound)
        .map_err(|_| DecodeError::AllocationFailed)?;

    let mut decoder = Decoder::new();
    for (position, &byte) in input.iter().enumerate() {
        if let Err(mut err) = decoder.push(byte, position, &mut out) {
            if let DecodeError::InvalidCharacter { character, .. } = &mut err {
                *character = character_at(input, position);
            }
            log::debug!("rejected base64 input: {err}");
            return Err(err);
        }
    }
    if let Err(err) = decoder.finish() {
        log::debug!("rejected base64 input: {err}");
        return Err(err);
    }

    debug_assert!(out.len() <= bound);
    Ok(out)
}

/// The character starting at `position`: the whole UTF-8 sequence when one
/// is valid there, otherwise the raw byte read as Latin-1.
fn character_at(input: &[u8], position: usize) -> char {
    let end = input.len().min(position + 4);
    input[position..end]
        .utf8_chunks()
        .next()
        .and_then(|chunk| chunk.valid().chars().next())
        .unwrap_or_else(|| char::from(input[position]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode(" \r\n\t").unwrap(), b"");
    }

    #[test]
    fn test_padding_shapes() {
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
        assert_eq!(decode("Zm9v").unwrap(), b"foo");
        assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn test_zero_bytes_survive() {
        assert_eq!(decode("AAAA").unwrap(), [0, 0, 0]);
        assert_eq!(decode("AA==").unwrap(), [0]);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(decoded_len_upper_bound(0), 3);
        assert_eq!(decoded_len_upper_bound(4), 6);
        assert_eq!(decoded_len_upper_bound(7), 6);
    }

    #[test]
    fn test_lenient_trailing_bits() {
        assert_eq!(decode("Zh==").unwrap(), b"f");
        assert_eq!(decode("Zm9=").unwrap(), b"fo");
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            decode("AB%D"),
            Err(DecodeError::InvalidCharacter {
                character: '%',
                position: 2
            })
        );
        assert_eq!(
            decode("Zm9v-A=="),
            Err(DecodeError::InvalidCharacter {
                character: '-',
                position: 4
            })
        );
        assert_eq!(
            decode([b'Z', b'm', 0xc3, b'v']),
            Err(DecodeError::InvalidCharacter {
                character: '\u{c3}',
                position: 2
            })
        );
    }

    #[test]
    fn test_invalid_multibyte_character() {
        assert_eq!(
            decode("AB€D"),
            Err(DecodeError::InvalidCharacter {
                character: '€',
                position: 2
            })
        );
        assert_eq!(
            decode("Zm9vé==="),
            Err(DecodeError::InvalidCharacter {
                character: 'é',
                position: 4
            })
        );
        // Lone continuation byte and a sequence cut short by end of input.
        assert_eq!(
            decode([b'Z', 0x82, b'9', b'v']),
            Err(DecodeError::InvalidCharacter {
                character: '\u{82}',
                position: 1
            })
        );
        assert_eq!(
            decode([b'Z', b'm', 0xe2, 0x82]),
            Err(DecodeError::InvalidCharacter {
                character: '\u{e2}',
                position: 2
            })
        );
    }

    #[test]
    fn test_position_counts_whitespace() {
        assert_eq!(
            decode("Zm\r\n9v!"),
            Err(DecodeError::InvalidCharacter {
                character: '!',
                position: 6
            })
        );
    }

    #[test]
    fn test_truncated() {
        assert_eq!(decode("QQ"), Err(DecodeError::TruncatedInput { leftover: 2 }));
        assert_eq!(decode("Zm9vY"), Err(DecodeError::TruncatedInput { leftover: 1 }));
        assert_eq!(decode("QQ="), Err(DecodeError::TruncatedInput { leftover: 3 }));
    }

    #[test]
    fn test_misplaced_padding() {
        assert_eq!(decode("A=AA"), Err(DecodeError::InvalidPadding { position: 1 }));
        assert_eq!(decode("===="), Err(DecodeError::InvalidPadding { position: 0 }));
        assert_eq!(decode("Zm=v"), Err(DecodeError::InvalidPadding { position: 3 }));
        assert_eq!(decode("Zg==Zg=="), Err(DecodeError::InvalidPadding { position: 4 }));
        assert_eq!(decode("Zm8=="), Err(DecodeError::InvalidPadding { position: 4 }));
    }

    #[test]
    fn test_whitespace_after_padding() {
        assert_eq!(decode("Zg==\r\n").unwrap(), b"f");
        assert_eq!(decode("Zg= =").unwrap(), b"f");
    }

    #[test]
    fn test_push_emits_only_whole_blocks() {
        let mut decoder = Decoder::new();
        let mut out = Vec::new();
        for (position, &byte) in b"Zm9".iter().enumerate() {
            decoder.push(byte, position, &mut out).unwrap();
        }
        assert!(out.is_empty());
        decoder.push(b'v', 3, &mut out).unwrap();
        assert_eq!(out, b"foo");
        decoder.finish().unwrap();
    }
}
