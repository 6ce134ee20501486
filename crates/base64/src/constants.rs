/// Standard base64 alphabet.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 alphabet as a byte array (used for byte-level operations and const evaluation).
pub const ALPHABET_BYTES: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character.
pub const PAD: char = '=';

/// Padding character as a byte.
pub const PAD_BYTE: u8 = b'=';

/// Number of symbols written before a line break is inserted.
pub const LINE_LENGTH: usize = 76;

/// Line separator inserted between lines of encoded output.
pub const LINE_BREAK: &str = "\r\n";

// Line breaks are only ever inserted between whole 4-symbol blocks.
const _: () = assert!(LINE_LENGTH % 4 == 0);

/// Marks bytes that are not part of the alphabet in [`DECODE_TABLE`].
pub(crate) const INVALID: u8 = 0xff;

/// Reverse lookup: byte value to its 0..63 alphabet index, or [`INVALID`].
pub(crate) static DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET_BYTES[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Bytes the decoder skips wherever they appear.
#[inline]
pub(crate) const fn is_skipped(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n' | b' ' | b'\t')
}
