//! Standard base64 encoding with CRLF line wrapping.

use std::io::{self, Read};

use crate::constants::{ALPHABET_BYTES, LINE_BREAK, LINE_LENGTH, PAD};
use crate::EncodeError;

/// Bytes pulled from a reader per call. A multiple of 3 so that blocks never
/// straddle two reads.
const READ_CHUNK: usize = 3 * 1024;

/// Returns the exact length of the encoded text for `lin` input bytes,
/// line breaks included, or `None` if it does not fit in `usize`.
///
/// ```
/// use b64_base64::encoded_len;
///
/// assert_eq!(encoded_len(3), Some(4));
/// assert_eq!(encoded_len(57), Some(76));
/// assert_eq!(encoded_len(58), Some(82));
/// ```
pub fn encoded_len(lin: usize) -> Option<usize> {
    let chunks = lin.div_ceil(3);
    let nchars = chunks.checked_mul(4)?;
    let lines = if nchars > 0 {
        (nchars - 1) / LINE_LENGTH
    } else {
        0
    };
    nchars.checked_add(lines.checked_mul(LINE_BREAK.len())?)
}

/// Output text plus the count of symbols written so far.
struct Output {
    text: String,
    symbols: usize,
}

impl Output {
    fn with_capacity(len: usize) -> Result<Self, EncodeError> {
        let mut text = String::new();
        text.try_reserve_exact(len)
            .map_err(|_| EncodeError::AllocationFailed)?;
        Ok(Self { text, symbols: 0 })
    }

    /// Writes the 4 symbols for a block of 1 to 3 bytes.
    fn push_block(&mut self, block: &[u8]) {
        debug_assert!(!block.is_empty() && block.len() <= 3);

        if self.symbols > 0 && self.symbols % LINE_LENGTH == 0 {
            self.text.push_str(LINE_BREAK);
        }

        let o1 = block[0] as u32;
        let o2 = block.get(1).copied().unwrap_or(0) as u32;
        let o3 = block.get(2).copied().unwrap_or(0) as u32;
        let triple = (o1 << 16) | (o2 << 8) | o3;

        let third = if block.len() > 1 { symbol(triple >> 6) } else { PAD };
        let fourth = if block.len() > 2 { symbol(triple) } else { PAD };

        self.text.push(symbol(triple >> 18));
        self.text.push(symbol(triple >> 12));
        self.text.push(third);
        self.text.push(fourth);
        self.symbols += 4;
    }

    fn finish(self, expected: usize) -> String {
        debug_assert_eq!(self.text.len(), expected);
        self.text
    }
}

#[inline]
fn symbol(sextet: u32) -> char {
    ALPHABET_BYTES[(sextet & 0x3f) as usize] as char
}

fn output_for(lin: usize) -> Result<(Output, usize), EncodeError> {
    let total = encoded_len(lin).ok_or(EncodeError::AllocationFailed)?;
    log::trace!("encoding {lin} bytes into {total} characters");
    Ok((Output::with_capacity(total)?, total))
}

/// Encodes a byte slice to line-wrapped standard base64.
///
/// A CRLF pair separates every 76 symbols; there is no trailing line break.
///
/// # Errors
///
/// Returns [`EncodeError::EmptyInput`] for an empty slice and
/// [`EncodeError::AllocationFailed`] if the output cannot be allocated.
///
/// # Example
///
/// ```
/// use b64_base64::encode;
///
/// assert_eq!(encode(&[0x4d, 0x61, 0x6e]).unwrap(), "TWFu");
/// assert_eq!(encode(b"f").unwrap(), "Zg==");
/// ```
pub fn encode(bytes: &[u8]) -> Result<String, EncodeError> {
    if bytes.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    let (mut out, total) = output_for(bytes.len())?;
    for block in bytes.chunks(3) {
        out.push_block(block);
    }
    Ok(out.finish(total))
}

/// Encodes exactly `declared_len` bytes pulled from `reader`.
///
/// The output is identical to [`encode`] over the same bytes. Bytes past
/// `declared_len` are left unread.
///
/// # Errors
///
/// Returns [`EncodeError::TruncatedInput`] if the reader ends early,
/// [`EncodeError::Io`] if it fails, and otherwise the errors of [`encode`].
///
/// # Example
///
/// ```
/// use b64_base64::encode_reader;
///
/// let encoded = encode_reader(&b"hello"[..], 5).unwrap();
/// assert_eq!(encoded, "aGVsbG8=");
/// ```
pub fn encode_reader<R: Read>(mut reader: R, declared_len: usize) -> Result<String, EncodeError> {
    if declared_len == 0 {
        return Err(EncodeError::EmptyInput);
    }
    let (mut out, total) = output_for(declared_len)?;
    let mut buf = [0u8; READ_CHUNK];
    let mut consumed = 0;

    while consumed < declared_len {
        let want = READ_CHUNK.min(declared_len - consumed);
        let got = fill(&mut reader, &mut buf[..want]).map_err(|e| EncodeError::Io(e.kind()))?;
        consumed += got;
        if got < want {
            log::debug!("reader ended after {consumed} of {declared_len} bytes");
            return Err(EncodeError::TruncatedInput {
                expected: declared_len,
                actual: consumed,
            });
        }
        for block in buf[..got].chunks(3) {
            out.push_block(block);
        }
    }

    Ok(out.finish(total))
}

/// Reads until `buf` is full or the reader is exhausted.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
