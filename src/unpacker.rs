//! The bit-level unpacker: reconstructs a sequence of positive integers from
//! a byte stream produced by [`crate::encode`].

use crate::codebook::Codebook;
use crate::integer::Unsigned;
use crate::scheme::Scheme;
use crate::unpack_error::UnpackError;

/// A read-only cursor over a byte slice, yielding bits MSB-first.
///
/// Kept separate from the per-value state machine so that a run-length code
/// (itself decoded through the same state machine, against a wider codebook)
/// can finish mid-byte without losing track of the unconsumed tail of that
/// byte: both the plain-value decoding loop and the run-length decoding loop
/// share one cursor.
struct BitCursor<'a> {
    bytes: &'a [u8],
    byte_idx: usize,
    bit_idx: u8,
}

impl<'a> BitCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            byte_idx: 0,
            bit_idx: 0,
        }
    }

    #[inline(always)]
    fn at_byte_boundary(&self) -> bool {
        self.bit_idx == 0
    }

    /// Returns the next whole byte without consuming it, but only when the
    /// cursor sits exactly on a byte boundary.
    fn peek_byte(&self) -> Option<u8> {
        if self.at_byte_boundary() {
            self.bytes.get(self.byte_idx).copied()
        } else {
            None
        }
    }

    /// Consumes a byte that was just peeked via [`Self::peek_byte`].
    fn skip_byte(&mut self) {
        debug_assert!(self.at_byte_boundary());
        self.byte_idx += 1;
    }

    fn next_bit(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.byte_idx)?;
        let bit = (byte >> (7 - self.bit_idx)) & 1;
        self.bit_idx += 1;
        if self.bit_idx == 8 {
            self.bit_idx = 0;
            self.byte_idx += 1;
        }
        Some(bit)
    }
}

/// Per-value decoding state: which bucket we're in, and how many payload
/// bits remain.
struct ValueState {
    preamble: bool,
    bucket: u32,
    payload: u64,
    remaining: i64,
}

impl ValueState {
    fn fresh(scheme: &impl Scheme) -> Self {
        Self {
            preamble: true,
            bucket: 0,
            payload: 0,
            remaining: scheme.init_remaining(),
        }
    }

    /// True exactly between values: no bits of the next value have been
    /// consumed yet.
    #[inline(always)]
    fn is_fresh(&self) -> bool {
        self.preamble && self.bucket == 0
    }

    /// Feeds one bit through the state machine, returning the decoded value
    /// once the current code completes.
    fn step<T: Unsigned>(
        &mut self,
        has_bit: u8,
        scheme: &impl Scheme,
        codebook: &Codebook<T>,
    ) -> Option<T> {
        if self.preamble {
            if has_bit == 1 {
                self.bucket += 1;
                self.remaining = scheme.update_remaining(self.remaining, 1);
                None
            } else {
                self.preamble = false;
                self.remaining -= i64::from(self.bucket) + 1;
                if self.remaining <= 0 {
                    Some(self.finalize(scheme, codebook))
                } else {
                    None
                }
            }
        } else {
            self.payload = (self.payload << 1) | u64::from(has_bit);
            self.remaining -= 1;
            if self.remaining == 0 {
                Some(self.finalize(scheme, codebook))
            } else {
                None
            }
        }
    }

    fn finalize<T: Unsigned>(&mut self, scheme: &impl Scheme, codebook: &Codebook<T>) -> T {
        let v = T::from_u64(codebook.baseline(self.bucket).to_u64() + self.payload);
        self.preamble = true;
        self.bucket = 0;
        self.payload = 0;
        self.remaining = scheme.init_remaining();
        v
    }
}

/// Decodes `n` values from `bytes`, encoded by [`crate::encode`] under the
/// same `scheme`.
///
/// # Errors
/// Returns [`UnpackError::UnsupportedScheme`] if `scheme`'s smallest bucket
/// does not fit `T`, or [`UnpackError::UnexpectedEnd`] if `bytes` is
/// exhausted before `n` values have been produced.
pub fn decode<T: Unsigned>(
    bytes: &[u8],
    n: usize,
    scheme: impl Scheme,
) -> Result<Vec<T>, UnpackError> {
    let codebook: Codebook<T> = Codebook::build(&scheme);
    if !codebook.has_any_supported_bucket() {
        return Err(UnpackError::UnsupportedScheme);
    }
    let run_codebook: Codebook<u64> = Codebook::build(&scheme);

    let mut out = Vec::with_capacity(n);
    let mut cursor = BitCursor::new(bytes);
    let mut state = ValueState::fresh(&scheme);

    while out.len() < n {
        if state.is_fresh() && cursor.peek_byte() == Some(0xFF) {
            cursor.skip_byte();

            let mut run_state = ValueState::fresh(&scheme);
            let k = loop {
                let Some(bit) = cursor.next_bit() else {
                    return Err(UnpackError::UnexpectedEnd);
                };
                if let Some(v) = run_state.step(bit, &scheme, &run_codebook) {
                    break v;
                }
            };

            let last = *out.last().ok_or(UnpackError::UnexpectedEnd)?;
            for _ in 1..k {
                if out.len() >= n {
                    break;
                }
                out.push(last);
            }
            continue;
        }

        let Some(bit) = cursor.next_bit() else {
            break;
        };
        if let Some(v) = state.step(bit, &scheme, &codebook) {
            out.push(v);
        }
    }

    if out.len() < n {
        return Err(UnpackError::UnexpectedEnd);
    }
    Ok(out)
}
