//! Derives, from a [`Scheme`] and an integer width, the inclusive value range
//! each bucket covers.

use crate::integer::Unsigned;
use crate::scheme::{Scheme, BUCKET_COUNT};

/// Precomputed `[min, max]` ranges per bucket for one `(Scheme, T)` pairing.
///
/// Built once per `encode`/`decode` call and then consulted per value, rather
/// than recomputed from the scheme on every lookup.
pub(crate) struct Codebook<T: Unsigned> {
    min: [T; 8],
    max: [T; 8],
    supported_count: u32,
}

impl<T: Unsigned> Codebook<T> {
    /// Builds the codebook for `scheme` restricted to buckets that fit `T`.
    ///
    /// Mirrors the recursive `max<T, Scheme, bits>()` / `min<T, Scheme, bits>()`
    /// template functions of the reference implementation: `max(0)` is the
    /// capacity of bucket 0 alone, and every subsequent bucket's range picks
    /// up where the previous one left off.
    pub(crate) fn build(scheme: &impl Scheme) -> Self {
        let mut min = [T::from_u64(0); 8];
        let mut max = [T::from_u64(0); 8];
        let mut supported_count = 0;
        let mut prev_max: u128 = 0;

        for bucket in 0..BUCKET_COUNT {
            let width = scheme.width(bucket);
            if width > T::BITS {
                break;
            }
            debug_assert!(width > bucket, "scheme produced a code narrower than its own preamble");

            let payload_bits = width - bucket - 1;
            let capacity: u128 = 1u128 << payload_bits;
            let max_b = prev_max + capacity;
            let min_b = prev_max + 1;

            min[bucket as usize] = T::from_u64(min_b as u64);
            max[bucket as usize] = T::from_u64(max_b as u64);
            supported_count += 1;
            prev_max = max_b;
        }

        Self {
            min,
            max,
            supported_count,
        }
    }

    /// True iff at least the smallest bucket fits within `T`.
    #[inline(always)]
    pub(crate) fn has_any_supported_bucket(&self) -> bool {
        self.supported_count > 0
    }

    /// Inclusive lower bound of `bucket`.
    #[inline(always)]
    pub(crate) fn min(&self, bucket: u32) -> T {
        self.min[bucket as usize]
    }

    /// Inclusive upper bound of `bucket`.
    #[inline(always)]
    pub(crate) fn max(&self, bucket: u32) -> T {
        self.max[bucket as usize]
    }

    /// The baseline (`min(bucket)`) used by the unpacker to add back the offset.
    #[inline(always)]
    pub(crate) fn baseline(&self, bucket: u32) -> T {
        self.min(bucket)
    }

    /// The largest value representable by any supported bucket.
    #[inline(always)]
    pub(crate) fn max_representable(&self) -> Option<T> {
        if self.supported_count == 0 {
            None
        } else {
            Some(self.max[(self.supported_count - 1) as usize])
        }
    }

    /// Index of the widest bucket this codebook supports. Callers must check
    /// [`Self::has_any_supported_bucket`] first.
    #[inline(always)]
    pub(crate) fn largest_bucket(&self) -> u32 {
        debug_assert!(self.has_any_supported_bucket());
        self.supported_count - 1
    }

    /// Finds the smallest bucket whose range contains `v`.
    #[inline(always)]
    pub(crate) fn bucket_for(&self, v: T) -> Option<u32> {
        (0..self.supported_count).find(|&b| v <= self.max[b as usize])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scheme::{Doubling, Multiplier};

    #[test]
    fn doubling_bucket_boundaries_match_spec_table() {
        let book: Codebook<u32> = Codebook::build(&Doubling::new(1));
        assert_eq!(book.max(0), 1);
        assert_eq!(book.max(1), 2);
        assert_eq!(book.max(2), 4);
        assert_eq!(book.max(3), 20);
        assert_eq!(book.max(4), 2068);
    }

    #[test]
    fn multiplier_bucket_boundaries_match_spec_table() {
        let book: Codebook<u32> = Codebook::build(&Multiplier::new(4));
        assert_eq!(book.max(0), 8);
        assert_eq!(book.max(1), 72);
        assert_eq!(book.max(2), 584);
    }

    #[test]
    fn buckets_tile_contiguously() {
        let book: Codebook<u32> = Codebook::build(&Doubling::new(1));
        for b in 1..5 {
            assert_eq!(book.min(b), book.max(b - 1) + 1);
        }
    }

    #[test]
    fn narrow_width_caps_supported_buckets() {
        // Doubling base=1, bucket 7 has width 128, far past any supported T.
        let book: Codebook<u64> = Codebook::build(&Doubling::new(1));
        assert!(book.max_representable().unwrap() < u64::MAX);
    }

    #[test]
    fn unsupported_scheme_has_no_buckets() {
        // A base wide enough that even bucket 0 doesn't fit a u8.
        let book: Codebook<u8> = Codebook::build(&Doubling::new(16));
        assert!(!book.has_any_supported_bucket());
    }
}
