//! Derivation of the filter thresholds for a given strength and bit depth.

use crate::tables::{ALPHA, BETA, C0, QUANT_MAX};

/// Thresholds shared by every edge of every frame a filter processes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FilterParameters {
    /// Largest step across the boundary still treated as a blocking artifact.
    pub alpha: i32,

    /// Largest step on either side of the boundary still treated as flat.
    pub beta: i32,

    /// Base bound on the corrections.
    pub c0: i32,
}

impl FilterParameters {
    /// Looks up the thresholds for `quant` (already checked to be within
    /// `0..=QUANT_MAX`), scaled to samples of `bit_depth` bits.
    ///
    /// The offsets may be anything; they are clamped so that both table
    /// indices stay in range.
    pub fn derive(quant: i32, a_offset: i32, b_offset: i32, bit_depth: u32) -> Self {
        debug_assert!((0..=QUANT_MAX).contains(&quant));

        let index_a = (quant + clamp_offset(quant, a_offset)) as usize;
        let index_b = (quant + clamp_offset(quant, b_offset)) as usize;
        let shift = bit_depth.saturating_sub(8);

        Self {
            alpha: (ALPHA[index_a] as i32) << shift,
            beta: (BETA[index_b] as i32) << shift,
            c0: (C0[index_a] as i32) << shift,
        }
    }
}

/// Clamps a table offset to `[-quant, QUANT_MAX - quant]`.
pub(crate) fn clamp_offset(quant: i32, offset: i32) -> i32 {
    offset.clamp(-quant, QUANT_MAX - quant)
}

/// Bit-depth dependent constants of the edge kernels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampleRange {
    /// The step added to the correction bound per flat side, `1` at 8 bits.
    pub unit: i32,

    /// Largest representable sample value, `2^bit_depth - 1`.
    pub peak: i32,
}

impl SampleRange {
    pub fn for_bit_depth(bit_depth: u32) -> Self {
        debug_assert!((8..=16).contains(&bit_depth));

        Self {
            unit: 1 << bit_depth.saturating_sub(8),
            peak: (1 << bit_depth) - 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_strength() {
        for bit_depth in 8..=16 {
            let params = FilterParameters::derive(0, 0, 0, bit_depth);
            assert_eq!(params, FilterParameters { alpha: 0, beta: 0, c0: 0 });
        }
    }

    #[test]
    fn test_derive_8bit() {
        assert_eq!(
            FilterParameters::derive(30, 0, 0, 8),
            FilterParameters { alpha: 25, beta: 8, c0: 1 }
        );
        assert_eq!(
            FilterParameters::derive(25, 0, 0, 8),
            FilterParameters { alpha: 13, beta: 4, c0: 1 }
        );
    }

    #[test]
    fn test_offsets_pick_independent_indices() {
        // indexA = 40 drives alpha and c0, indexB = 20 drives beta.
        assert_eq!(
            FilterParameters::derive(30, 10, -10, 8),
            FilterParameters { alpha: 80, beta: 3, c0: 5 }
        );
    }

    #[test]
    fn test_offsets_are_clamped() {
        assert_eq!(clamp_offset(30, 100), 30);
        assert_eq!(clamp_offset(30, -100), -30);
        assert_eq!(clamp_offset(0, -5), 0);
        assert_eq!(clamp_offset(60, 5), 0);
        assert_eq!(clamp_offset(10, -3), -3);

        assert_eq!(
            FilterParameters::derive(50, 1000, -1000, 8),
            FilterParameters { alpha: 255, beta: 0, c0: 35 }
        );
    }

    #[test]
    fn test_high_bit_depth_scaling() {
        // Shifted, not multiplied by 257: 10 bit data is four times the 8 bit scale.
        assert_eq!(
            FilterParameters::derive(30, 0, 0, 10),
            FilterParameters { alpha: 100, beta: 32, c0: 4 }
        );
        assert_eq!(
            FilterParameters::derive(30, 0, 0, 16),
            FilterParameters { alpha: 25 << 8, beta: 8 << 8, c0: 1 << 8 }
        );
    }

    #[test]
    fn test_sample_range() {
        assert_eq!(SampleRange::for_bit_depth(8), SampleRange { unit: 1, peak: 255 });
        assert_eq!(SampleRange::for_bit_depth(10), SampleRange { unit: 4, peak: 1023 });
        assert_eq!(SampleRange::for_bit_depth(12), SampleRange { unit: 16, peak: 4095 });
        assert_eq!(
            SampleRange::for_bit_depth(16),
            SampleRange { unit: 256, peak: 65535 }
        );
    }
}
