//! Threshold tables of the H.264 deblocking filter, indexed by strength.
//!
//! The H.264 tables stop at index 51; entries 52 to 60 extend them so that
//! strengths above the codec's range keep smoothing harder.

/// Highest accepted strength, and the last index of every table.
pub const QUANT_MAX: i32 = 60;

/// Gate on the step across the boundary (`|p0 - q0|`), indexed by `indexA`.
#[rustfmt::skip]
pub const ALPHA: [u8; QUANT_MAX as usize + 1] = [
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 4, 4,
    5, 6, 7, 8, 9, 10,
    12, 13, 15, 17, 20,
    22, 25, 28, 32, 36,
    40, 45, 50, 56, 63,
    71, 80, 90, 101, 113,
    127, 144, 162, 182,
    203, 226, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255,
];

/// Gate on the activity next to the boundary (`|p1 - p0|`, `|q1 - q0|`),
/// indexed by `indexB`.
#[rustfmt::skip]
pub const BETA: [u8; QUANT_MAX as usize + 1] = [
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 2, 2,
    2, 3, 3, 3, 3, 4,
    4, 4, 6, 6,
    7, 7, 8, 8, 9, 9,
    10, 10, 11, 11, 12,
    12, 13, 13, 14, 14,
    15, 15, 16, 16, 17,
    17, 18, 18,
    19, 20, 21, 22, 23, 24, 25, 26, 27,
];

/// Bound on the corrections, indexed by `indexA`.
#[rustfmt::skip]
pub const C0: [u8; QUANT_MAX as usize + 1] = [
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 1, 1,
    1, 1, 1, 1, 1, 1,
    1, 2, 2, 2, 2, 3,
    3, 3, 4, 4, 5, 5,
    6, 7, 8, 8, 10,
    11, 12, 13, 15, 17,
    19, 21, 23, 25, 27, 29, 31, 33, 35,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tables_non_decreasing() {
        for table in [&ALPHA, &BETA, &C0] {
            for pair in table.windows(2) {
                assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn test_tables_known_entries() {
        assert_eq!((ALPHA[0], BETA[0], C0[0]), (0, 0, 0));
        assert_eq!((ALPHA[16], BETA[16], C0[16]), (4, 2, 0));
        assert_eq!((ALPHA[30], BETA[30], C0[30]), (25, 8, 1));
        assert_eq!((ALPHA[51], BETA[51], C0[51]), (255, 18, 17));
        assert_eq!((ALPHA[60], BETA[60], C0[60]), (255, 27, 35));
    }
}
