//! Edge kernels of the H.264 deblocking filter.
//!
//! Every kernel works on lines of six samples running across a block
//! boundary, `p2 p1 p0 | q0 q1 q2`, with `p` on the top or left side and `q`
//! on the bottom or right side. Only `p1 p0 q0 q1` are ever written. Each line
//! is filtered from its own unmodified samples, so the four lines of an edge
//! segment are independent of each other.

use crate::params::{FilterParameters, SampleRange};
use crate::plane::{Plane, Sample};

/// Breaks out the four samples of each of the six rows around the horizontal
/// boundary above row `y`, starting at column `x`.
fn edge_rows<T: Sample>(plane: &mut Plane<T>, x: usize, y: usize) -> [&mut [T]; 6] {
    debug_assert!(y >= 3 && y + 3 <= plane.height());
    debug_assert!(x + 4 <= plane.width());

    let stride = plane.stride();

    let (_, rest) = plane.as_mut_slice().split_at_mut((y - 3) * stride);
    let (row_p2, rest) = rest.split_at_mut(stride);
    let (row_p1, rest) = rest.split_at_mut(stride);
    let (row_p0, rest) = rest.split_at_mut(stride);
    let (row_q0, rest) = rest.split_at_mut(stride);
    let (row_q1, row_q2) = rest.split_at_mut(stride);

    [
        &mut row_p2[x..x + 4],
        &mut row_p1[x..x + 4],
        &mut row_p0[x..x + 4],
        &mut row_q0[x..x + 4],
        &mut row_q1[x..x + 4],
        &mut row_q2[x..x + 4],
    ]
}

/// The six samples of row `y` around the vertical boundary left of column `x`.
fn edge_line<T: Sample>(plane: &mut Plane<T>, x: usize, y: usize) -> &mut [T] {
    debug_assert!(x >= 3 && x + 3 <= plane.width());

    let stride = plane.stride();
    &mut plane.as_mut_slice()[y * stride + x - 3..][..6]
}

#[cfg_attr(feature = "simd", allow(dead_code))]
pub(crate) mod scalar_impl {
    use super::{edge_line, edge_rows};
    use crate::params::{FilterParameters, SampleRange};
    use crate::plane::{Plane, Sample};
    use itertools::izip;

    /// Filters one line of `[p2, p1, p0, q0, q1, q2]` in place.
    #[inline]
    pub fn process(taps: &mut [i32; 6], params: &FilterParameters, range: SampleRange) {
        let [p2, p1, p0, q0, q1, q2] = *taps;
        let FilterParameters { alpha, beta, c0 } = *params;

        // A step this large, or that much texture on either side, is a real edge.
        if (p0 - q0).abs() >= alpha || (p1 - p0).abs() >= beta || (q0 - q1).abs() >= beta {
            return;
        }

        let p_flat = (p2 - p0).abs() < beta;
        let q_flat = (q2 - q0).abs() < beta;

        let mut c = c0;
        if q_flat {
            c += range.unit;
        }
        if p_flat {
            c += range.unit;
        }

        let avg0 = (p0 + q0 + 1) >> 1;
        let delta = ((((q0 - p0) << 2) + (p1 - q1) + 4) >> 3).clamp(-c, c);

        taps[2] = (p0 + delta).clamp(0, range.peak);
        taps[3] = (q0 - delta).clamp(0, range.peak);

        // These stay within range on their own: the tap is at most half way
        // towards the mean of its neighbours.
        if p_flat {
            taps[1] = p1 + ((p2 + avg0 - (p1 << 1)) >> 1).clamp(-c0, c0);
        }
        if q_flat {
            taps[4] = q1 + ((q2 + avg0 - (q1 << 1)) >> 1).clamp(-c0, c0);
        }
    }

    /// Same as `super::filter_horizontal_edge`, one column at a time.
    pub fn horizontal_edge<T: Sample>(
        plane: &mut Plane<T>,
        x: usize,
        y: usize,
        params: &FilterParameters,
        range: SampleRange,
    ) {
        let [p2, p1, p0, q0, q1, q2] = edge_rows(plane, x, y);
        for (p2, p1, p0, q0, q1, q2) in izip!(
            p2.iter(),
            p1.iter_mut(),
            p0.iter_mut(),
            q0.iter_mut(),
            q1.iter_mut(),
            q2.iter()
        ) {
            let mut taps = [p2.as_(), p1.as_(), p0.as_(), q0.as_(), q1.as_(), q2.as_()];
            process(&mut taps, params, range);
            *p1 = T::from_i32(taps[1]);
            *p0 = T::from_i32(taps[2]);
            *q0 = T::from_i32(taps[3]);
            *q1 = T::from_i32(taps[4]);
        }
    }

    /// Same as `super::filter_vertical_edge`, one row at a time.
    pub fn vertical_edge<T: Sample>(
        plane: &mut Plane<T>,
        x: usize,
        y: usize,
        params: &FilterParameters,
        range: SampleRange,
    ) {
        for i in 0..4 {
            let line = edge_line(plane, x, y + i);
            let mut taps = [0i32; 6];
            for (tap, sample) in taps.iter_mut().zip(line.iter()) {
                *tap = sample.as_();
            }
            process(&mut taps, params, range);
            for (sample, tap) in line.iter_mut().zip(taps.iter()).skip(1).take(4) {
                *sample = T::from_i32(*tap);
            }
        }
    }
}

#[cfg(feature = "simd")]
mod simd_impl {
    use super::{edge_line, edge_rows};
    use crate::params::{FilterParameters, SampleRange};
    use crate::plane::{Plane, Sample};
    use wide::{i32x4, CmpLt};

    /// Utility mimicking `i32::clamp` for `i32x4`
    #[inline]
    fn clamp_simd(x: i32x4, min: i32x4, max: i32x4) -> i32x4 {
        x.max(min).min(max)
    }

    /// Same as `scalar_impl::process`, but filters four independent lines in parallel,
    /// one per lane.
    #[inline]
    pub fn process_simd(taps: &mut [i32x4; 6], params: &FilterParameters, range: SampleRange) {
        let [p2, p1, p0, q0, q1, q2] = *taps;

        let alpha = i32x4::splat(params.alpha);
        let beta = i32x4::splat(params.beta);
        let c0 = i32x4::splat(params.c0);
        let unit = i32x4::splat(range.unit);
        let peak = i32x4::splat(range.peak);

        // NOTE: the `true` value of these comparisons is all `1` bits, so they can be
        // used both with `blend` and as bit masks on the increments.
        let filtered = (p0 - q0).abs().cmp_lt(alpha)
            & (p1 - p0).abs().cmp_lt(beta)
            & (q0 - q1).abs().cmp_lt(beta);
        let p_flat = (p2 - p0).abs().cmp_lt(beta);
        let q_flat = (q2 - q0).abs().cmp_lt(beta);

        let c = c0 + (q_flat & unit) + (p_flat & unit);

        let one = i32x4::splat(1);
        let four = i32x4::splat(4);
        let avg0 = (p0 + q0 + one) >> 1;
        let delta = clamp_simd(
            (((q0 - p0) << 2) + (p1 - q1) + four) >> 3,
            i32x4::ZERO - c,
            c,
        );
        let delta_p1 = clamp_simd((p2 + avg0 - (p1 << 1)) >> 1, i32x4::ZERO - c0, c0);
        let delta_q1 = clamp_simd((q2 + avg0 - (q1 << 1)) >> 1, i32x4::ZERO - c0, c0);

        let res_p0 = clamp_simd(p0 + delta, i32x4::ZERO, peak);
        let res_q0 = clamp_simd(q0 - delta, i32x4::ZERO, peak);
        let res_p1 = p1 + (p_flat & delta_p1);
        let res_q1 = q1 + (q_flat & delta_q1);

        taps[1] = filtered.blend(res_p1, p1);
        taps[2] = filtered.blend(res_p0, p0);
        taps[3] = filtered.blend(res_q0, q0);
        taps[4] = filtered.blend(res_q1, q1);
    }

    /// Upcasts a run of four samples into one vector.
    #[inline]
    fn load_simd<T: Sample>(a: &[T]) -> i32x4 {
        debug_assert!(a.len() == 4);
        i32x4::from([a[0].as_(), a[1].as_(), a[2].as_(), a[3].as_()])
    }

    /// Same as `scalar_impl::horizontal_edge`, but with the four columns in parallel.
    pub fn horizontal_edge<T: Sample>(
        plane: &mut Plane<T>,
        x: usize,
        y: usize,
        params: &FilterParameters,
        range: SampleRange,
    ) {
        let mut rows = edge_rows(plane, x, y);

        // luckily the memory layout is advantageous here, each row is already
        // one vector with a lane per column
        let mut taps = std::array::from_fn(|t| load_simd(&rows[t][..]));
        process_simd(&mut taps, params, range);

        for (row, tap) in rows.iter_mut().zip(taps.iter()).skip(1).take(4) {
            for (sample, value) in row.iter_mut().zip(tap.as_array_ref()) {
                *sample = T::from_i32(*value);
            }
        }
    }

    /// Same as `scalar_impl::vertical_edge`, but with the four rows in parallel.
    pub fn vertical_edge<T: Sample>(
        plane: &mut Plane<T>,
        x: usize,
        y: usize,
        params: &FilterParameters,
        range: SampleRange,
    ) {
        // Transposing the four (horizontal) lines into vectors, one lane per row,
        // processing them, then untransposing and storing.
        let mut columns = [[0i32; 4]; 6];
        for i in 0..4 {
            let line = edge_line(plane, x, y + i);
            for (column, sample) in columns.iter_mut().zip(line.iter()) {
                column[i] = sample.as_();
            }
        }

        let mut taps = columns.map(i32x4::from);
        process_simd(&mut taps, params, range);

        for i in 0..4 {
            let line = edge_line(plane, x, y + i);
            for (sample, tap) in line.iter_mut().zip(taps.iter()).skip(1).take(4) {
                *sample = T::from_i32(tap.as_array_ref()[i]);
            }
        }
    }
}

/// Filters a single line of six samples, `[p2, p1, p0, q0, q1, q2]`, across a
/// block boundary lying between `p0` and `q0`.
///
/// Lines whose step at the boundary is at least `alpha`, or whose neighbouring
/// steps are at least `beta`, are left alone. Otherwise `p0` and `q0` are
/// pulled towards each other by at most `c0` plus one `unit` per flat side,
/// and on each flat side the second sample is nudged by at most `c0`.
#[inline]
pub fn filter_line(taps: &mut [i32; 6], params: &FilterParameters, range: SampleRange) {
    scalar_impl::process(taps, params, range);
}

/// Filters the horizontal boundary above row `y`, for the four columns
/// starting at `x`.
///
/// Reads rows `y - 3` to `y + 2`, so `y` must be at least 3 and at most
/// `height - 3`.
pub fn filter_horizontal_edge<T: Sample>(
    plane: &mut Plane<T>,
    x: usize,
    y: usize,
    params: &FilterParameters,
    range: SampleRange,
) {
    #[cfg(feature = "simd")]
    simd_impl::horizontal_edge(plane, x, y, params, range);

    #[cfg(not(feature = "simd"))]
    scalar_impl::horizontal_edge(plane, x, y, params, range);
}

/// Filters the vertical boundary left of column `x`, for the four rows
/// starting at `y`.
///
/// Reads columns `x - 3` to `x + 2`, so `x` must be at least 3 and at most
/// `width - 3`.
pub fn filter_vertical_edge<T: Sample>(
    plane: &mut Plane<T>,
    x: usize,
    y: usize,
    params: &FilterParameters,
    range: SampleRange,
) {
    debug_assert!(y + 4 <= plane.height());

    #[cfg(feature = "simd")]
    simd_impl::vertical_edge(plane, x, y, params, range);

    #[cfg(not(feature = "simd"))]
    scalar_impl::vertical_edge(plane, x, y, params, range);
}
