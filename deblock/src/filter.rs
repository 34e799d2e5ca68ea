//! Filter configuration and per-frame entry points.

use crate::error::{Error, PlaneFault, Result};
use crate::frame::{Frame, SampleType, VideoInfo};
use crate::params::{clamp_offset, FilterParameters, SampleRange};
use crate::plane::Sample;
use crate::tables::QUANT_MAX;
use crate::walker::{deblock_plane, BLOCK_SIZE};
use rayon::prelude::*;

/// Largest number of planes a format may have.
const MAX_PLANES: usize = 3;

bitflags! {
    /// The planes of a frame that get filtered.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct PlaneSet : u8 {
        const PLANE_0 = 0b001;
        const PLANE_1 = 0b010;
        const PLANE_2 = 0b100;
    }
}

impl PlaneSet {
    /// The set holding the first `num_planes` planes.
    pub fn first(num_planes: usize) -> Self {
        Self::from_bits_truncate(((1u16 << num_planes.min(MAX_PLANES)) - 1) as u8)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < MAX_PLANES && self.contains(Self::from_bits_truncate(1 << index))
    }

    /// Build a set from a list of plane indices of a format with
    /// `num_planes` planes, refusing out of range and repeated indices.
    pub fn from_indices(indices: &[i32], num_planes: usize) -> Result<Self> {
        let mut set = Self::empty();

        for &index in indices {
            if index < 0 || index as usize >= num_planes.min(MAX_PLANES) {
                return Err(Error::InvalidPlaneSelection {
                    index,
                    fault: PlaneFault::OutOfRange,
                });
            }

            let plane = Self::from_bits_truncate(1 << index);
            if set.contains(plane) {
                return Err(Error::InvalidPlaneSelection {
                    index,
                    fault: PlaneFault::Duplicate,
                });
            }

            set |= plane;
        }

        Ok(set)
    }
}

/// User-facing parameters of the filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeblockOptions {
    /// Strength of the filter, `0..=60`. Zero disables it entirely.
    pub quant: i32,

    /// Offset of the index into the `alpha` and `c0` tables.
    pub a_offset: i32,

    /// Offset of the index into the `beta` table.
    pub b_offset: i32,

    /// Indices of the planes to filter; all of them if `None` or empty.
    pub planes: Option<Vec<i32>>,
}

impl Default for DeblockOptions {
    fn default() -> Self {
        Self {
            quant: 25,
            a_offset: 0,
            b_offset: 0,
            planes: None,
        }
    }
}

impl DeblockOptions {
    pub fn with_quant(mut self, quant: i32) -> Self {
        self.quant = quant;
        self
    }

    pub fn with_offsets(mut self, a_offset: i32, b_offset: i32) -> Self {
        self.a_offset = a_offset;
        self.b_offset = b_offset;
        self
    }

    pub fn with_planes(mut self, planes: &[i32]) -> Self {
        self.planes = Some(planes.to_vec());
        self
    }
}

/// A deblocking filter configured for one video format.
///
/// All checks happen in `Deblock::new`; filtering a frame of the configured
/// format cannot fail. The filter holds no per-frame state, so one instance
/// may filter any number of frames, from any number of threads.
#[derive(Clone, Debug)]
pub struct Deblock {
    info: VideoInfo,
    a_offset: i32,
    b_offset: i32,
    params: FilterParameters,
    range: SampleRange,
    planes: PlaneSet,
}

impl Deblock {
    /// Validate `options` against the clip described by `info`, and derive
    /// the thresholds of the filter.
    pub fn new(info: &VideoInfo, options: &DeblockOptions) -> Result<Self> {
        Self::configure(info, options).map_err(|e| {
            log::warn!("Deblock: {}", e);
            e
        })
    }

    fn configure(info: &VideoInfo, options: &DeblockOptions) -> Result<Self> {
        let quant = options.quant;
        if !(0..=QUANT_MAX).contains(&quant) {
            return Err(Error::InvalidStrength(quant));
        }

        let a_offset = clamp_offset(quant, options.a_offset);
        let b_offset = clamp_offset(quant, options.b_offset);

        let format = &info.format;
        if format.sample_type != SampleType::Integer
            || !(8..=16).contains(&format.bits_per_sample)
            || !(1..=MAX_PLANES).contains(&format.num_planes)
        {
            return Err(Error::UnsupportedFormat);
        }

        // The frame must be mod 8, and every subsampled plane needs whole 4x4 blocks.
        for i in 0..format.num_planes {
            let (width, height) = info.plane_dimensions(i);
            let align = if i == 0 { 2 * BLOCK_SIZE } else { BLOCK_SIZE };
            if width % align != 0 || height % align != 0 {
                return Err(Error::UnalignedGeometry {
                    plane: i,
                    width,
                    height,
                });
            }
        }

        // No list at all and an empty one both mean every plane.
        let planes = match &options.planes {
            Some(indices) if !indices.is_empty() => {
                PlaneSet::from_indices(indices, format.num_planes)?
            }
            _ => PlaneSet::first(format.num_planes),
        };

        let params = FilterParameters::derive(quant, a_offset, b_offset, format.bits_per_sample);
        let range = SampleRange::for_bit_depth(format.bits_per_sample);

        log::debug!(
            "Deblock: quant {} (offsets {}/{}) at {} bits: alpha {}, beta {}, c0 {}, planes {:?}",
            quant,
            a_offset,
            b_offset,
            format.bits_per_sample,
            params.alpha,
            params.beta,
            params.c0,
            planes
        );

        Ok(Self {
            info: *info,
            a_offset,
            b_offset,
            params,
            range,
            planes,
        })
    }

    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    pub fn parameters(&self) -> FilterParameters {
        self.params
    }

    pub fn sample_range(&self) -> SampleRange {
        self.range
    }

    /// The table offsets in force, after clamping.
    pub fn offsets(&self) -> (i32, i32) {
        (self.a_offset, self.b_offset)
    }

    pub fn planes(&self) -> PlaneSet {
        self.planes
    }

    /// Filter a copy of `src`, leaving it untouched.
    pub fn filter_frame<T: Sample>(&self, src: &Frame<T>) -> Frame<T> {
        let mut dst = src.clone();
        self.filter_frame_in_place(&mut dst);
        dst
    }

    /// Filter the selected planes of `frame` in place.
    ///
    /// The frame must be laid out as the configured `VideoInfo` describes.
    ///
    /// # Panics
    ///
    /// If `T` is too narrow for the configured bit depth, e.g. a `Frame<u8>`
    /// given to a 10 bit filter.
    pub fn filter_frame_in_place<T: Sample>(&self, frame: &mut Frame<T>) {
        assert!(
            self.info.format.bits_per_sample <= T::MAX_BIT_DEPTH,
            "{} bit samples don't fit in a {} bit sample type",
            self.info.format.bits_per_sample,
            T::MAX_BIT_DEPTH
        );
        debug_assert_eq!(frame.num_planes(), self.info.format.num_planes);

        log::trace!("Deblock: filtering planes {:?}", self.planes);

        // Planes don't share any samples, but each one has to be walked in order.
        frame
            .planes_mut()
            .par_iter_mut()
            .enumerate()
            .filter(|(i, _)| self.planes.contains_index(*i))
            .for_each(|(i, plane)| {
                debug_assert_eq!((plane.width(), plane.height()), self.info.plane_dimensions(i));
                deblock_plane(plane, &self.params, self.range);
            });
    }

    /// Filter a batch of independent frames in parallel, yielding the
    /// filtered copies in the same order.
    pub fn filter_frames<T: Sample>(&self, frames: &[Frame<T>]) -> Vec<Frame<T>> {
        frames.par_iter().map(|frame| self.filter_frame(frame)).collect()
    }
}

/// Filter one frame with a one-off filter configured from `options`.
pub fn deblock<T: Sample>(
    src: &Frame<T>,
    info: &VideoInfo,
    options: &DeblockOptions,
) -> Result<Frame<T>> {
    Ok(Deblock::new(info, options)?.filter_frame(src))
}
