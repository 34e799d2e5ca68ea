//! Plane storage

use num_traits::{AsPrimitive, PrimInt};
use std::fmt::Debug;

/// An integer type samples are stored in.
pub trait Sample: PrimInt + AsPrimitive<i32> + Debug + Send + Sync + 'static {
    /// Widest bit depth this type can hold.
    const MAX_BIT_DEPTH: u32;

    /// Narrows a value already known to be within `0..=2^MAX_BIT_DEPTH - 1`.
    fn from_i32(v: i32) -> Self;
}

impl Sample for u8 {
    const MAX_BIT_DEPTH: u32 = 8;

    #[inline]
    fn from_i32(v: i32) -> Self {
        debug_assert!((0..=u8::MAX as i32).contains(&v));
        v as u8
    }
}

impl Sample for u16 {
    const MAX_BIT_DEPTH: u32 = 16;

    #[inline]
    fn from_i32(v: i32) -> Self {
        debug_assert!((0..=u16::MAX as i32).contains(&v));
        v as u16
    }
}

/// A rectangular grid of samples of one color component.
///
/// Rows are `stride` samples apart; the samples between `width` and `stride`
/// are padding and never read or written by the filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
    stride: usize,
}

impl<T: Sample> Plane<T> {
    /// Construct a zeroed plane without padding.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::zero())
    }

    /// Construct a plane without padding with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
            stride: width,
        }
    }

    /// Wrap existing sample data.
    ///
    /// Yields `None` if `stride` is narrower than `width`, or if `data` is
    /// too short to hold `height` rows.
    pub fn from_data(data: Vec<T>, width: usize, height: usize, stride: usize) -> Option<Self> {
        if stride < width {
            return None;
        }

        let needed = match height {
            0 => 0,
            h => (h - 1) * stride + width,
        };
        if data.len() < needed {
            return None;
        }

        Some(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance between the starts of two consecutive rows, in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The raw sample data, including any padding.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the plane, yielding the raw sample data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// The `width` samples of row `y`.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Iterate over the rows, without padding.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.stride + x])
        } else {
            None
        }
    }
}
