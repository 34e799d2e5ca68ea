//! Frame and format types

use crate::plane::{Plane, Sample};

/// How sample values are encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleType {
    Integer,
    Float,
}

/// The layout of every frame of a clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VideoFormat {
    pub sample_type: SampleType,

    /// Significant bits per sample.
    pub bits_per_sample: u32,

    pub num_planes: usize,

    /// log2 of the horizontal chroma subsampling factor.
    pub sub_sampling_w: u32,

    /// log2 of the vertical chroma subsampling factor.
    pub sub_sampling_h: u32,
}

impl VideoFormat {
    fn integer(bits_per_sample: u32, num_planes: usize, ss_w: u32, ss_h: u32) -> Self {
        Self {
            sample_type: SampleType::Integer,
            bits_per_sample,
            num_planes,
            sub_sampling_w: ss_w,
            sub_sampling_h: ss_h,
        }
    }

    /// A single luma plane.
    pub fn gray(bits_per_sample: u32) -> Self {
        Self::integer(bits_per_sample, 1, 0, 0)
    }

    pub fn yuv420(bits_per_sample: u32) -> Self {
        Self::integer(bits_per_sample, 3, 1, 1)
    }

    pub fn yuv422(bits_per_sample: u32) -> Self {
        Self::integer(bits_per_sample, 3, 1, 0)
    }

    pub fn yuv444(bits_per_sample: u32) -> Self {
        Self::integer(bits_per_sample, 3, 0, 0)
    }

    pub fn rgb(bits_per_sample: u32) -> Self {
        Self::integer(bits_per_sample, 3, 0, 0)
    }

    /// Three full resolution floating point planes.
    pub fn rgb_float(bits_per_sample: u32) -> Self {
        Self {
            sample_type: SampleType::Float,
            ..Self::integer(bits_per_sample, 3, 0, 0)
        }
    }

    /// Bytes of storage per sample.
    pub fn bytes_per_sample(&self) -> u32 {
        (self.bits_per_sample + 7) / 8
    }
}

/// A video format together with the frame dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VideoInfo {
    pub format: VideoFormat,
    pub width: usize,
    pub height: usize,
}

impl VideoInfo {
    pub fn new(format: VideoFormat, width: usize, height: usize) -> Self {
        Self {
            format,
            width,
            height,
        }
    }

    /// Width and height of the plane at `index`, after chroma subsampling.
    pub fn plane_dimensions(&self, index: usize) -> (usize, usize) {
        if index == 0 {
            (self.width, self.height)
        } else {
            (
                self.width >> self.format.sub_sampling_w,
                self.height >> self.format.sub_sampling_h,
            )
        }
    }
}

/// The planes of one video frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<T> {
    planes: Vec<Plane<T>>,
}

impl<T: Sample> Frame<T> {
    /// Construct a zeroed frame laid out as `info` describes.
    pub fn new(info: &VideoInfo) -> Self {
        let planes = (0..info.format.num_planes)
            .map(|i| {
                let (w, h) = info.plane_dimensions(i);
                Plane::new(w, h)
            })
            .collect();

        Self { planes }
    }

    pub fn from_planes(planes: Vec<Plane<T>>) -> Self {
        Self { planes }
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, index: usize) -> &Plane<T> {
        &self.planes[index]
    }

    pub fn plane_mut(&mut self, index: usize) -> &mut Plane<T> {
        &mut self.planes[index]
    }

    pub fn planes(&self) -> &[Plane<T>] {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut [Plane<T>] {
        &mut self.planes
    }

    pub fn into_planes(self) -> Vec<Plane<T>> {
        self.planes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let info = VideoInfo::new(VideoFormat::yuv420(8), 32, 16);
        let frame = Frame::<u8>::new(&info);

        assert_eq!(frame.num_planes(), 3);
        assert_eq!((frame.plane(0).width(), frame.plane(0).height()), (32, 16));
        assert_eq!((frame.plane(1).width(), frame.plane(1).height()), (16, 8));
        assert_eq!((frame.plane(2).width(), frame.plane(2).height()), (16, 8));
    }

    #[test]
    fn test_bytes_per_sample() {
        assert_eq!(VideoFormat::gray(8).bytes_per_sample(), 1);
        assert_eq!(VideoFormat::yuv422(10).bytes_per_sample(), 2);
        assert_eq!(VideoFormat::rgb(16).bytes_per_sample(), 2);
    }
}
