//! Rust implementation of the H.264 in-loop deblocking filter, applied as a
//! postprocessing step over whole planes with a single fixed strength.
//!
//! A [`Deblock`] is configured once for a video format and then filters any
//! number of frames of that format, independently of each other.

#[macro_use]
extern crate bitflags;

mod error;
mod filter;
mod frame;
pub mod kernel;
mod params;
mod plane;
pub mod tables;
pub mod walker;

pub use error::{Error, PlaneFault, Result};
pub use filter::{deblock, Deblock, DeblockOptions, PlaneSet};
pub use frame::{Frame, SampleType, VideoFormat, VideoInfo};
pub use params::{FilterParameters, SampleRange};
pub use plane::{Plane, Sample};
