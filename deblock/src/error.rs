//! Error types

use crate::tables::QUANT_MAX;
use std::fmt;
use thiserror::Error;

/// Why a requested plane index was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaneFault {
    /// The index is negative or not below the plane count of the format.
    OutOfRange,

    /// The index was listed more than once.
    Duplicate,
}

impl fmt::Display for PlaneFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaneFault::OutOfRange => write!(f, "out of range"),
            PlaneFault::Duplicate => write!(f, "specified twice"),
        }
    }
}

/// Configuration errors.
///
/// All of these are raised while a filter is being set up; filtering a frame
/// with an already configured filter never fails.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("quant must be between 0 and {max}, got {0}", max = QUANT_MAX)]
    InvalidStrength(i32),

    #[error("only constant format 8-16 bits integer input supported")]
    UnsupportedFormat,

    #[error("plane {plane} is {width}x{height}, but the frame must be mod 8 and every plane mod 4")]
    UnalignedGeometry {
        plane: usize,
        width: usize,
        height: usize,
    },

    #[error("plane index {index} {fault}")]
    InvalidPlaneSelection { index: i32, fault: PlaneFault },
}

pub type Result<T> = std::result::Result<T, Error>;
