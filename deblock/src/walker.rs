//! Traversal of a plane's 4x4 block boundaries.
//!
//! Edges are filtered in place, so later edges see the output of earlier
//! ones and the order below is part of the result: blocks are visited in
//! raster order, and for each block the boundary above it is filtered before
//! the boundary to its left. Boundaries on the outer edge of the plane are
//! never filtered.

use crate::kernel::{filter_horizontal_edge, filter_vertical_edge};
use crate::params::{FilterParameters, SampleRange};
use crate::plane::{Plane, Sample};

/// Side length of the blocks whose boundaries are filtered.
pub const BLOCK_SIZE: usize = 4;

/// Which way a block boundary runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
    /// The boundary above a block, filtered with vertical lines of taps.
    Horizontal,

    /// The boundary left of a block, filtered with horizontal lines of taps.
    Vertical,
}

/// One segment of block boundary, four samples long, at the top left corner
/// of the block at `(x, y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub x: usize,
    pub y: usize,
    pub direction: EdgeDirection,
}

impl Edge {
    fn horizontal(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            direction: EdgeDirection::Horizontal,
        }
    }

    fn vertical(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            direction: EdgeDirection::Vertical,
        }
    }
}

/// Yields every interior block boundary of a `width` x `height` plane, in the
/// order they must be filtered.
pub fn block_edges(width: usize, height: usize) -> impl Iterator<Item = Edge> {
    let blocks_x = width / BLOCK_SIZE;
    let blocks_y = height / BLOCK_SIZE;

    (0..blocks_y).flat_map(move |by| {
        let y = by * BLOCK_SIZE;
        (0..blocks_x).flat_map(move |bx| {
            let x = bx * BLOCK_SIZE;

            // The horizontal edge first: the vertical one reads samples it may change.
            let above = (y > 0).then(|| Edge::horizontal(x, y));
            let left = (x > 0).then(|| Edge::vertical(x, y));
            above.into_iter().chain(left)
        })
    })
}

/// Applies the deblocking filter to every interior block boundary of `plane`.
///
/// The plane's width and height must be multiples of `BLOCK_SIZE`.
pub fn deblock_plane<T: Sample>(plane: &mut Plane<T>, params: &FilterParameters, range: SampleRange) {
    debug_assert!(plane.width() % BLOCK_SIZE == 0 && plane.height() % BLOCK_SIZE == 0);

    for edge in block_edges(plane.width(), plane.height()) {
        match edge.direction {
            EdgeDirection::Horizontal => {
                filter_horizontal_edge(plane, edge.x, edge.y, params, range)
            }
            EdgeDirection::Vertical => filter_vertical_edge(plane, edge.x, edge.y, params, range),
        }
    }
}
