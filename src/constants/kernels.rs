//! Neighbourhood kernels.
//!
//! Kernel rows are indexed by `dy + 1` and columns by `dx + 1`, so `kernel[0]`
//! weighs the row below the origin and `kernel[2]` the row above.

use crate::kernel::Kernel;

/// Wall variant weights. One bit per neighbour:
/// NE=1, SE=2, SW=4, NW=8, N=16, E=32, S=64, W=128.
pub const WALL_KERNEL: Kernel = [[4, 64, 2], [128, 0, 32], [8, 16, 1]];

/// Bridge variant weights over the 4-neighbourhood: N=1, E=2, S=4, W=8.
pub const BRIDGE_KERNEL: Kernel = [[0, 4, 0], [8, 0, 2], [0, 1, 0]];

/// Lamp density kernel.
pub const LAMP_KERNEL: Kernel = [[1, 1, 1], [1, 1, 1], [1, 1, 1]];

/// Number of wall variants addressable by `WALL_KERNEL`
pub const WALL_VARIANT_COUNT: usize = 256;
/// Number of bridge variants addressable by `BRIDGE_KERNEL`
pub const BRIDGE_VARIANT_COUNT: usize = 16;
