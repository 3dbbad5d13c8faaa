//! Collection aliases used by the tessellation pipeline.
//!
//! Hashing goes through `rustc_hash` (fast, not DoS-resistant) and short
//! per-simplex lists through `smallvec`, so that the common dimensions (2D-7D)
//! never touch the heap for a tile's or ridge's site ids.

mod aliases;
mod buffers;
mod helpers;

pub use aliases::*;
pub use buffers::*;
pub use helpers::*;
