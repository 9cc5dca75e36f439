//! Grid primitives shared by the fast-marching crates.
//!
//! ## Images and Stride
//! Grids use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers, e.g. the unpadded interior
//! of a grid that carries a one-pixel halo.
//!
//! ## Coordinates
//! `(x, y)` is `(column, row)`. Row-major order means `y` first, then `x`.
//!
//! ## Border Modes
//! Out-of-range samples either clamp to the nearest edge pixel or read a
//! constant fill value.

mod border;
mod error;
mod image;

pub use border::{BorderMode, map_index, pad, sample_with_border};
pub use error::Error;
pub use image::{Image, ImageView};
