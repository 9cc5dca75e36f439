//! Initialization and ordering for Fast Marching inpainting.
//!
//! Given a binary damage mask, this crate produces the three pieces a
//! marching loop starts from:
//! - a state grid (`Known` / `Band` / `Inside`) padded by a one-pixel halo,
//! - an arrival-time field in register with it (`0` everywhere except
//!   `Inside`, which holds [`UNREACHED_TIME`]),
//! - a [`FrontierQueue`] holding every `Band` pixel, popping in
//!   non-decreasing arrival time.
//!
//! The band is `mask XOR erode(mask, disk(r))`, one erosion step wide. The
//! inside is the eroded mask itself. With the default radius of 1 the disk is
//! the 4-connected cross.
//!
//! All coordinates handed out (queue entries, `state_at`, `time_at`) are in
//! the padded grid: mask pixel `(x, y)` lives at `(x + 1, y + 1)`.
//!
//! The marching loop and color reconstruction are not part of this crate.

mod classify;
mod config;
mod error;
mod frontier;
mod march;
mod state;

pub use classify::{classify_bool, classify_u8};
pub use config::{EdgePolicy, InitConfig};
pub use error::{InitError, Result};
pub use frontier::{FrontierEntry, FrontierQueue, build_queue, build_queue_from};
pub use march::{MarchState, initialize_bool, initialize_u8};
pub use state::{Classification, HALO, PixelState, UNREACHED_TIME};
