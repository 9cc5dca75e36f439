//! Umbrella crate for the `fast-marching` workspace.
//!
//! Re-exports the grid primitives, binary morphology, and the marching
//! initialization crate.

pub use fm_core::*;
pub use fm_init::*;
pub use fm_morph::*;
