use fm_core::{Image, ImageView};
use serde::{Deserialize, Serialize};

/// Placeholder arrival time for pixels the front has not reached.
///
/// Must stay strictly above any arrival time a propagation can produce.
/// Front distances on a `W x H` grid never exceed `max(W, H)`, and
/// classification rejects grids where that bound reaches this value.
pub const UNREACHED_TIME: f32 = 1.0e6;

/// Width of the halo added around the mask on every side.
pub const HALO: usize = 1;

/// Traversal state of a pixel.
///
/// Carries no numeric encoding; compare states with `==` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelState {
    /// Value is trustworthy: undamaged, halo, or already finalized.
    Known,
    /// On the active front.
    Band,
    /// Strictly interior to the damage; not yet reachable.
    Inside,
}

impl PixelState {
    pub fn initial_time(self) -> f32 {
        match self {
            Self::Inside => UNREACHED_TIME,
            Self::Known | Self::Band => 0.0,
        }
    }
}

/// Padded state grid and arrival-time field, in register with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub(crate) states: Image<PixelState>,
    pub(crate) arrival: Image<f32>,
}

impl Classification {
    pub fn states(&self) -> &Image<PixelState> {
        &self.states
    }

    pub fn arrival(&self) -> &Image<f32> {
        &self.arrival
    }

    pub fn halo(&self) -> usize {
        HALO
    }

    /// Padded extent, i.e. mask extent plus `2 * HALO` on each axis.
    pub fn dims(&self) -> (usize, usize) {
        self.states.dims()
    }

    /// Extent of the mask this was built from.
    pub fn mask_dims(&self) -> (usize, usize) {
        let (w, h) = self.dims();
        (w - 2 * HALO, h - 2 * HALO)
    }

    /// State at padded coordinates.
    pub fn state_at(&self, x: usize, y: usize) -> Option<PixelState> {
        self.states.get(x, y).copied()
    }

    /// Arrival time at padded coordinates.
    pub fn time_at(&self, x: usize, y: usize) -> Option<f32> {
        self.arrival.get(x, y).copied()
    }

    pub fn count(&self, state: PixelState) -> usize {
        self.states.data().iter().filter(|&&s| s == state).count()
    }

    /// States of the mask region, without the halo.
    pub fn interior_states(&self) -> ImageView<'_, PixelState> {
        let (w, h) = self.mask_dims();
        self.states
            .as_view()
            .subview(HALO, HALO, w, h)
            .expect("interior lies within padded grid")
    }

    pub fn interior_arrival(&self) -> ImageView<'_, f32> {
        let (w, h) = self.mask_dims();
        self.arrival
            .as_view()
            .subview(HALO, HALO, w, h)
            .expect("interior lies within padded grid")
    }

    pub fn into_parts(self) -> (Image<PixelState>, Image<f32>) {
        (self.states, self.arrival)
    }
}
