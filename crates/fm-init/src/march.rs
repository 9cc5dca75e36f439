use fm_core::{Image, ImageView};

use crate::classify::{classify_bool, classify_u8};
use crate::config::InitConfig;
use crate::error::Result;
use crate::frontier::{FrontierQueue, build_queue_from};
use crate::state::{Classification, PixelState};

/// Everything a propagation loop needs to start marching.
///
/// Built fresh per call; hand it to exactly one worker.
#[derive(Debug, Clone)]
pub struct MarchState {
    pub grids: Classification,
    pub queue: FrontierQueue,
}

impl MarchState {
    pub fn into_parts(self) -> (Image<PixelState>, Image<f32>, FrontierQueue) {
        let (states, arrival) = self.grids.into_parts();
        (states, arrival, self.queue)
    }
}

pub fn initialize_u8(mask: &ImageView<'_, u8>, cfg: &InitConfig) -> Result<MarchState> {
    let grids = classify_u8(mask, cfg)?;
    let queue = build_queue_from(&grids)?;
    Ok(MarchState { grids, queue })
}

pub fn initialize_bool(mask: &ImageView<'_, bool>, cfg: &InitConfig) -> Result<MarchState> {
    let grids = classify_bool(mask, cfg)?;
    let queue = build_queue_from(&grids)?;
    Ok(MarchState { grids, queue })
}
