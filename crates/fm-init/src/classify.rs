use fm_core::{BorderMode, Image, ImageView, pad};
use fm_morph::{StructuringElement, binarize_bool, binarize_u8, erode_binary_u8, xor_binary_u8};
use log::{debug, warn};

use crate::config::InitConfig;
use crate::error::{InitError, Result};
use crate::state::{Classification, HALO, PixelState, UNREACHED_TIME};

/// Classifies a `u8` mask (damaged iff `> 0`) into padded state and
/// arrival-time grids.
pub fn classify_u8(mask: &ImageView<'_, u8>, cfg: &InitConfig) -> Result<Classification> {
    validate(mask.dims(), cfg)?;
    classify_binary(&binarize_u8(mask), cfg)
}

/// Classifies a boolean mask (damaged iff `true`).
pub fn classify_bool(mask: &ImageView<'_, bool>, cfg: &InitConfig) -> Result<Classification> {
    validate(mask.dims(), cfg)?;
    classify_binary(&binarize_bool(mask), cfg)
}

fn validate((width, height): (usize, usize), cfg: &InitConfig) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(InitError::InvalidInput { width, height });
    }

    if cfg.erosion_radius == 0 {
        return Err(InitError::InvalidConfig(
            "erosion_radius must be at least 1".to_string(),
        ));
    }

    let longest = width.max(height);
    if !usize::try_from(cfg.erosion_radius).is_ok_and(|r| r <= longest) {
        return Err(InitError::InvalidConfig(format!(
            "erosion_radius {} exceeds the longest mask side {longest}",
            cfg.erosion_radius
        )));
    }

    let bound = width.max(height).saturating_add(2 * HALO) as f32;
    if bound >= UNREACHED_TIME {
        return Err(InitError::SentinelHeadroom {
            bound,
            sentinel: UNREACHED_TIME,
        });
    }

    Ok(())
}

fn classify_binary(mask: &Image<u8>, cfg: &InitConfig) -> Result<Classification> {
    let se = StructuringElement::disk(cfg.erosion_radius as usize).ok_or_else(|| {
        InitError::InvalidConfig(format!(
            "erosion_radius {} is too large for a disk",
            cfg.erosion_radius
        ))
    })?;
    let inside = erode_binary_u8(&mask.as_view(), &se, &cfg.edge_policy.border_mode());
    let border = xor_binary_u8(&mask.as_view(), &inside.as_view())?;

    let interior = Image::from_fn(mask.width(), mask.height(), |x, y| {
        if border.get(x, y).is_some_and(|&v| v > 0) {
            PixelState::Band
        } else if inside.get(x, y).is_some_and(|&v| v > 0) {
            PixelState::Inside
        } else {
            PixelState::Known
        }
    });

    let states = pad(
        &interior.as_view(),
        HALO,
        &BorderMode::Constant(PixelState::Known),
    )?;
    let arrival = states.map(|s| s.initial_time());
    let grids = Classification { states, arrival };

    let band = grids.count(PixelState::Band);
    let inner = grids.count(PixelState::Inside);
    debug!(
        "classified {}x{} mask (radius {}, {:?}): band={} inside={}",
        mask.width(),
        mask.height(),
        cfg.erosion_radius,
        cfg.edge_policy,
        band,
        inner
    );
    if band == 0 && inner > 0 {
        warn!("damaged region has no band; nothing can propagate into {inner} inside pixels");
    }

    Ok(grids)
}
