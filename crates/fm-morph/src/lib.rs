//! Minimal binary morphology helpers.
//!
//! Pixels are treated as binary with threshold `> 0`.
//! Outputs are `0` or `1` in `u8`.
//!
//! Samples that fall outside the source are resolved through a
//! [`BorderMode`]. `BorderMode::Clamp` repeats the edge pixel. For the
//! radius-1 cross only, this matches half-sample reflection; wider elements
//! reach past the mirrored edge and the two modes diverge.
//! `BorderMode::Constant(0)` treats everything outside as unset.

use fm_core::{BorderMode, Image, ImageView, sample_with_border};

/// Flat structuring element stored as offsets from its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Discrete disk: every `(dx, dy)` with `dx*dx + dy*dy <= r*r`.
    ///
    /// `disk(1)` is the 4-connected cross, `disk(0)` the origin alone.
    /// Returns `None` when `r*r` does not fit in `isize`.
    pub fn disk(radius: usize) -> Option<Self> {
        let r = isize::try_from(radius).ok()?;
        let r2 = r.checked_mul(r)?;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            let room = r2 - dy * dy;
            for dx in -r..=r {
                if dx * dx <= room {
                    offsets.push((dx, dy));
                }
            }
        }
        Some(Self { offsets })
    }

    pub fn cross() -> Self {
        Self {
            offsets: vec![(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)],
        }
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Normalizes any `u8` mask to strict 0/1.
pub fn binarize_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    Image::from_fn(src.width(), src.height(), |x, y| {
        src.get(x, y).map_or(0, |&v| u8::from(v > 0))
    })
}

pub fn binarize_bool(src: &ImageView<'_, bool>) -> Image<u8> {
    Image::from_fn(src.width(), src.height(), |x, y| {
        src.get(x, y).map_or(0, |&v| u8::from(v))
    })
}

/// Binary erosion: a pixel stays set only if every sample under `se` is set.
pub fn erode_binary_u8(
    src: &ImageView<'_, u8>,
    se: &StructuringElement,
    border: &BorderMode<u8>,
) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    for y in 0..src.height() {
        let src_row = src.row(y);
        for x in 0..src.width() {
            if src_row[x] == 0 {
                continue;
            }

            let all_set = se.offsets().iter().all(|&(dx, dy)| {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                sample_with_border(src, nx, ny, border).is_some_and(|v| v > 0)
            });

            if all_set && let Some(px) = out.get_mut(x, y) {
                *px = 1;
            }
        }
    }

    out
}

/// Pixelwise `a XOR b` on binary inputs. Extents must match.
pub fn xor_binary_u8(
    a: &ImageView<'_, u8>,
    b: &ImageView<'_, u8>,
) -> Result<Image<u8>, fm_core::Error> {
    if a.dims() != b.dims() {
        return Err(fm_core::Error::ExtentMismatch {
            expected: a.dims(),
            actual: b.dims(),
        });
    }

    Ok(Image::from_fn(a.width(), a.height(), |x, y| {
        let av = a.get(x, y).is_some_and(|&v| v > 0);
        let bv = b.get(x, y).is_some_and(|&v| v > 0);
        u8::from(av ^ bv)
    }))
}

#[cfg(test)]
mod tests {
    use fm_core::{BorderMode, Image};

    use crate::{StructuringElement, binarize_bool, binarize_u8, erode_binary_u8, xor_binary_u8};

    fn block_mask(w: usize, h: usize, x0: usize, y0: usize, bw: usize, bh: usize) -> Image<u8> {
        Image::from_fn(w, h, |x, y| {
            u8::from(x >= x0 && x < x0 + bw && y >= y0 && y < y0 + bh)
        })
    }

    #[test]
    fn disk_one_is_cross() {
        let se = StructuringElement::disk(1).expect("small radius");
        assert_eq!(se, StructuringElement::cross());
        let mut offsets = se.offsets().to_vec();
        offsets.sort();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn disk_two_excludes_far_corners() {
        let se = StructuringElement::disk(2).expect("small radius");
        assert_eq!(se.len(), 13);
        assert!(!se.offsets().contains(&(2, 2)));
        assert!(se.offsets().contains(&(2, 0)));
        assert!(se.offsets().contains(&(1, 1)));
    }

    #[test]
    fn binarize_thresholds_at_zero() {
        let img = Image::from_vec(4, 1, vec![0u8, 1, 200, 255]).expect("valid image");
        assert_eq!(binarize_u8(&img.as_view()).data(), &[0, 1, 1, 1]);

        let flags = Image::from_vec(2, 1, vec![true, false]).expect("valid image");
        assert_eq!(binarize_bool(&flags.as_view()).data(), &[1, 0]);
    }

    #[test]
    fn cross_erosion_keeps_only_center_of_3x3_block() {
        let mask = block_mask(7, 7, 2, 2, 3, 3);
        let out = erode_binary_u8(
            &mask.as_view(),
            &StructuringElement::cross(),
            &BorderMode::Clamp,
        );

        let set: Vec<(usize, usize)> = out
            .as_view()
            .iter_pixels()
            .filter(|(_, _, v)| **v == 1)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(set, vec![(3, 3)]);
    }

    #[test]
    fn cross_erosion_ignores_diagonal_gaps() {
        // Plus-shaped damage: the center has all four axis neighbors set.
        let mut mask = Image::new_fill(5, 5, 0u8);
        for (x, y) in [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)] {
            *mask.get_mut(x, y).expect("in bounds") = 1;
        }
        let out = erode_binary_u8(
            &mask.as_view(),
            &StructuringElement::cross(),
            &BorderMode::Clamp,
        );
        assert_eq!(out.data().iter().filter(|&&v| v == 1).count(), 1);
        assert_eq!(out.get(2, 2), Some(&1));
    }

    #[test]
    fn disk_rejects_radius_whose_square_overflows() {
        assert!(StructuringElement::disk(usize::MAX).is_none());
        assert!(StructuringElement::disk(isize::MAX as usize).is_none());
        assert_eq!(
            StructuringElement::disk(0).map(|se| se.offsets().to_vec()),
            Some(vec![(0, 0)])
        );
    }

    #[test]
    fn border_mode_decides_full_mask_edges() {
        let mask = Image::new_fill(4, 3, 1u8);
        let se = StructuringElement::cross();

        let clamped = erode_binary_u8(&mask.as_view(), &se, &BorderMode::Clamp);
        assert!(clamped.data().iter().all(|&v| v == 1));

        let constant = erode_binary_u8(&mask.as_view(), &se, &BorderMode::Constant(0));
        assert_eq!(constant.data(), &[0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn erosion_of_empty_extent_is_empty() {
        let mask: Image<u8> = Image::from_vec(0, 0, Vec::new()).expect("empty");
        let out = erode_binary_u8(
            &mask.as_view(),
            &StructuringElement::cross(),
            &BorderMode::Clamp,
        );
        assert_eq!(out.dims(), (0, 0));
    }

    #[test]
    fn xor_extracts_ring() {
        let mask = block_mask(5, 5, 1, 1, 3, 3);
        let inner = erode_binary_u8(
            &mask.as_view(),
            &StructuringElement::cross(),
            &BorderMode::Clamp,
        );
        let ring = xor_binary_u8(&mask.as_view(), &inner.as_view()).expect("same extent");
        assert_eq!(ring.data().iter().filter(|&&v| v == 1).count(), 8);
        assert_eq!(ring.get(2, 2), Some(&0));
    }

    #[test]
    fn xor_rejects_extent_mismatch() {
        let a = Image::new_fill(2, 2, 1u8);
        let b = Image::new_fill(3, 2, 1u8);
        assert!(xor_binary_u8(&a.as_view(), &b.as_view()).is_err());
    }
}
