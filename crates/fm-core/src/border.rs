use crate::{Error, Image, ImageView};

/// How samples outside the grid are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
}

/// Maps a possibly out-of-range index onto `0..len`.
///
/// Returns `None` for [`BorderMode::Constant`] (the caller substitutes the
/// constant) and for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => {
            if len == 0 {
                return None;
            }
            if i < 0 { Some(0) } else { Some(len - 1) }
        }
    }
}

/// Reads `src` at a signed position, resolving out-of-range samples with `mode`.
pub fn sample_with_border<T: Clone>(
    src: &ImageView<'_, T>,
    x: isize,
    y: isize,
    mode: &BorderMode<T>,
) -> Option<T> {
    let in_x = x >= 0 && (x as usize) < src.width();
    let in_y = y >= 0 && (y as usize) < src.height();
    if !(in_x && in_y)
        && let BorderMode::Constant(v) = mode
    {
        return Some(v.clone());
    }

    let mx = map_index(x, src.width(), mode)?;
    let my = map_index(y, src.height(), mode)?;
    src.get(mx, my).cloned()
}

/// Allocates a `(w + 2*halo) x (h + 2*halo)` grid with `src` in the interior
/// and the halo resolved through `mode`.
pub fn pad<T: Clone>(
    src: &ImageView<'_, T>,
    halo: usize,
    mode: &BorderMode<T>,
) -> Result<Image<T>, Error> {
    let (w, h) = src.dims();
    let margin = halo.checked_mul(2).ok_or(Error::OutOfBounds)?;
    let out_w = w.checked_add(margin).ok_or(Error::OutOfBounds)?;
    let out_h = h.checked_add(margin).ok_or(Error::OutOfBounds)?;

    if w == 0 || h == 0 {
        // Nothing to replicate from; only a constant can fill the halo.
        return match mode {
            BorderMode::Constant(v) => Ok(Image::new_fill(out_w, out_h, v.clone())),
            _ => Err(Error::OutOfBounds),
        };
    }

    let halo_i = halo as isize;
    let mut cells = Vec::with_capacity(out_w * out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let sx = x as isize - halo_i;
            let sy = y as isize - halo_i;
            let v = sample_with_border(src, sx, sy, mode).ok_or(Error::OutOfBounds)?;
            cells.push(v);
        }
    }

    Image::from_vec(out_w, out_h, cells)
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index, pad, sample_with_border};
    use crate::Image;

    #[test]
    fn clamp_mapping_handles_negative_and_overflow() {
        let mode = BorderMode::<u8>::Clamp;

        assert_eq!(map_index(-3, 5, &mode), Some(0));
        assert_eq!(map_index(-1, 5, &mode), Some(0));
        assert_eq!(map_index(2, 5, &mode), Some(2));
        assert_eq!(map_index(5, 5, &mode), Some(4));
        assert_eq!(map_index(99, 5, &mode), Some(4));
        assert_eq!(map_index(0, 0, &mode), None);
    }

    #[test]
    fn constant_mode_substitutes_value_outside() {
        let img = Image::from_vec(2, 2, vec![1u8, 2, 3, 4]).expect("valid image");
        let mode = BorderMode::Constant(7u8);

        assert_eq!(sample_with_border(&img.as_view(), -1, 0, &mode), Some(7));
        assert_eq!(sample_with_border(&img.as_view(), 1, 1, &mode), Some(4));
        assert_eq!(map_index(-1, 2, &mode), None);
    }

    #[test]
    fn pad_constant_surrounds_interior() {
        let img = Image::from_vec(2, 1, vec![5u8, 6]).expect("valid image");
        let padded = pad(&img.as_view(), 1, &BorderMode::Constant(0)).expect("pad");

        assert_eq!(padded.dims(), (4, 3));
        assert_eq!(padded.data(), &[0, 0, 0, 0, 0, 5, 6, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn pad_clamp_replicates_edges() {
        let img = Image::from_vec(2, 1, vec![5u8, 6]).expect("valid image");
        let padded = pad(&img.as_view(), 1, &BorderMode::Clamp).expect("pad");

        assert_eq!(padded.data(), &[5, 5, 6, 6, 5, 5, 6, 6, 5, 5, 6, 6]);
    }

    #[test]
    fn pad_empty_source_needs_constant() {
        let img: Image<u8> = Image::from_vec(0, 3, Vec::new()).expect("empty image");
        assert!(pad(&img.as_view(), 1, &BorderMode::Clamp).is_err());

        let padded = pad(&img.as_view(), 1, &BorderMode::Constant(9u8)).expect("pad");
        assert_eq!(padded.dims(), (2, 5));
        assert!(padded.data().iter().all(|&v| v == 9));
    }
}
