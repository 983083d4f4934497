use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Computes the centered crop box (x, y, width, height) that brings a source
/// of `(source_width, source_height)` to the aspect ratio of
/// `(target_width, target_height)`.
///
/// If the source is relatively wider, symmetric left/right margins are cut so
/// the cropped width becomes `round(target_ratio * source_height)`; otherwise
/// symmetric top/bottom margins are cut so the cropped height becomes
/// `round(source_width / target_ratio)`. Centering offsets use floor-of-half,
/// so identical inputs always produce the identical box.
pub fn cover_crop_box(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32, u32, u32) {
    let source_ratio = source_width as f64 / source_height as f64;
    let target_ratio = target_width as f64 / target_height as f64;

    if source_ratio > target_ratio {
        // Source relatively wider: cut sides, keep full height
        let new_width = ((target_ratio * source_height as f64).round() as u32)
            .clamp(1, source_width);
        let left = (source_width - new_width) / 2;
        (left, 0, new_width, source_height)
    } else {
        // Source relatively taller or equal: cut top and bottom, keep full width
        let new_height = ((source_width as f64 / target_ratio).round() as u32)
            .clamp(1, source_height);
        let top = (source_height - new_height) / 2;
        (0, top, source_width, new_height)
    }
}

/// Cover fit: center-crops the source to the target aspect ratio, then scales
/// to exactly `(target_width, target_height)`. The target rectangle is always
/// fully covered, content outside the crop box is discarded, and the aspect
/// ratio within the crop is never distorted.
pub fn crop_and_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> DynamicImage {
    let (source_width, source_height) = image.dimensions();
    let (x, y, width, height) =
        cover_crop_box(source_width, source_height, target_width, target_height);
    image
        .crop_imm(x, y, width, height)
        .resize_exact(target_width, target_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_crop_box_wider_source() {
        // Source wider than the slot ratio loses its sides: crop width =
        // round(target_ratio * source_height)
        let (x, y, w, h) = cover_crop_box(2000, 1000, 1000, 1000);
        assert_eq!((x, y, w, h), (500, 0, 1000, 1000));
    }

    #[test]
    fn test_crop_box_taller_source() {
        // 1600x1200 into a 1000x700 slot: the slot ratio (10/7) is wider than
        // the source (4/3), so top/bottom are cut: crop height =
        // round(1600 / (10/7)) = 1120, centered
        let (x, y, w, h) = cover_crop_box(1600, 1200, 1000, 700);
        assert_eq!((x, y, w, h), (0, 40, 1600, 1120));

        let (x, y, w, h) = cover_crop_box(1000, 2000, 400, 400);
        assert_eq!((x, y, w, h), (0, 500, 1000, 1000));
    }

    #[test]
    fn test_crop_box_matching_ratio_is_identity() {
        let (x, y, w, h) = cover_crop_box(800, 600, 400, 300);
        assert_eq!((x, y, w, h), (0, 0, 800, 600));
    }

    #[test]
    fn test_crop_box_never_zero_area() {
        let (_, _, w, h) = cover_crop_box(1, 1000, 1000, 1);
        assert!(w >= 1 && h >= 1);
        let (_, _, w, h) = cover_crop_box(1000, 1, 1, 1000);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_crop_box_centering_is_floor_of_half() {
        // Odd margin: 5 pixels to distribute, floor(5/2) = 2 on the left
        let (x, _, w, _) = cover_crop_box(105, 100, 100, 100);
        assert_eq!(w, 100);
        assert_eq!(x, 2);
    }

    #[test]
    fn test_crop_and_resize_exact_output_size() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(1600, 1200));
        let fitted = crop_and_resize(&source, 1000, 700);
        assert_eq!(fitted.dimensions(), (1000, 700));

        let fitted = crop_and_resize(&source, 123, 457);
        assert_eq!(fitted.dimensions(), (123, 457));
    }
}
