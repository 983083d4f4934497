use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse font file {0}")]
    InvalidFont(String),
}

/// Rasterizes text onto RGBA canvases with a single loaded font.
pub struct TextRenderer {
    font: Font<'static>,
}

impl TextRenderer {
    pub fn from_file(path: &Path) -> Result<Self, TextError> {
        let data = std::fs::read(path)?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| TextError::InvalidFont(path.display().to_string()))?;
        Ok(TextRenderer { font })
    }

    /// Pixel width of `text` at the given size.
    pub fn measure(&self, text: &str, size: f32) -> u32 {
        let scale = Scale::uniform(size);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| bb.max.x)
            .max()
            .unwrap_or(0)
            .max(0) as u32
    }

    /// Draws `text` with its top-left corner at (x, y), alpha-blending the
    /// glyph coverage over the existing pixels.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, size: f32, color: [u8; 3]) {
        let scale = Scale::uniform(size);
        let ascent = self.font.v_metrics(scale).ascent;
        let glyphs = self
            .font
            .layout(text, scale, point(x as f32, y as f32 + ascent));

        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px >= 0
                        && py >= 0
                        && (px as u32) < canvas.width()
                        && (py as u32) < canvas.height()
                    {
                        let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                        *pixel = blend(*pixel, color, coverage);
                    }
                });
            }
        }
    }

    /// Draws `text` horizontally centered within `width`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        width: u32,
        y: i32,
        size: f32,
        color: [u8; 3],
    ) {
        let text_width = self.measure(text, size);
        let x = (width.saturating_sub(text_width) / 2) as i32;
        self.draw(canvas, text, x, y, size, color);
    }
}

fn blend(under: Rgba<u8>, over: [u8; 3], coverage: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| -> u8 {
        (a as f32 + (b as f32 - a as f32) * coverage).round() as u8
    };
    Rgba([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let under = Rgba([0, 0, 0, 255]);
        assert_eq!(blend(under, [255, 255, 255], 0.0), Rgba([0, 0, 0, 255]));
        assert_eq!(
            blend(under, [255, 255, 255], 1.0),
            Rgba([255, 255, 255, 255])
        );
        assert_eq!(
            blend(under, [255, 255, 255], 0.5),
            Rgba([128, 128, 128, 255])
        );
    }

    #[test]
    fn test_missing_font_file() {
        let result = TextRenderer::from_file(Path::new("/no/such/font.ttf"));
        assert!(matches!(result, Err(TextError::Io(_))));
    }
}
