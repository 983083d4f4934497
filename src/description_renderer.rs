use image::{ImageBuffer, Rgba, RgbaImage};

use crate::config::Config;
use crate::text_renderer::TextRenderer;

/// Renders the single-line description band placed above the calendarium.
pub struct DescriptionRenderer<'a> {
    config: &'a Config,
    text: &'a TextRenderer,
}

impl<'a> DescriptionRenderer<'a> {
    pub fn new(config: &'a Config, text: &'a TextRenderer) -> Self {
        DescriptionRenderer { config, text }
    }

    /// Band height derived from the font size plus spacing on both sides.
    pub fn height(&self) -> u32 {
        self.config.font_size_small as u32 + 2 * self.config.spacing
    }

    pub fn render(&self, description: &str, width: u32) -> RgbaImage {
        let cfg = self.config;
        let [r, g, b] = cfg.background_color;
        let mut strip: RgbaImage =
            ImageBuffer::from_pixel(width, self.height(), Rgba([r, g, b, 255]));
        self.text.draw(
            &mut strip,
            description,
            cfg.spacing as i32,
            cfg.spacing as i32,
            cfg.font_size_small,
            cfg.text_color,
        );
        strip
    }
}
