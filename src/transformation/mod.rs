//! Transformation path segment generator
//!
//! A [`Transformation`] is an ordered chain of steps. Each step renders as a
//! comma-separated list of `code_value` pairs, and steps are joined with `/`:
//!
//! ```text
//! c_fill,h_100,w_100/a_90/e_sepia
//! ```
//!
//! The URL builder treats the rendered string as opaque.

pub mod params;

pub use params::{CropMode, Dimension, Gravity, TransformationOptions};

/// Chain of transformation steps applied to a delivered asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformation {
    /// Closed steps, in application order
    chained: Vec<TransformationOptions>,
    /// Step currently receiving setter calls
    current: TransformationOptions,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current step and start a new, empty one
    pub fn chain(&mut self) -> &mut Self {
        let step = std::mem::take(&mut self.current);
        self.chained.push(step);
        self
    }

    /// Width in whole pixels
    pub fn width(&mut self, px: u32) -> &mut Self {
        self.width_dimension(Dimension::Pixels(px))
    }

    /// Height in whole pixels
    pub fn height(&mut self, px: u32) -> &mut Self {
        self.height_dimension(Dimension::Pixels(px))
    }

    pub fn width_dimension(&mut self, width: Dimension) -> &mut Self {
        self.current.width = Some(width);
        self
    }

    pub fn height_dimension(&mut self, height: Dimension) -> &mut Self {
        self.current.height = Some(height);
        self
    }

    pub fn crop(&mut self, crop: CropMode) -> &mut Self {
        self.current.crop = Some(crop);
        self
    }

    pub fn gravity(&mut self, gravity: Gravity) -> &mut Self {
        self.current.gravity = Some(gravity);
        self
    }

    pub fn x(&mut self, x: i32) -> &mut Self {
        self.current.x = Some(x);
        self
    }

    pub fn y(&mut self, y: i32) -> &mut Self {
        self.current.y = Some(y);
        self
    }

    pub fn quality(&mut self, quality: impl Into<String>) -> &mut Self {
        self.current.quality = Some(quality.into());
        self
    }

    pub fn fetch_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.current.fetch_format = Some(format.into());
        self
    }

    pub fn density(&mut self, density: u32) -> &mut Self {
        self.current.density = Some(density);
        self
    }

    pub fn page(&mut self, page: u32) -> &mut Self {
        self.current.page = Some(page);
        self
    }

    pub fn color_space(&mut self, color_space: impl Into<String>) -> &mut Self {
        self.current.color_space = Some(color_space.into());
        self
    }

    pub fn delay(&mut self, delay: u32) -> &mut Self {
        self.current.delay = Some(delay);
        self
    }

    pub fn radius(&mut self, radius: impl Into<String>) -> &mut Self {
        self.current.radius = Some(radius.into());
        self
    }

    pub fn angle<I, S>(&mut self, angles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current.angle = angles.into_iter().map(Into::into).collect();
        self
    }

    pub fn background(&mut self, background: impl Into<String>) -> &mut Self {
        self.current.background = Some(background.into());
        self
    }

    pub fn effect(&mut self, effect: impl Into<String>) -> &mut Self {
        self.current.effect = Some(effect.into());
        self
    }

    /// Effect with a strength argument, rendered as `name:value`
    pub fn effect_with(&mut self, effect: &str, value: impl std::fmt::Display) -> &mut Self {
        self.current.effect = Some(format!("{}:{}", effect, value));
        self
    }

    pub fn opacity(&mut self, opacity: u8) -> &mut Self {
        self.current.opacity = Some(opacity);
        self
    }

    pub fn flags<I, S>(&mut self, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn overlay(&mut self, overlay: impl Into<String>) -> &mut Self {
        self.current.overlay = Some(overlay.into());
        self
    }

    pub fn underlay(&mut self, underlay: impl Into<String>) -> &mut Self {
        self.current.underlay = Some(underlay.into());
        self
    }

    pub fn default_image(&mut self, default_image: impl Into<String>) -> &mut Self {
        self.current.default_image = Some(default_image.into());
        self
    }

    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.current.prefix = Some(prefix.into());
        self
    }

    pub fn named<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current.named = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn raw_transformation(&mut self, raw: impl Into<String>) -> &mut Self {
        self.current.raw_transformation = Some(raw.into());
        self
    }

    /// Render the full chain; empty steps are skipped
    pub fn generate(&self) -> String {
        self.steps()
            .map(TransformationOptions::generate)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// HTML width implied by the final step
    pub fn html_width(&self) -> Option<String> {
        self.current.html_width()
    }

    /// HTML height implied by the final step
    pub fn html_height(&self) -> Option<String> {
        self.current.html_height()
    }

    pub fn is_empty(&self) -> bool {
        self.steps().all(TransformationOptions::is_empty)
    }

    fn steps(&self) -> impl Iterator<Item = &TransformationOptions> {
        self.chained.iter().chain(std::iter::once(&self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transformation_generates_nothing() {
        let t = Transformation::new();
        assert!(t.is_empty());
        assert_eq!(t.generate(), "");
    }

    #[test]
    fn test_single_step() {
        let mut t = Transformation::new();
        t.width(100).height(100).crop(CropMode::Fill).gravity(Gravity::Face);
        assert_eq!(t.generate(), "c_fill,g_face,h_100,w_100");
    }

    #[test]
    fn test_chained_steps_joined_with_slash() {
        let mut t = Transformation::new();
        t.width(100).crop(CropMode::Scale).chain().angle(["90"]).chain().effect("sepia");
        assert_eq!(t.generate(), "c_scale,w_100/a_90/e_sepia");
    }

    #[test]
    fn test_empty_steps_skipped() {
        let mut t = Transformation::new();
        t.chain().chain().effect("grayscale");
        assert_eq!(t.generate(), "e_grayscale");
    }

    #[test]
    fn test_html_size_comes_from_final_step() {
        let mut t = Transformation::new();
        t.width(100).height(50);
        assert_eq!(t.html_width().as_deref(), Some("100"));
        assert_eq!(t.html_height().as_deref(), Some("50"));

        t.chain().effect("sepia");
        assert_eq!(t.html_width(), None);
        assert_eq!(t.html_height(), None);
    }

    #[test]
    fn test_effect_with_value() {
        let mut t = Transformation::new();
        t.effect_with("brightness", 30);
        assert_eq!(t.generate(), "e_brightness:30");
    }

    #[test]
    fn test_fetch_format() {
        let mut t = Transformation::new();
        t.fetch_format("png");
        assert_eq!(t.generate(), "f_png");
    }
}
