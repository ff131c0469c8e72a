//! Transformation parameter types
//!
//! Each option maps to a short code in the delivery path:
//! `w_800,h_600,c_fill,g_north` and so on.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::UrlError;

/// How the asset is fitted into the requested dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Scale,
    Fit,
    Limit,
    MFit,
    Fill,
    LFill,
    Pad,
    LPad,
    MPad,
    Crop,
    Thumb,
    ImaggaCrop,
    ImaggaScale,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Fit => "fit",
            Self::Limit => "limit",
            Self::MFit => "mfit",
            Self::Fill => "fill",
            Self::LFill => "lfill",
            Self::Pad => "pad",
            Self::LPad => "lpad",
            Self::MPad => "mpad",
            Self::Crop => "crop",
            Self::Thumb => "thumb",
            Self::ImaggaCrop => "imagga_crop",
            Self::ImaggaScale => "imagga_scale",
        }
    }

    /// Modes whose output size is not the requested size, so the
    /// requested size must not be echoed into HTML attributes
    pub fn hides_html_size(&self) -> bool {
        matches!(self, Self::Fit | Self::Limit)
    }
}

impl FromStr for CropMode {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scale" => Ok(CropMode::Scale),
            "fit" => Ok(CropMode::Fit),
            "limit" => Ok(CropMode::Limit),
            "mfit" => Ok(CropMode::MFit),
            "fill" => Ok(CropMode::Fill),
            "lfill" => Ok(CropMode::LFill),
            "pad" => Ok(CropMode::Pad),
            "lpad" => Ok(CropMode::LPad),
            "mpad" => Ok(CropMode::MPad),
            "crop" => Ok(CropMode::Crop),
            "thumb" => Ok(CropMode::Thumb),
            "imagga_crop" => Ok(CropMode::ImaggaCrop),
            "imagga_scale" => Ok(CropMode::ImaggaScale),
            _ => Err(UrlError::invalid_param(
                "crop",
                format!("unknown crop mode: {}", s),
            )),
        }
    }
}

/// Gravity/anchor point for cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Center,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Largest detected face
    Face,
    /// All detected faces
    Faces,
    /// Pixel coordinates given by x/y
    XyCenter,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::NorthEast => "north_east",
            Self::NorthWest => "north_west",
            Self::SouthEast => "south_east",
            Self::SouthWest => "south_west",
            Self::Face => "face",
            Self::Faces => "faces",
            Self::XyCenter => "xy_center",
        }
    }
}

impl FromStr for Gravity {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "center" => Ok(Gravity::Center),
            "north" => Ok(Gravity::North),
            "south" => Ok(Gravity::South),
            "east" => Ok(Gravity::East),
            "west" => Ok(Gravity::West),
            "north_east" => Ok(Gravity::NorthEast),
            "north_west" => Ok(Gravity::NorthWest),
            "south_east" => Ok(Gravity::SouthEast),
            "south_west" => Ok(Gravity::SouthWest),
            "face" => Ok(Gravity::Face),
            "faces" => Ok(Gravity::Faces),
            "xy_center" => Ok(Gravity::XyCenter),
            _ => Err(UrlError::invalid_param(
                "gravity",
                format!("unknown gravity: {}", s),
            )),
        }
    }
}

/// Dimension that can be whole pixels or a fraction of the original
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Pixels(u32),
    /// Relative size, `0.5` is half of the original
    Relative(f32),
}

impl Dimension {
    /// Whether the value is at least one pixel and can be used as an HTML size
    pub fn is_html_size(&self) -> bool {
        match self {
            Dimension::Pixels(px) => *px >= 1,
            Dimension::Relative(r) => *r >= 1.0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Pixels(px) => write!(f, "{}", px),
            Dimension::Relative(r) => write!(f, "{}", r),
        }
    }
}

impl FromStr for Dimension {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(px) = s.parse::<u32>() {
            return Ok(Dimension::Pixels(px));
        }
        let r: f32 = s
            .parse()
            .map_err(|_| UrlError::invalid_param("dimension", "invalid pixel or relative value"))?;
        if !r.is_finite() || r < 0.0 {
            return Err(UrlError::invalid_param(
                "dimension",
                "relative value must be a positive number",
            ));
        }
        Ok(Dimension::Relative(r))
    }
}

/// One step of a transformation chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformationOptions {
    // === Resize ===
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub crop: Option<CropMode>,
    pub gravity: Option<Gravity>,
    pub x: Option<i32>,
    pub y: Option<i32>,

    // === Output ===
    pub quality: Option<String>,
    pub fetch_format: Option<String>,
    pub density: Option<u32>,
    pub page: Option<u32>,
    pub color_space: Option<String>,
    pub delay: Option<u32>,

    // === Effects ===
    pub radius: Option<String>,
    /// Rotation modes or degrees, joined with `.`
    pub angle: Vec<String>,
    /// Background color; a leading `#` is rendered as `rgb:`
    pub background: Option<String>,
    pub effect: Option<String>,
    pub opacity: Option<u8>,
    pub flags: Vec<String>,

    // === Layers ===
    pub overlay: Option<String>,
    pub underlay: Option<String>,
    pub default_image: Option<String>,
    pub prefix: Option<String>,

    // === Composition ===
    /// Named transformations defined on the account
    pub named: Vec<String>,
    /// Appended verbatim after the generated parameters
    pub raw_transformation: Option<String>,
}

impl TransformationOptions {
    pub fn has_layer(&self) -> bool {
        self.overlay.as_deref().is_some_and(|s| !s.is_empty())
            || self.underlay.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render this step as `code_value` pairs sorted by code
    pub fn generate(&self) -> String {
        let mut params: BTreeMap<&'static str, String> = BTreeMap::new();

        // Sizes only reach the URL when something tells the service how to apply them
        if self.crop.is_some() || self.has_layer() {
            put(&mut params, "w", self.width.map(|w| w.to_string()));
            put(&mut params, "h", self.height.map(|h| h.to_string()));
        }

        put(&mut params, "c", self.crop.map(|c| c.as_str().to_string()));
        put(&mut params, "g", self.gravity.map(|g| g.as_str().to_string()));
        put(&mut params, "x", self.x.map(|x| x.to_string()));
        put(&mut params, "y", self.y.map(|y| y.to_string()));
        put(&mut params, "q", self.quality.clone());
        put(&mut params, "f", self.fetch_format.clone());
        put(&mut params, "dn", self.density.map(|d| d.to_string()));
        put(&mut params, "pg", self.page.map(|p| p.to_string()));
        put(&mut params, "cs", self.color_space.clone());
        put(&mut params, "dl", self.delay.map(|d| d.to_string()));
        put(&mut params, "r", self.radius.clone());
        put(&mut params, "a", join_non_empty(&self.angle, "."));
        put(
            &mut params,
            "b",
            self.background.as_ref().map(|b| match b.strip_prefix('#') {
                Some(hex) => format!("rgb:{}", hex),
                None => b.clone(),
            }),
        );
        put(&mut params, "e", self.effect.clone());
        put(&mut params, "o", self.opacity.map(|o| o.to_string()));
        put(&mut params, "fl", join_non_empty(&self.flags, "."));
        put(&mut params, "l", self.overlay.clone());
        put(&mut params, "u", self.underlay.clone());
        put(&mut params, "d", self.default_image.clone());
        put(&mut params, "p", self.prefix.clone());
        put(&mut params, "t", join_non_empty(&self.named, "."));

        let mut components: Vec<String> = params
            .into_iter()
            .map(|(code, value)| format!("{}_{}", code, value))
            .collect();

        if let Some(raw) = self.raw_transformation.as_deref().filter(|r| !r.is_empty()) {
            components.push(raw.to_string());
        }

        components.join(",")
    }

    /// HTML width attribute implied by this step
    pub fn html_width(&self) -> Option<String> {
        self.html_size(self.width)
    }

    /// HTML height attribute implied by this step
    pub fn html_height(&self) -> Option<String> {
        self.html_size(self.height)
    }

    fn html_size(&self, size: Option<Dimension>) -> Option<String> {
        let no_html_sizes = self.has_layer()
            || !self.angle.is_empty()
            || self.crop.is_some_and(|c| c.hides_html_size());
        match size {
            Some(dim) if dim.is_html_size() && !no_html_sizes => Some(dim.to_string()),
            _ => None,
        }
    }
}

fn put(params: &mut BTreeMap<&'static str, String>, code: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.insert(code, value);
    }
}

fn join_non_empty(values: &[String], sep: &str) -> Option<String> {
    let joined = values
        .iter()
        .filter(|v| !v.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(sep);
    (!joined.is_empty()).then_some(joined)
}
