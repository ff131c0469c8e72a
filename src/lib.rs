// Cloudinary delivery URL library
//
// Pure string computation: nothing in this crate performs network I/O.

pub mod cloudinary;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod transformation;
pub mod url;

pub use cloudinary::Cloudinary;
pub use config::{CloudConfig, ConfigSource};
pub use error::UrlError;
pub use transformation::{CropMode, Dimension, Gravity, Transformation};
pub use url::UrlBuilder;
