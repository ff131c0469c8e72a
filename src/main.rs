use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use cloudinary_url::config::CloudConfig;
use cloudinary_url::logging::{init_subscriber, LogFormat};
use cloudinary_url::transformation::{CropMode, Dimension, Gravity};
use cloudinary_url::{Cloudinary, UrlBuilder};

/// Build Cloudinary delivery URLs and image tags
#[derive(Parser, Debug)]
#[command(name = "cloudinary-url")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file (falls back to CLOUDINARY_URL)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the cloud name
    #[arg(long, global = true)]
    cloud_name: Option<String>,

    /// Deliver over https
    #[arg(long, global = true)]
    secure: bool,

    /// Account uses a private CDN host
    #[arg(long, global = true)]
    private_cdn: bool,

    /// Spread requests over a1..a5 subdomains
    #[arg(long, global = true)]
    cdn_subdomain: bool,

    /// Use the short `iu` form for image/upload URLs
    #[arg(long, global = true)]
    shorten: bool,

    /// Custom host for http delivery
    #[arg(long, global = true)]
    cname: Option<String>,

    /// Host for https delivery
    #[arg(long, global = true)]
    secure_distribution: Option<String>,

    /// Log output format: text or json
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the delivery URL for a public id or remote URL
    Url(AssetArgs),

    /// Print an <img> tag for a public id or remote URL
    Tag {
        #[command(flatten)]
        asset: AssetArgs,

        /// Extra attribute as key=value, may be repeated
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },
}

#[derive(ClapArgs, Debug)]
struct AssetArgs {
    /// Public id or http(s) URL
    source: String,

    /// Delivery type (upload, fetch, private, ...)
    #[arg(long = "type")]
    delivery_type: Option<String>,

    /// Resource type (image, video, raw)
    #[arg(long)]
    resource_type: Option<String>,

    /// File extension to deliver
    #[arg(long)]
    format: Option<String>,

    /// Version segment
    #[arg(long)]
    version: Option<String>,

    #[arg(long)]
    width: Option<Dimension>,

    #[arg(long)]
    height: Option<Dimension>,

    #[arg(long)]
    crop: Option<CropMode>,

    #[arg(long)]
    gravity: Option<Gravity>,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("attribute '{}' must look like key=value", raw))
}

fn load_config(args: &Args) -> Result<CloudConfig> {
    let mut config = match &args.config {
        Some(path) => CloudConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => match Cloudinary::from_env() {
            Ok(cloudinary) => cloudinary.config().clone(),
            Err(e) => {
                tracing::debug!(error = %e, "No CLOUDINARY_URL, using flags only");
                CloudConfig::default()
            }
        },
    };

    if let Some(cloud_name) = &args.cloud_name {
        config.cloud_name = Some(cloud_name.clone());
    }
    if let Some(cname) = &args.cname {
        config.cname = Some(cname.clone());
    }
    if let Some(host) = &args.secure_distribution {
        config.secure_distribution = Some(host.clone());
    }
    config.secure |= args.secure;
    config.private_cdn |= args.private_cdn;
    config.cdn_subdomain |= args.cdn_subdomain;
    config.shorten |= args.shorten;

    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "Configuration is incomplete");
    }

    Ok(config)
}

fn apply_asset_args(mut builder: UrlBuilder, asset: &AssetArgs) -> UrlBuilder {
    if let Some(delivery_type) = &asset.delivery_type {
        builder = builder.delivery_type(delivery_type);
    }
    if let Some(resource_type) = &asset.resource_type {
        builder = builder.resource_type(resource_type);
    }
    if let Some(format) = &asset.format {
        builder = builder.format(format);
    }
    if let Some(version) = &asset.version {
        builder = builder.version(version);
    }

    let has_transformation = asset.width.is_some()
        || asset.height.is_some()
        || asset.crop.is_some()
        || asset.gravity.is_some();
    if has_transformation {
        let t = builder.transformation_mut();
        if let Some(width) = asset.width {
            t.width_dimension(width);
        }
        if let Some(height) = asset.height {
            t.height_dimension(height);
        }
        if let Some(crop) = asset.crop {
            t.crop(crop);
        }
        if let Some(gravity) = asset.gravity {
            t.gravity(gravity);
        }
    }

    builder
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_subscriber(args.log_format)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to initialize logging subsystem")?;

    let config = load_config(&args)?;
    tracing::debug!(
        cloud_name = config.cloud_name.as_deref().unwrap_or(""),
        secure = config.secure,
        private_cdn = config.private_cdn,
        "Configuration loaded"
    );

    let cloudinary = Cloudinary::new(config);

    match &args.command {
        Command::Url(asset) => {
            let builder = apply_asset_args(cloudinary.url(), asset);
            let url = builder
                .generate(Some(asset.source.as_str()))
                .context("Failed to generate URL")?
                .unwrap_or_default();
            println!("{}", url);
        }
        Command::Tag { asset, attributes } => {
            let builder = apply_asset_args(cloudinary.url(), asset);
            let tag = builder
                .image_tag(&asset.source, attributes.iter().cloned())
                .context("Failed to generate image tag")?;
            println!("{}", tag);
        }
    }

    Ok(())
}
