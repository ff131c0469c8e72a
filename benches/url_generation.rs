use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cloudinary_url::transformation::{CropMode, Gravity};
use cloudinary_url::{CloudConfig, Cloudinary};

/// Benchmark the common case: plain public id, default routing
fn bench_generate_simple(c: &mut Criterion) {
    let cloudinary = Cloudinary::new(CloudConfig::new("demo"));
    let builder = cloudinary.url();

    c.bench_function("generate_simple", |b| {
        b.iter(|| builder.generate(black_box(Some("sample"))))
    });
}

/// Benchmark sharded URLs (CRC32 over the source on every call)
fn bench_generate_sharded(c: &mut Criterion) {
    let mut config = CloudConfig::new("demo");
    config.cdn_subdomain = true;
    let builder = Cloudinary::new(config).url();

    c.bench_function("generate_sharded_nested", |b| {
        b.iter(|| builder.generate(black_box(Some("folder/sub/sample.jpg"))))
    });
}

/// Benchmark fetch URLs that need escaping plus a transformation
fn bench_generate_fetch(c: &mut Criterion) {
    let builder = Cloudinary::new(CloudConfig::new("demo"))
        .url()
        .delivery_type("fetch")
        .format("webp")
        .transform(|t| {
            t.width(800).height(600).crop(CropMode::Fill).gravity(Gravity::Faces);
        });

    c.bench_function("generate_fetch_escaped", |b| {
        b.iter(|| builder.generate(black_box(Some("https://example.com/images/a photo.jpg?x=1"))))
    });
}

fn bench_image_tag(c: &mut Criterion) {
    let builder = Cloudinary::new(CloudConfig::new("demo"))
        .url()
        .transform(|t| {
            t.width(100).height(100).crop(CropMode::Thumb);
        });

    c.bench_function("image_tag", |b| {
        b.iter(|| builder.image_tag(black_box("sample"), [("alt", "sample"), ("class", "thumb")]))
    });
}

criterion_group!(
    benches,
    bench_generate_simple,
    bench_generate_sharded,
    bench_generate_fetch,
    bench_image_tag
);
criterion_main!(benches);
