#![allow(dead_code)]

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use serde_json::{json, Value};

pub const URL: &str = "https://example.com/";
pub const TIMESTAMP: &str = "2024-01-01T00:00:00+00:00";

/// PNG bytes for a deterministic RGB gradient image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 42]));
    let mut buffer = Cursor::new(Vec::new());
    pixels
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("png encode");
    buffer.into_inner()
}

/// Base64 of a PNG screenshot, the wire encoding of the `image` field.
pub fn png_base64(width: u32, height: u32) -> String {
    BASE64.encode(png_bytes(width, height))
}

/// Base64 of an RGBA PNG with a uniform translucent pixel.
pub fn rgba_png_base64(width: u32, height: u32) -> String {
    let pixels = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]));
    let mut buffer = Cursor::new(Vec::new());
    pixels
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("png encode");
    BASE64.encode(buffer.into_inner())
}

/// A leaf tree node in the wire shape.
pub fn leaf(tag: &str, bbox: [i64; 4]) -> Value {
    json!({
        "tag": tag,
        "bbox": bbox,
        "children": [],
        "meta": {},
    })
}

/// A full upload payload around the given bbox tree.
pub fn payload(width: u32, height: u32, bbox_tree: Value) -> String {
    json!({
        "url": URL,
        "timestamp": TIMESTAMP,
        "image": png_base64(width, height),
        "bbox_tree": bbox_tree,
    })
    .to_string()
}
