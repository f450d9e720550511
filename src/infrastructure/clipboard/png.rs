//! PNG conversion for clipboard images

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use crate::domain::{ImageData, ImageDataError};

/// Error when converting between PNG files and clipboard images
#[derive(Debug, Error)]
pub enum ImageCodecError {
    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to decode PNG: {0}")]
    Decode(String),

    #[error("Image too large for PNG: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error(transparent)]
    InvalidBuffer(#[from] ImageDataError),
}

/// Encode an RGBA clipboard image as PNG bytes
pub fn encode_png(image: &ImageData) -> Result<Vec<u8>, ImageCodecError> {
    let too_large = || ImageCodecError::TooLarge {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(image.rgba(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ImageCodecError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Decode PNG bytes into an RGBA clipboard image
pub fn decode_png(bytes: &[u8]) -> Result<ImageData, ImageCodecError> {
    let rgba = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| ImageCodecError::Decode(e.to_string()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData::from_rgba8(
        width as usize,
        height as usize,
        rgba.into_raw(),
    )?)
}
