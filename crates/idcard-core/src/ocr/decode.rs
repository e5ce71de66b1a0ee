//! Image decoding for recognizer input.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::OcrError;

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGB image.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, OcrError> {
    if data.is_empty() {
        return Err(OcrError::DecodeFailure("image data is empty".to_string()));
    }

    let image = image::load_from_memory(data)
        .map_err(|e| OcrError::DecodeFailure(format!("failed to decode image bytes: {}", e)))?;

    let (width, height) = image.dimensions();
    debug!("Decoded {}x{} image from {} bytes", width, height, data.len());

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}
