use crate::error::{PipelineError, Result};
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, Luma};
use imageproc::contrast::otsu_level;

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// Binarised single-channel image handed to the OCR engine.
///
/// Every pixel is either 0 or 255 and the dimensions match the source image.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pixels: GrayImage,
    threshold: u8,
}

impl ProcessedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Lowest intensity mapped to white.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// Encode as PNG, the in-memory format Tesseract reads.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.pixels
            .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| PipelineError::Internal(format!("Failed to encode image: {e}")))?;
        Ok(output)
    }
}

/// Decode raw upload bytes (PNG, JPEG, ...) into a raster image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(PipelineError::ImageDecode("Image data is empty".to_string()));
    }

    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::ImageDecode(format!("Failed to read image: {e}")))?;

    reader
        .decode()
        .map_err(|e| PipelineError::ImageDecode(format!("Failed to decode image: {e}")))
}

/// Grayscale then global Otsu binarisation.
///
/// `otsu_level` returns the top of the dark class, so the white cut-off is one
/// above it: pixels at or above the cut-off become white, everything else black.
pub fn preprocess(image: &DynamicImage) -> ProcessedImage {
    let gray = image.to_luma8();
    let threshold = otsu_level(&gray).saturating_add(1);
    let pixels = binarize(&gray, threshold);

    tracing::debug!(
        width = pixels.width(),
        height = pixels.height(),
        threshold,
        "Image binarised"
    );

    ProcessedImage { pixels, threshold }
}

/// Decode and preprocess in one step.
pub fn preprocess_bytes(bytes: &[u8]) -> Result<ProcessedImage> {
    let image = decode_image(bytes)?;
    Ok(preprocess(&image))
}

fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] >= threshold {
            Luma([WHITE])
        } else {
            Luma([BLACK])
        }
    })
}
