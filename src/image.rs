use crate::error::{BreedGuruError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::path::Path;

/// Width the image is downsampled to before the brightness estimate.
pub const SAMPLE_WIDTH: u32 = 100;

/// Mean luma (0-255 scale) below which an upload is flagged as dark.
pub const BRIGHTNESS_THRESHOLD: f64 = 70.0;

/// An uploaded image: raw bytes plus their MIME type. Consumed once by
/// the encoder, never persisted.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        if bytes.is_empty() {
            return Err(BreedGuruError::ValidationError("No image provided.".into()));
        }
        if mime_type.is_empty() {
            return Err(BreedGuruError::ValidationError(
                "Image MIME type is required.".into(),
            ));
        }
        Ok(Self { bytes, mime_type })
    }

    /// Read an image file, sniffing the MIME type from the bytes.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let format = image::guess_format(&bytes).map_err(|e| {
            BreedGuruError::ValidationError(format!("Unrecognized image format: {}", e))
        })?;
        Self::new(bytes, format.to_mime_type())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Encode as a `data:<mime>;base64,<payload>` URI.
    pub fn to_data_uri(&self) -> EncodedImage {
        EncodedImage {
            uri: format!(
                "data:{};base64,{}",
                self.mime_type,
                STANDARD.encode(&self.bytes)
            ),
        }
    }
}

/// A validated data-URI string embedding an image and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    uri: String,
}

impl EncodedImage {
    /// Accept an externally supplied data URI, rejecting anything that is
    /// not `data:<mime>;base64,<payload>`.
    pub fn parse(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let rest = uri.strip_prefix("data:").ok_or_else(|| {
            BreedGuruError::ValidationError(
                "Expected a data URI of the form 'data:<mimetype>;base64,<encoded_data>'.".into(),
            )
        })?;
        let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
            BreedGuruError::ValidationError(
                "Expected a data URI of the form 'data:<mimetype>;base64,<encoded_data>'.".into(),
            )
        })?;
        if mime.is_empty() || payload.is_empty() {
            return Err(BreedGuruError::ValidationError(
                "Data URI is missing its MIME type or payload.".into(),
            ));
        }
        Ok(Self { uri })
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn mime_type(&self) -> &str {
        let rest = &self.uri["data:".len()..];
        rest.split(";base64,").next().unwrap_or_default()
    }

    /// The Base64 payload without the data-URI wrapper, as the Gemini
    /// inline-data part expects it.
    pub fn base64_data(&self) -> &str {
        self.uri
            .split_once(";base64,")
            .map(|(_, data)| data)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Non-fatal warning attached to uploads that look too dark to classify well.
#[derive(Debug, Clone)]
pub struct QualityAdvisory {
    pub message: String,
    pub brightness: f64,
}

/// Mean perceptual brightness after downsampling to `SAMPLE_WIDTH`,
/// using the standard luma weights (R 299, G 587, B 114).
pub fn average_brightness(img: &DynamicImage) -> f64 {
    let (width, height) = img.dimensions();
    let sample_height = ((height as u64 * SAMPLE_WIDTH as u64) / width as u64).max(1) as u32;
    let sampled = img
        .resize_exact(SAMPLE_WIDTH, sample_height, FilterType::Triangle)
        .to_rgb8();

    let total: f64 = sampled
        .pixels()
        .map(|p| {
            (p.0[0] as f64 * 299.0 + p.0[1] as f64 * 587.0 + p.0[2] as f64 * 114.0) / 1000.0
        })
        .sum();

    total / (SAMPLE_WIDTH as f64 * sample_height as f64)
}

/// Advisory-only quality check, run before classification. Undecodable
/// input skips the check silently: it must never block a submission.
pub fn check_quality(bytes: &[u8]) -> Option<QualityAdvisory> {
    let img = image::load_from_memory(bytes).ok()?;
    let brightness = average_brightness(&img);

    if brightness < BRIGHTNESS_THRESHOLD {
        log::debug!("Low image brightness: {:.1}", brightness);
        Some(QualityAdvisory {
            message: "Image seems dark. Results may be less accurate.".to_string(),
            brightness,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn solid_png(value: u8) -> Vec<u8> {
        let img = RgbImage::from_pixel(100, 100, Rgb([value, value, value]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn data_uri_embeds_mime_and_payload() {
        let payload = ImagePayload::new(vec![1, 2, 3], "image/png").unwrap();
        let encoded = payload.to_data_uri();

        assert_eq!(encoded.as_str(), "data:image/png;base64,AQID");
        assert_eq!(encoded.mime_type(), "image/png");
        assert_eq!(encoded.base64_data(), "AQID");
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(ImagePayload::new(vec![], "image/png").is_err());
        assert!(ImagePayload::new(vec![1], "").is_err());
    }

    #[test]
    fn parse_rejects_malformed_uris() {
        assert!(EncodedImage::parse("data:image/png;base64,AQID").is_ok());
        assert!(EncodedImage::parse("http://example.com/cow.png").is_err());
        assert!(EncodedImage::parse("data:image/png,AQID").is_err());
        assert!(EncodedImage::parse("data:;base64,AQID").is_err());
    }

    #[test]
    fn black_image_gets_a_low_quality_advisory() {
        let advisory = check_quality(&solid_png(0)).expect("black image should warn");
        assert!(advisory.brightness < BRIGHTNESS_THRESHOLD);
        assert!(advisory.message.contains("dark"));
    }

    #[test]
    fn white_image_passes_the_quality_check() {
        assert!(check_quality(&solid_png(255)).is_none());
    }

    #[test]
    fn undecodable_bytes_skip_the_check_silently() {
        assert!(check_quality(b"not an image").is_none());
    }

    #[test]
    fn brightness_scales_with_pixel_value() {
        let mid = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 200, Rgb([128, 128, 128])));
        let brightness = average_brightness(&mid);
        assert!((brightness - 128.0).abs() < 1.5);
    }
}
