use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use image::DynamicImage;
use tracing::debug;

use crate::error::{ClassifierError, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the input image comes from: a local file upload or a remote URL.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

pub(crate) fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build()
}

pub(crate) fn http_get(agent: &ureq::Agent, url: &str) -> std::result::Result<Vec<u8>, String> {
    let response = agent.get(url).call().map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}

/// Decodes raw bytes into an RGB image. Pure step: no I/O.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ClassifierError::ImageDecode(format!("invalid image bytes: {e}")))?;
    Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
}

/// Reads the source's bytes (file read or HTTP GET) and decodes them.
/// Any read, transport, or decode failure surfaces as `ImageDecode`.
pub fn load_image(source: &ImageSource) -> Result<DynamicImage> {
    let bytes = match source {
        ImageSource::Path(path) => {
            debug!(path = %path.display(), "reading image from disk");
            fs::read(path).map_err(|e| {
                ClassifierError::ImageDecode(format!("failed to read {}: {e}", path.display()))
            })?
        }
        ImageSource::Url(url) => {
            debug!(url = %url, "fetching image over http");
            http_get(&agent(), url).map_err(|e| {
                ClassifierError::ImageDecode(format!("failed to fetch {url}: {e}"))
            })?
        }
    };
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifierError::ImageDecode(_)));
    }

    #[test]
    fn decoded_images_are_rgb() {
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let source = ImageSource::Path(PathBuf::from("/no/such/image.jpg"));
        let err = load_image(&source).unwrap_err();
        assert!(matches!(err, ClassifierError::ImageDecode(_)));
    }
}
