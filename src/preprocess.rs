use fast_image_resize::images::Image;
use fast_image_resize::{IntoImageView, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;
use ndarray::Array4;

use crate::error::{ClassifierError, Result};

#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            height: 150,
            width: 150,
            channels: 3,
        }
    }
}

#[derive(Debug, Default)]
pub struct Processor {
    pub config: PreprocessConfig,
}

impl Processor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Preprocess one decoded image into the model's input tensor.
    ///
    /// Resizes to the configured spatial size (no cropping, no padding),
    /// scales the 8-bit channel values into [0.0, 1.0] and adds a leading
    /// batch dimension of size 1. The resampling algorithm is fixed to
    /// nearest-neighbor so the same image always yields the same tensor.
    pub fn preprocess(&self, x: &DynamicImage) -> Result<Array4<f32>> {
        let rgb = DynamicImage::ImageRgb8(x.to_rgb8());
        let pixel_type = rgb.pixel_type().ok_or_else(|| {
            ClassifierError::Inference("image has no resizable pixel type".to_string())
        })?;

        let mut dst_image = Image::new(self.config.width as u32, self.config.height as u32, pixel_type);
        let mut resizer = Resizer::new();
        let resize_options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
        resizer
            .resize(&rgb, &mut dst_image, Some(&resize_options))
            .map_err(|e| ClassifierError::Inference(format!("resize failed: {e}")))?;

        let resized: image::RgbImage = image::ImageBuffer::from_raw(
            dst_image.width(),
            dst_image.height(),
            dst_image.buffer().to_vec(),
        )
        .ok_or_else(|| {
            ClassifierError::Inference("resized buffer does not match target dimensions".to_string())
        })?;

        let mut img_arr =
            Array4::<f32>::zeros((1, self.config.height, self.config.width, self.config.channels));
        for (i, rgb) in resized.pixels().enumerate() {
            let y = i / self.config.width;
            let x = i % self.config.width;
            img_arr[[0, y, x, 0]] = rgb[0] as f32 / 255.0;
            img_arr[[0, y, x, 1]] = rgb[1] as f32 / 255.0;
            img_arr[[0, y, x, 2]] = rgb[2] as f32 / 255.0;
        }

        Ok(img_arr)
    }
}
