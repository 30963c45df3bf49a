use image::DynamicImage;
use tracing::debug;

use crate::error::Result;
use crate::model::Model;
use crate::postprocess::{decide, Prediction};
use crate::preprocess::Processor;

/// End-to-end inference over one decoded RGB image: preprocess, score,
/// apply the decision rule. Holds no mutable state; with a shared model
/// handle it can serve concurrent calls.
pub struct InferenceEngine<M: Model> {
    model: M,
    processor: Processor,
}

impl<M: Model> InferenceEngine<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            processor: Processor::default(),
        }
    }

    pub fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        let xs = self.processor.preprocess(image)?;
        let p = self.model.score(&xs)?;
        debug!(score = p, "model scored image");
        Ok(decide(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::postprocess::Label;
    use ndarray::Array4;

    struct FixedScore(f32);

    impl Model for FixedScore {
        fn score(&self, _batch: &Array4<f32>) -> Result<f32> {
            Ok(self.0)
        }
    }

    struct BrokenModel;

    impl Model for BrokenModel {
        fn score(&self, _batch: &Array4<f32>) -> Result<f32> {
            Err(ClassifierError::Inference("shape mismatch".to_string()))
        }
    }

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(64, 48, image::Rgb([200, 180, 160])))
    }

    #[test]
    fn predicts_dog_above_threshold() {
        let engine = InferenceEngine::new(FixedScore(0.75));
        let pred = engine.predict(&test_image()).unwrap();
        assert_eq!(pred.label, Label::Dog);
        assert_eq!(pred.confidence, 75.0);
    }

    #[test]
    fn predicts_cat_at_threshold() {
        let engine = InferenceEngine::new(FixedScore(0.5));
        let pred = engine.predict(&test_image()).unwrap();
        assert_eq!(pred.label, Label::Cat);
        assert_eq!(pred.confidence, 50.0);
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let engine = InferenceEngine::new(FixedScore(0.9));
        let img = test_image();
        let a = engine.predict(&img).unwrap();
        let b = engine.predict(&img).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scoring_failure_propagates_as_inference_error() {
        let engine = InferenceEngine::new(BrokenModel);
        let err = engine.predict(&test_image()).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
    }
}
