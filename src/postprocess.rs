use std::fmt;

/// Probability above which the image is labelled as a dog. The comparison
/// is strict, so a score of exactly 0.5 falls through to `Cat`.
pub const DOG_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Dog,
    Cat,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Dog => "dog",
            Label::Cat => "cat",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one image. `confidence` is a percentage in
/// `[50.0, 100.0]` for any model score in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f32,
}

/// Maps the model's raw dog-probability to a labelled prediction.
pub fn decide(p: f32) -> Prediction {
    if p > DOG_THRESHOLD {
        Prediction {
            label: Label::Dog,
            confidence: p * 100.0,
        }
    } else {
        Prediction {
            label: Label::Cat,
            confidence: (1.0 - p) * 100.0,
        }
    }
}
