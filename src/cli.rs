use std::path::PathBuf;

use clap::Parser;

use crate::fetch::ImageSource;
use crate::provider::{self, MODEL_URL};

#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// path to a local image file (JPG, PNG)
    #[arg(long, required_unless_present = "url", conflicts_with = "url")]
    pub source: Option<PathBuf>,

    /// URL of a remote image
    #[arg(long)]
    pub url: Option<String>,

    /// model artifact path; the model is downloaded here when missing
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// where to download the model artifact from
    #[arg(long, default_value_t = String::from(MODEL_URL))]
    pub model_url: String,
}

impl Args {
    pub fn image_source(&self) -> ImageSource {
        match (&self.source, &self.url) {
            (Some(path), _) => ImageSource::Path(path.clone()),
            (None, Some(url)) => ImageSource::Url(url.clone()),
            // clap enforces that exactly one of the two is present
            (None, None) => unreachable!("clap requires --source or --url"),
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.model
            .clone()
            .unwrap_or_else(provider::default_artifact_path)
    }
}
