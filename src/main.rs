use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catdog::{load_image, Args, InferenceEngine, ModelProvider};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let provider = ModelProvider::onnx(args.artifact_path(), args.model_url.clone());
    let model = provider.get_model()?;

    let image = load_image(&args.image_source())?;
    let engine = InferenceEngine::new(model);

    let t = std::time::Instant::now();
    let prediction = engine.predict(&image)?;
    tracing::debug!(elapsed = ?t.elapsed(), "inference finished");

    println!(
        "Label: {}, Confidence: {:.2}%",
        prediction.label, prediction.confidence
    );

    Ok(())
}
