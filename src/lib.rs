//! Skin tone color advisor.
//!
//! Samples a small square from the middle of an uploaded photo, scores how far
//! the averaged red channel leans over the blue one, and maps that score to a
//! warm, cool or neutral undertone with a fixed set of suggested clothing
//! colors. The same pipeline backs the browser widget (see `wasm`) and the
//! `advise-cli` binary.

pub mod classifier;
pub mod config;
pub mod error;
pub mod loader;
pub mod sampling;
pub mod swatches;
pub mod widget;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use classifier::{Classification, UndertoneLabel, classify, classify_with, warmth};
pub use config::{ClassifierConfig, SmallImagePolicy};
pub use error::{Error, Result};
pub use loader::{DecodedImage, ImageFile, load, media_type_for_path};
pub use sampling::{ChannelAverage, SampleRegion};
pub use swatches::Swatch;
pub use widget::{AdvisorWidget, Completion, Preview, UploadTicket, WidgetState};

/// Validate, decode and classify a file in one call.
pub fn analyze_bytes(
    media_type: &str,
    bytes: Vec<u8>,
    config: &ClassifierConfig,
) -> Result<Classification> {
    let file = ImageFile::new(media_type, bytes);
    let image = load(&file)?;
    classify_with(&image, config)
}
