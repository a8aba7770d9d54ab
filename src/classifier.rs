//! Undertone classification from a center sample.
//!
//! The warmth score compares the averaged red and blue channels:
//!
//! ```text
//! warmth = (r - b) / ((r + b) / 2)
//! ```
//!
//! Scores above the threshold are warm, below its negation cool, and anything
//! in between neutral. A sample with `r + b == 0` scores 0.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::loader::DecodedImage;
use crate::sampling::{ChannelAverage, SampleRegion};
use crate::swatches::{self, Swatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UndertoneLabel {
    Warm,
    Cool,
    Neutral,
}

impl UndertoneLabel {
    pub const ALL: [UndertoneLabel; 3] = [Self::Warm, Self::Cool, Self::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Neutral => "neutral",
        }
    }

    /// Heading shown above the suggested colors.
    pub fn title(self) -> &'static str {
        match self {
            Self::Warm => "Warm Undertone",
            Self::Cool => "Cool Undertone",
            Self::Neutral => "Neutral Undertone",
        }
    }

    /// The five suggested colors for this undertone, in display order.
    pub fn palette(self) -> &'static [Swatch] {
        match self {
            Self::Warm => &swatches::WARM,
            Self::Cool => &swatches::COOL,
            Self::Neutral => &swatches::NEUTRAL,
        }
    }

    /// Bucket a warmth score.
    pub fn from_warmth(warmth: f64, threshold: f64) -> Self {
        if warmth > threshold {
            Self::Warm
        } else if warmth < -threshold {
            Self::Cool
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for UndertoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Red-versus-blue balance of an averaged sample. Zero when both channels are zero.
pub fn warmth(average: ChannelAverage) -> f64 {
    let r = f64::from(average.r);
    let b = f64::from(average.b);
    let mean = (r + b) / 2.0;
    if mean == 0.0 {
        return 0.0;
    }
    (r - b) / mean
}

/// Outcome of classifying one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub label: UndertoneLabel,
    pub title: &'static str,
    pub palette: &'static [Swatch],
    pub warmth: f64,
    pub average: ChannelAverage,
    pub region: SampleRegion,
}

impl Classification {
    /// Classify an already averaged sample taken from `region`.
    pub fn from_average(
        average: ChannelAverage,
        region: SampleRegion,
        config: &ClassifierConfig,
    ) -> Self {
        let warmth = warmth(average);
        let label = UndertoneLabel::from_warmth(warmth, config.warmth_threshold);
        debug!("warmth {warmth:.3} -> {label}");
        Self {
            label,
            title: label.title(),
            palette: label.palette(),
            warmth,
            average,
            region,
        }
    }
}

/// Classify with the default settings.
pub fn classify(image: &DecodedImage) -> Result<Classification> {
    classify_with(image, &ClassifierConfig::default())
}

/// Sample the center of `image`, average it and bucket the warmth score.
pub fn classify_with(image: &DecodedImage, config: &ClassifierConfig) -> Result<Classification> {
    config.validate()?;
    let (width, height) = image.dimensions();
    let region = SampleRegion::centered(width, height, config)?;
    let average = ChannelAverage::of_region(image, &region);
    Ok(Classification::from_average(average, region, config))
}
