//! Error types for the skin tone advisor.

use thiserror::Error;

/// Message shown to the user when the selected file is not an image.
pub const INVALID_INPUT_MESSAGE: &str = "Please upload an image file";

/// Errors produced by a single upload or classification attempt.
///
/// None of these are fatal: each one is scoped to the attempt that raised it
/// and the caller may retry with another file.
#[derive(Error, Debug)]
pub enum Error {
    /// The declared media type is not `image/*`.
    #[error("Please upload an image file")]
    InvalidInput { media_type: String },

    /// The bytes could not be decoded as an image.
    #[error("unable to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    /// The sample window does not fit the image under the active policy.
    #[error("image {width}x{height} is too small for a {sample_size}x{sample_size} sample")]
    ImageTooSmall {
        width: u32,
        height: u32,
        sample_size: u32,
    },

    /// A classifier setting is out of range.
    #[error("invalid setting {name}: {reason}")]
    InvalidConfig { name: String, reason: String },
}

impl Error {
    /// Short text suitable for the widget's alert box.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput { .. } => INVALID_INPUT_MESSAGE.to_string(),
            Error::Decode { .. } => "Unable to read this image".to_string(),
            Error::ImageTooSmall { .. } => "Image is too small to analyze".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_displays_the_upload_prompt() {
        let err = Error::InvalidInput {
            media_type: "text/plain".into(),
        };
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);
        assert_eq!(err.user_message(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn too_small_reports_dimensions() {
        let err = Error::ImageTooSmall {
            width: 10,
            height: 0,
            sample_size: 50,
        };
        assert_eq!(err.to_string(), "image 10x0 is too small for a 50x50 sample");
    }
}
