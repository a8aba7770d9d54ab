//! Image loading: media type validation and decoding into an RGBA buffer.

use std::io::Cursor;
use std::path::Path;

use image::{GenericImageView, ImageFormat, ImageReader, RgbaImage};
use log::debug;

use crate::error::{Error, Result};

/// Media type used when nothing better is known about a file.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// A user-selected file: what it claims to be and what it contains.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Row-major RGBA8 pixels with their dimensions. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    buffer: RgbaImage,
}

impl DecodedImage {
    /// Build from raw RGBA bytes; `None` if the length does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).map(|buffer| Self { buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// The `[r, g, b, a]` value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.buffer
    }
}

impl From<RgbaImage> for DecodedImage {
    fn from(buffer: RgbaImage) -> Self {
        Self { buffer }
    }
}

/// True when `media_type` names any `image/*` type. Parameters and case are ignored.
pub fn is_image_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Media type implied by a path's extension, or [`UNKNOWN_MEDIA_TYPE`].
pub fn media_type_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// Validate and decode an uploaded file.
///
/// The media type is checked before the bytes are touched. The container
/// format is sniffed from the content, falling back to the declared media type
/// when the content is not recognized.
pub fn load(file: &ImageFile) -> Result<DecodedImage> {
    if !is_image_media_type(&file.media_type) {
        return Err(Error::InvalidInput {
            media_type: file.media_type.clone(),
        });
    }

    let mut reader = ImageReader::new(Cursor::new(file.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| Error::Decode { source: e.into() })?;

    if reader.format().is_none() {
        let essence = file.media_type.split(';').next().unwrap_or_default().trim();
        if let Some(format) = ImageFormat::from_mime_type(essence.to_ascii_lowercase()) {
            reader.set_format(format);
        }
    }

    let decoded = reader.decode().map_err(|source| Error::Decode { source })?;
    let (width, height) = decoded.dimensions();
    debug!("decoded {} as {width}x{height}", file.media_type);

    Ok(DecodedImage::from(decoded.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn media_type_check_accepts_any_image_subtype() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("IMAGE/JPEG"));
        assert!(is_image_media_type("image/webp; q=0.9"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type("imag"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn text_plain_is_rejected_before_decoding() {
        // Valid PNG bytes: the media type alone must decide.
        let file = ImageFile::new("text/plain", png_bytes(4, 4, [1, 2, 3, 255]));
        match load(&file) {
            Err(Error::InvalidInput { media_type }) => assert_eq!(media_type, "text/plain"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn png_decodes_to_rgba_pixels() {
        let file = ImageFile::new("image/png", png_bytes(3, 2, [10, 20, 30, 40]));
        let img = load(&file).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 40]);
    }

    #[test]
    fn mislabelled_subtype_still_decodes_by_content() {
        let file = ImageFile::new("image/jpeg", png_bytes(2, 2, [0, 0, 0, 255]));
        assert!(load(&file).is_ok());
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let file = ImageFile::new("image/png", b"definitely not a png".to_vec());
        assert!(matches!(load(&file), Err(Error::Decode { .. })));
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for_path(Path::new("face.PNG")), "image/png");
        assert_eq!(media_type_for_path(Path::new("face.jpg")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("notes.txt")), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn from_rgba_checks_buffer_length() {
        assert!(DecodedImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(DecodedImage::from_rgba(2, 2, vec![0; 15]).is_none());
    }
}
