//! Center sampling and channel averaging.

use image::GenericImageView;
use log::debug;
use palette::Srgb;
use serde::Serialize;

use crate::config::{ClassifierConfig, SmallImagePolicy};
use crate::error::{Error, Result};
use crate::loader::DecodedImage;

/// Pixel window the classifier reads, already clamped to the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SampleRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SampleRegion {
    /// Window of side `config.sample_size` centered on `(floor(w/2), floor(h/2))`.
    ///
    /// The unclamped origin may be negative for small images; the part outside
    /// the image is cut away. An empty result is always an error, and under
    /// [`SmallImagePolicy::Reject`] so is any window that had to be cut.
    pub fn centered(width: u32, height: u32, config: &ClassifierConfig) -> Result<Self> {
        let size = config.sample_size;
        let too_small = || Error::ImageTooSmall {
            width,
            height,
            sample_size: size,
        };

        let (x, w) = clamp_span(width, size);
        let (y, h) = clamp_span(height, size);

        if w == 0 || h == 0 {
            return Err(too_small());
        }
        if config.small_image_policy == SmallImagePolicy::Reject && (w < size || h < size) {
            return Err(too_small());
        }

        Ok(Self {
            x,
            y,
            width: w,
            height: h,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Start and length of the centered span along one axis, intersected with `[0, extent)`.
fn clamp_span(extent: u32, size: u32) -> (u32, u32) {
    let start = i64::from(extent / 2) - i64::from(size / 2);
    let end = start + i64::from(size);
    let lo = start.clamp(0, i64::from(extent));
    let hi = end.clamp(0, i64::from(extent));
    // Both bounds lie in [0, extent], so they fit in u32.
    (lo as u32, (hi - lo) as u32)
}

/// Per-channel mean over a sample, truncated toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelAverage {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ChannelAverage {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Average the red, green and blue channels of `region`; alpha is ignored.
    ///
    /// Panics if `region` reaches outside `image`. Regions from
    /// [`SampleRegion::centered`] always fit.
    pub fn of_region(image: &DecodedImage, region: &SampleRegion) -> Self {
        let view = image
            .as_rgba()
            .view(region.x, region.y, region.width, region.height);

        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for (_, _, pixel) in view.pixels() {
            r += u64::from(pixel[0]);
            g += u64::from(pixel[1]);
            b += u64::from(pixel[2]);
        }

        let count = region.pixel_count().max(1);
        let average = Self {
            r: (r / count) as u8,
            g: (g / count) as u8,
            b: (b / count) as u8,
        };
        debug!("sampled {count} pixels at {region:?}: {average:?}");
        average
    }

    pub fn to_srgb(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Srgb<u8>> for ChannelAverage {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn window_is_centered_on_floor_of_half_dimensions() {
        let region = SampleRegion::centered(101, 80, &ClassifierConfig::default()).unwrap();
        assert_eq!(
            region,
            SampleRegion {
                x: 25,
                y: 15,
                width: 50,
                height: 50
            }
        );
    }

    #[test]
    fn small_images_are_clamped_by_default() {
        let region = SampleRegion::centered(20, 30, &ClassifierConfig::default()).unwrap();
        assert_eq!(
            region,
            SampleRegion {
                x: 0,
                y: 0,
                width: 20,
                height: 30
            }
        );
    }

    #[test]
    fn odd_offsets_keep_the_overlap_only() {
        // 60 wide: origin at 30 - 25 = 5, so the window covers 5..55.
        let region = SampleRegion::centered(60, 40, &ClassifierConfig::default()).unwrap();
        assert_eq!((region.x, region.width), (5, 50));
        assert_eq!((region.y, region.height), (0, 40));
    }

    #[test]
    fn empty_image_is_too_small() {
        let err = SampleRegion::centered(0, 100, &ClassifierConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ImageTooSmall { width: 0, height: 100, sample_size: 50 }));
    }

    #[test]
    fn reject_policy_refuses_partial_windows() {
        let config = ClassifierConfig {
            small_image_policy: SmallImagePolicy::Reject,
            ..Default::default()
        };
        assert!(SampleRegion::centered(49, 100, &config).is_err());
        assert!(SampleRegion::centered(50, 50, &config).is_ok());
    }

    #[test]
    fn average_ignores_alpha_and_truncates() {
        let mut buffer = RgbaImage::from_pixel(2, 1, Rgba([10, 0, 255, 0]));
        buffer.put_pixel(1, 0, Rgba([13, 1, 0, 255]));
        let image = DecodedImage::from(buffer);
        let region = SampleRegion {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
        };
        // (10 + 13) / 2 = 11.5, (0 + 1) / 2 = 0.5, 255 / 2 = 127.5
        assert_eq!(ChannelAverage::of_region(&image, &region), ChannelAverage::new(11, 0, 127));
    }

    #[test]
    fn average_only_reads_inside_the_region() {
        let mut buffer = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        for y in 25..75 {
            for x in 25..75 {
                buffer.put_pixel(x, y, Rgba([200, 120, 60, 255]));
            }
        }
        let image = DecodedImage::from(buffer);
        let region = SampleRegion::centered(100, 100, &ClassifierConfig::default()).unwrap();
        assert_eq!(ChannelAverage::of_region(&image, &region), ChannelAverage::new(200, 120, 60));
    }

    #[test]
    fn hex_is_uppercase_with_hash() {
        assert_eq!(ChannelAverage::new(255, 99, 71).to_hex(), "#FF6347");
    }
}
