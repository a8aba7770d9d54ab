//! Fixed clothing color suggestions for each undertone.

use palette::Srgb;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A named color shown to the user as a swatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Srgb<u8>,
}

impl Swatch {
    const fn new(name: &'static str, rgb: u32) -> Self {
        Self {
            name,
            color: Srgb::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        }
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.color.red, self.color.green, self.color.blue
        )
    }
}

impl Serialize for Swatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Swatch", 2)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("hex", &self.hex())?;
        state.end()
    }
}

pub const WARM: [Swatch; 5] = [
    Swatch::new("Earth Brown", 0x8B4513),
    Swatch::new("Coral", 0xFF7F50),
    Swatch::new("Olive Green", 0x808000),
    Swatch::new("Golden Yellow", 0xFFD700),
    Swatch::new("Warm Red", 0xFF4500),
];

pub const COOL: [Swatch; 5] = [
    Swatch::new("Navy Blue", 0x000080),
    Swatch::new("Royal Purple", 0x663399),
    Swatch::new("Emerald Green", 0x008000),
    Swatch::new("Berry Red", 0x8B0000),
    Swatch::new("Ice Blue", 0xADD8E6),
];

pub const NEUTRAL: [Swatch; 5] = [
    Swatch::new("Classic Black", 0x000000),
    Swatch::new("Pure White", 0xFFFFFF),
    Swatch::new("Gray", 0x808080),
    Swatch::new("Navy Blue", 0x000080),
    Swatch::new("Taupe", 0x483C32),
];
