//! Media payload types: palettes, bitmaps, audio clips, and fonts.

use serde::{Deserialize, Serialize};

use crate::error::PatchError;

/// RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 256-entry color lookup table.
///
/// Always holds exactly [`Palette::SIZE`] colors. Persists as a plain color
/// array; tables of any other length are rejected on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Color>", try_from = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub const SIZE: usize = 256;

    /// Builds a palette from exactly [`Self::SIZE`] colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, PatchError> {
        if colors.len() != Self::SIZE {
            return Err(PatchError::MalformedPalette {
                expected: Self::SIZE,
                actual: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    /// Linear grayscale ramp, useful as a seed table.
    pub fn grayscale() -> Self {
        let colors = (0..Self::SIZE)
            .map(|i| Color::new(i as u8, i as u8, i as u8))
            .collect();
        Self { colors }
    }

    pub fn color(&self, index: u8) -> Color {
        self.colors[index as usize]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PatchError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

/// Palette-indexed image, one byte per pixel, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBitmap {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

impl RawBitmap {
    pub fn new(width: u16, height: u16, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Uniformly filled bitmap, mostly useful for seeds and tests.
    pub fn filled(width: u16, height: u16, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// True when the pixel buffer length matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize
    }

    /// Ensures the pixel buffer matches the declared dimensions.
    pub fn ensure_well_formed(&self) -> Result<(), PatchError> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(PatchError::MalformedBitmap {
                width: self.width,
                height: self.height,
                actual: self.pixels.len(),
            })
        }
    }
}

/// Mono audio clip with 8-bit unsigned samples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub samples: Vec<u8>,
}

impl AudioClip {
    pub fn new(sample_rate: u32, samples: Vec<u8>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Clip length in seconds; zero for an empty or rate-less clip.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

impl Default for AudioClip {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            samples: Vec::new(),
        }
    }
}

/// Bitmap font: a glyph strip with per-glyph x offsets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub monochrome: bool,
    /// Character code of the first glyph in the strip.
    pub first_character: u16,
    /// Left edge of each glyph; one trailing entry closes the last glyph.
    pub glyph_x_offsets: Vec<u16>,
    pub bitmap: RawBitmap,
}

impl Font {
    /// Number of glyphs carried by the strip.
    pub fn glyph_count(&self) -> usize {
        self.glyph_x_offsets.len().saturating_sub(1)
    }
}

/// Stored sizes of a texture image.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TextureSize {
    /// 16x16 map icon.
    Icon,
    /// 32x32.
    Small,
    /// 64x64, the size tiles render at.
    #[default]
    Medium,
    /// 128x128 full-detail image.
    Large,
}

impl TextureSize {
    pub const ALL: [Self; 4] = [Self::Icon, Self::Small, Self::Medium, Self::Large];

    /// Edge length in pixels of a square image at this size.
    pub const fn pixel_size(self) -> u16 {
        match self {
            Self::Icon => 16,
            Self::Small => 32,
            Self::Medium => 64,
            Self::Large => 128,
        }
    }
}

/// Localization of text and speech assets.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Language {
    #[default]
    English,
    French,
    German,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::English, Self::French, Self::German];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_enforces_its_size() {
        assert!(Palette::new(vec![Color::default(); Palette::SIZE]).is_ok());
        assert!(Palette::new(vec![Color::default(); 16]).is_err());

        let gray = Palette::grayscale();
        assert_eq!(gray.colors().len(), Palette::SIZE);
        assert_eq!(gray.color(77), Color::new(77, 77, 77));
    }

    #[test]
    fn palette_deserialization_rechecks_the_size() {
        let full = serde_json::to_string(&Palette::grayscale()).unwrap();
        let parsed: Palette = serde_json::from_str(&full).unwrap();
        assert_eq!(parsed, Palette::grayscale());

        // A hand-edited save with a truncated table must fail the load, not
        // panic a later lookup.
        let short = serde_json::to_string(&vec![Color::default(); 16]).unwrap();
        assert!(serde_json::from_str::<Palette>(&short).is_err());
    }

    #[test]
    fn bitmap_well_formedness_matches_dimensions() {
        assert!(RawBitmap::filled(4, 3, 0).is_well_formed());

        let torn = RawBitmap::new(4, 3, vec![0; 11]);
        assert!(!torn.is_well_formed());
        assert_eq!(
            torn.ensure_well_formed(),
            Err(PatchError::MalformedBitmap {
                width: 4,
                height: 3,
                actual: 11,
            })
        );
    }

    #[test]
    fn texture_sizes_parse_and_report_pixels() {
        assert_eq!("large".parse::<TextureSize>().unwrap(), TextureSize::Large);
        assert_eq!("Icon".parse::<TextureSize>().unwrap(), TextureSize::Icon);
        assert_eq!(TextureSize::Medium.pixel_size(), 64);
        assert_eq!(TextureSize::Medium.to_string(), "medium");
    }

    #[test]
    fn font_glyph_count_ignores_the_closing_offset() {
        let font = Font {
            glyph_x_offsets: vec![0, 4, 9, 15],
            ..Font::default()
        };
        assert_eq!(font.glyph_count(), 3);
        assert_eq!(Font::default().glyph_count(), 0);
    }
}
