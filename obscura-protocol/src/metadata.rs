//! Packed capture metadata
//!
//! A single wire byte selects both the frame resolution and the color
//! format of subsequent samples:
//!
//! ```text
//! ┌───┬───┬─────────┬────────────┐
//! │ 7 │ 6 │ 5  4  3 │ 2  1  0    │
//! │ - │ - │ color   │ resolution │
//! └───┴───┴─────────┴────────────┘
//! ```
//!
//! Both fields carry their enum ordinal pre-multiplied by two; the
//! receiving side divides the *masked* byte by two to recover the
//! ordinal. Because the color field is not shifted down before the
//! division, only ordinal zero (greyscale) survives the trip - anything
//! else decodes out of range and is rejected. This asymmetry is part of
//! the deployed wire format and is preserved here; see
//! [`Metadata::to_wire`].

/// Bits of the packed byte holding the resolution field
pub const RESOLUTION_MASK: u8 = 0b0000_0111;

/// Bits of the packed byte holding the color format field
pub const COLOR_MASK: u8 = 0b0011_1000;

/// Frame resolutions the controller can label a capture with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 640 x 480
    Vga,
    /// 320 x 240
    Qvga,
    /// 160 x 120
    Qqvga,
}

impl Resolution {
    /// Parse from the decoded ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Resolution::Vga),
            1 => Some(Resolution::Qvga),
            2 => Some(Resolution::Qqvga),
            _ => None,
        }
    }

    /// Ordinal used on the wire (before the x2 field encoding)
    pub fn ordinal(self) -> u8 {
        match self {
            Resolution::Vga => 0,
            Resolution::Qvga => 1,
            Resolution::Qqvga => 2,
        }
    }

    /// Frame dimensions in pixels, width then height
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            Resolution::Vga => (640, 480),
            Resolution::Qvga => (320, 240),
            Resolution::Qqvga => (160, 120),
        }
    }

    /// Total pixels per frame
    pub fn pixel_count(self) -> u32 {
        let (w, h) = self.dimensions();
        w as u32 * h as u32
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Qqvga
    }
}

/// Sample formats the controller can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorFormat {
    /// One intensity byte per pixel
    Greyscale,
    /// Two bytes per pixel, packed 5-6-5, high byte first
    Rgb,
    /// One raw filter-mosaic byte per pixel; no decode path exists
    Bayer,
}

impl ColorFormat {
    /// Parse from the decoded ordinal
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(ColorFormat::Greyscale),
            1 => Some(ColorFormat::Rgb),
            2 => Some(ColorFormat::Bayer),
            _ => None,
        }
    }

    /// Ordinal used on the wire (before the x2 field encoding)
    pub fn ordinal(self) -> u8 {
        match self {
            ColorFormat::Greyscale => 0,
            ColorFormat::Rgb => 1,
            ColorFormat::Bayer => 2,
        }
    }

    /// Wire bytes consumed per pixel sample
    pub fn bytes_per_sample(self) -> usize {
        match self {
            ColorFormat::Greyscale | ColorFormat::Bayer => 1,
            ColorFormat::Rgb => 2,
        }
    }
}

impl Default for ColorFormat {
    fn default() -> Self {
        ColorFormat::Greyscale
    }
}

/// Errors produced when decoding a packed metadata byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetadataError {
    /// Resolution field decoded to an ordinal with no variant
    ResolutionOutOfRange,
    /// Color field decoded to an ordinal with no variant
    ColorOutOfRange,
}

/// Active capture metadata: what the incoming samples mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Metadata {
    pub resolution: Resolution,
    pub color: ColorFormat,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            resolution: Resolution::Qqvga,
            color: ColorFormat::Greyscale,
        }
    }
}

impl Metadata {
    /// Decode a packed metadata byte
    ///
    /// Field recovery is `(byte & mask) / 2` with integer division, over
    /// the masked byte and not the shifted field. Ordinals outside the
    /// enum ranges are rejected; decoding never panics for any input.
    pub fn decode(byte: u8) -> Result<Self, MetadataError> {
        let resolution_raw = (byte & RESOLUTION_MASK) / 2;
        let color_raw = (byte & COLOR_MASK) / 2;

        let resolution = Resolution::from_ordinal(resolution_raw)
            .ok_or(MetadataError::ResolutionOutOfRange)?;
        let color =
            ColorFormat::from_ordinal(color_raw).ok_or(MetadataError::ColorOutOfRange)?;

        Ok(Self { resolution, color })
    }

    /// Encode into the packed wire byte
    ///
    /// Each ordinal is doubled and placed in its bit field. Note that the
    /// receiving side divides the masked byte without shifting the color
    /// field down first, so only greyscale metadata round-trips; bytes
    /// produced for other color formats decode to
    /// [`MetadataError::ColorOutOfRange`].
    pub fn to_wire(self) -> u8 {
        (self.resolution.ordinal() * 2) | ((self.color.ordinal() * 2) << 3)
    }
}
