//! Board configuration for the reference Pico build
//!
//! Pin assignments live at the init sites in `main`; this module holds
//! the tunables that differ between rigs.

use obscura_protocol::{ColorFormat, Metadata, Resolution};

/// Host command link baud rate
pub const LINK_BAUD: u32 = 115_200;

/// SPI clock for the SD card
pub const SD_SPI_HZ: u32 = 12_000_000;

/// Sample interpretation at boot, matched to the sensor configuration
///
/// The wire protocol can only reselect greyscale at runtime (see
/// [`Metadata::to_wire`]), so color rigs configure their format here.
pub const BOOT_METADATA: Metadata = Metadata {
    resolution: Resolution::Qqvga,
    color: ColorFormat::Greyscale,
};
