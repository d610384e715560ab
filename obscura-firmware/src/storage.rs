//! SD card storage backend
//!
//! Adapts `embedded-sdmmc` raw handles to the core storage trait. Every
//! capture lands in the root directory of the first FAT volume; 8.3
//! filename rules apply.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::{
    Mode, RawDirectory, RawFile, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx,
    VolumeManager,
};

use obscura_core::traits::Storage;

/// SPI device the SD card hangs off
pub type SdSpiDevice = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;

type Card = SdCard<SdSpiDevice, Delay>;

/// Errors from the SD backend
pub type SdError = embedded_sdmmc::Error<SdCardError>;

/// No RTC on the board: every capture gets the same fixed stamp
struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 54,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// Storage backend over the first FAT volume of an SPI SD card
pub struct SdStorage {
    volume_mgr: VolumeManager<Card, FixedTimeSource>,
    root: RawDirectory,
}

impl SdStorage {
    /// Probe the card and open the root directory
    ///
    /// Failure here is fatal to the device; the caller halts with the
    /// indicator latched rather than run without storage.
    pub fn new(spi: SdSpiDevice) -> Result<Self, SdError> {
        let card = SdCard::new(spi, Delay);
        let mut volume_mgr = VolumeManager::new(card, FixedTimeSource);
        let volume = volume_mgr.open_raw_volume(VolumeIdx(0))?;
        let root = volume_mgr.open_root_dir(volume)?;
        Ok(Self { volume_mgr, root })
    }
}

impl Storage for SdStorage {
    type File = RawFile;
    type Error = SdError;

    fn open(&mut self, name: &str) -> Result<RawFile, SdError> {
        self.volume_mgr
            .open_file_in_dir(self.root, name, Mode::ReadWriteCreateOrTruncate)
    }

    fn write(&mut self, file: &mut RawFile, data: &[u8]) -> Result<(), SdError> {
        self.volume_mgr.write(*file, data)
    }

    fn close(&mut self, file: RawFile) -> Result<(), SdError> {
        self.volume_mgr.close_file(file)
    }
}
