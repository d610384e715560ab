//! Host-side command sender
//!
//! Builds the exact byte sequences the controller expects and pushes them
//! into any [`embedded_io::Write`] sink - a UART on the camera module, or
//! a buffer in tests and simulations.

use embedded_io::Write;

use crate::command::{CommandKind, FILENAME_DELIMITER, FILLER_BYTE};
use crate::metadata::Metadata;

/// Encoder for the sending half of the capture link
///
/// Every method maps to one controller action. Errors from the underlying
/// sink propagate unchanged; the protocol itself cannot fail.
pub struct CommandSender<W> {
    link: W,
}

impl<W: Write> CommandSender<W> {
    /// Wrap a byte sink
    pub fn new(link: W) -> Self {
        Self { link }
    }

    /// Consume the sender and return the sink
    pub fn release(self) -> W {
        self.link
    }

    fn pair(&mut self, kind: CommandKind, payload: u8) -> Result<(), W::Error> {
        self.link.write_all(&[kind.to_byte(), payload])
    }

    /// Store `name` on the controller and open it for writing
    ///
    /// Emits the name record followed by the open command, so the file is
    /// ready for data as soon as this returns.
    pub fn create_file(&mut self, name: &str) -> Result<(), W::Error> {
        self.pair(CommandKind::SetFileName, FILLER_BYTE)?;
        self.link.write_all(name.as_bytes())?;
        self.link.write_all(&[FILENAME_DELIMITER])?;
        self.pair(CommandKind::OpenFile, FILLER_BYTE)
    }

    /// Close the open file
    pub fn close_file(&mut self) -> Result<(), W::Error> {
        self.pair(CommandKind::CloseFile, FILLER_BYTE)
    }

    /// Send one data byte
    pub fn write_byte(&mut self, data: u8) -> Result<(), W::Error> {
        self.pair(CommandKind::WriteByte, data)
    }

    /// Send a run of data bytes, one command pair per byte
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), W::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Flip the controller between passthrough and encoding mode
    pub fn toggle_auto_encode(&mut self) -> Result<(), W::Error> {
        self.pair(CommandKind::AutoEncode, FILLER_BYTE)
    }

    /// Announce the capture metadata
    ///
    /// Triggers a bitmap header write on the controller when a file is
    /// open. See [`Metadata::to_wire`] for the field layout caveat.
    pub fn set_metadata(&mut self, metadata: Metadata) -> Result<(), W::Error> {
        self.pair(CommandKind::MetadataByte, metadata.to_wire())
    }

    /// Turn the controller's status indicator on
    pub fn led_on(&mut self) -> Result<(), W::Error> {
        self.pair(CommandKind::LedOn, FILLER_BYTE)
    }

    /// Turn the controller's status indicator off
    pub fn led_off(&mut self) -> Result<(), W::Error> {
        self.pair(CommandKind::LedOff, FILLER_BYTE)
    }
}
