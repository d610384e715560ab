//! Command dispatch state machine
//!
//! The controller consumes the raw byte stream of the capture link and
//! turns it into session and storage operations. Bytes arrive one at a
//! time through [`Controller::feed`]; pairing into `[kind][payload]`
//! records, filename accumulation, and the two-byte color rendezvous are
//! all states of the same machine, so there is never more than one
//! consumer of the link.
//!
//! # The color rendezvous
//!
//! A packed 5-6-5 pixel needs two `WriteByte` commands. After the high
//! byte, the controller waits for the next `WriteByte` pair and discards
//! every other pair that arrives in between - discarded, not queued, and
//! a discarded `SetFileName` pair leaves its trailing name bytes to be
//! misread as pairs, exactly as a raw two-byte wait would. There is no
//! timeout: a host that never sends the low byte stalls the capture path
//! until reset. Embeddings should watch [`Controller::is_awaiting_low_byte`]
//! and [`LinkStats::discarded_pairs`] to make such a stall visible.

use heapless::Vec;

use obscura_protocol::{ColorFormat, CommandKind, Metadata, FILENAME_DELIMITER};

use crate::capture::{bmp_header, greyscale_to_rgb, CaptureSession, Rgb565, FILENAME_CAPACITY};
use crate::traits::{CommandLink, Indicator, Storage};

/// Errors escaping the dispatch loop
///
/// Anything the protocol defines as ignorable never reaches this type;
/// only backend failures and (from [`Controller::run`]) link failures do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError<L, S> {
    /// The command link failed
    Link(L),
    /// The storage backend failed
    Storage(S),
}

/// Saturating diagnostic counters for the command link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Recognized command pairs dispatched
    pub commands: u32,
    /// Pairs with an unknown kind byte, consumed and ignored
    pub unknown_commands: u32,
    /// Pairs discarded while waiting for a color low byte
    pub discarded_pairs: u32,
    /// Metadata bytes rejected by the decoder
    pub metadata_rejected: u32,
    /// Data bytes consumed by a format with no transform
    pub unsupported_samples: u32,
    /// Data bytes dropped because no file was open
    pub writes_while_closed: u32,
}

/// Byte-level dispatch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState {
    /// Waiting for a kind byte
    AwaitKind,
    /// Got a kind byte, waiting for its payload
    AwaitPayload { kind: u8 },
    /// Accumulating a filename up to the delimiter
    ReadingFilename,
    /// Rendezvous: holding a color high byte, waiting for a kind byte
    AwaitLowKind { high: u8 },
    /// Rendezvous: holding a color high byte, waiting for a payload
    AwaitLowPayload { high: u8, kind: u8 },
}

/// The capture controller
///
/// Owns the session (and through it the storage backend), the active
/// metadata, and the status indicator. Feed it link bytes and it does
/// the rest.
pub struct Controller<S: Storage, I: Indicator> {
    session: CaptureSession<S>,
    metadata: Metadata,
    indicator: I,
    state: DispatchState,
    name_buf: Vec<u8, FILENAME_CAPACITY>,
    stats: LinkStats,
}

impl<S: Storage, I: Indicator> Controller<S, I> {
    /// Create a controller with default metadata (QQVGA greyscale)
    pub fn new(backend: S, indicator: I) -> Self {
        Self::with_metadata(backend, indicator, Metadata::default())
    }

    /// Create a controller with boot-time metadata
    ///
    /// The wire cannot express every metadata value (see
    /// [`Metadata::to_wire`]), so deployments that capture packed color
    /// configure it here, matched to the sensor configuration.
    pub fn with_metadata(backend: S, indicator: I, metadata: Metadata) -> Self {
        Self {
            session: CaptureSession::new(backend),
            metadata,
            indicator,
            state: DispatchState::AwaitKind,
            name_buf: Vec::new(),
            stats: LinkStats::default(),
        }
    }

    /// The active capture metadata
    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    /// Link diagnostic counters
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Borrow the capture session
    pub fn session(&self) -> &CaptureSession<S> {
        &self.session
    }

    /// Borrow the status indicator
    ///
    /// Lets the embedding latch the indicator on after a fatal error.
    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    /// True while the controller holds a color high byte and waits for
    /// the matching `WriteByte` pair
    pub fn is_awaiting_low_byte(&self) -> bool {
        matches!(
            self.state,
            DispatchState::AwaitLowKind { .. } | DispatchState::AwaitLowPayload { .. }
        )
    }

    /// Consume one link byte
    ///
    /// Never blocks. Returns a storage failure if one occurred; every
    /// protocol-level oddity is consumed silently (and counted).
    pub fn feed(&mut self, byte: u8) -> Result<(), S::Error> {
        match self.state {
            DispatchState::AwaitKind => {
                self.state = DispatchState::AwaitPayload { kind: byte };
                Ok(())
            }
            DispatchState::AwaitPayload { kind } => {
                self.state = DispatchState::AwaitKind;
                self.dispatch(kind, byte)
            }
            DispatchState::ReadingFilename => {
                if byte == FILENAME_DELIMITER {
                    self.finish_filename();
                    self.state = DispatchState::AwaitKind;
                } else {
                    // Overflow beyond capacity is dropped but consumed,
                    // keeping the stream in sync
                    let _ = self.name_buf.push(byte);
                }
                Ok(())
            }
            DispatchState::AwaitLowKind { high } => {
                self.state = DispatchState::AwaitLowPayload { high, kind: byte };
                Ok(())
            }
            DispatchState::AwaitLowPayload { high, kind } => {
                if CommandKind::from_byte(kind) == Some(CommandKind::WriteByte) {
                    self.state = DispatchState::AwaitKind;
                    let pixel = Rgb565::from_bytes(high, byte).to_rgb();
                    self.session.write(&pixel)
                } else {
                    self.state = DispatchState::AwaitLowKind { high };
                    self.stats.discarded_pairs = self.stats.discarded_pairs.saturating_add(1);
                    Ok(())
                }
            }
        }
    }

    /// Feed a run of link bytes
    pub fn feed_all(&mut self, bytes: &[u8]) -> Result<(), S::Error> {
        for &byte in bytes {
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Blocking dispatch pump
    ///
    /// Pulls bytes from the link forever; returns only on a link or
    /// storage failure. This is the device's single cooperative thread
    /// of control - nothing else runs between commands.
    pub fn run<L: CommandLink>(
        &mut self,
        link: &mut L,
    ) -> Result<(), ControllerError<L::Error, S::Error>> {
        loop {
            let byte = link.read_byte().map_err(ControllerError::Link)?;
            self.feed(byte).map_err(ControllerError::Storage)?;
        }
    }

    /// Route one complete command pair
    fn dispatch(&mut self, kind: u8, payload: u8) -> Result<(), S::Error> {
        let Some(kind) = CommandKind::from_byte(kind) else {
            self.stats.unknown_commands = self.stats.unknown_commands.saturating_add(1);
            return Ok(());
        };
        self.stats.commands = self.stats.commands.saturating_add(1);

        match kind {
            CommandKind::SetFileName => {
                // Payload is filler; the name follows as its own record
                self.name_buf.clear();
                self.state = DispatchState::ReadingFilename;
                Ok(())
            }
            CommandKind::OpenFile => self.session.open(),
            CommandKind::CloseFile => self.session.close(),
            CommandKind::WriteByte => self.handle_sample(payload),
            CommandKind::AutoEncode => {
                self.session.toggle_auto_encode();
                Ok(())
            }
            CommandKind::MetadataByte => self.handle_metadata(payload),
            CommandKind::LedOn => {
                self.indicator.set(true);
                Ok(())
            }
            CommandKind::LedOff => {
                self.indicator.set(false);
                Ok(())
            }
        }
    }

    /// Handle the data byte of a `WriteByte` pair
    fn handle_sample(&mut self, data: u8) -> Result<(), S::Error> {
        if !self.session.is_open() {
            self.stats.writes_while_closed = self.stats.writes_while_closed.saturating_add(1);
            return Ok(());
        }
        if !self.session.auto_encode() {
            return self.session.write(&[data]);
        }
        match self.metadata.color {
            ColorFormat::Greyscale => self.session.write(&greyscale_to_rgb(data)),
            ColorFormat::Rgb => {
                self.state = DispatchState::AwaitLowKind { high: data };
                Ok(())
            }
            ColorFormat::Bayer => {
                self.stats.unsupported_samples =
                    self.stats.unsupported_samples.saturating_add(1);
                Ok(())
            }
        }
    }

    /// Handle the payload of a `MetadataByte` pair
    fn handle_metadata(&mut self, byte: u8) -> Result<(), S::Error> {
        match Metadata::decode(byte) {
            Ok(metadata) => {
                self.metadata = metadata;
                if self.session.is_open() {
                    // Mid-capture changes re-emit the header; nothing is
                    // rewound or validated against bytes already written
                    self.session.write(bmp_header(metadata.resolution))?;
                }
                Ok(())
            }
            Err(_) => {
                self.stats.metadata_rejected = self.stats.metadata_rejected.saturating_add(1);
                Ok(())
            }
        }
    }

    /// Store the accumulated filename, if it is valid UTF-8
    fn finish_filename(&mut self) {
        if let Ok(name) = core::str::from_utf8(&self.name_buf) {
            self.session.set_filename(name);
        }
        self.name_buf.clear();
    }
}
