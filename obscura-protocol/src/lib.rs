//! Capture-Link Wire Protocol
//!
//! This crate defines the UART-based protocol between a host (typically the
//! camera module) and the Obscura capture controller. The protocol is designed
//! for minimal footprint on the sending side: no framing bytes, no checksums,
//! no acknowledgements.
//!
//! # Protocol Overview
//!
//! Every command is an atomic two-byte record:
//! ```text
//! ┌──────┬─────────┐
//! │ KIND │ PAYLOAD │
//! │ 1B   │ 1B      │
//! └──────┴─────────┘
//! ```
//!
//! The payload byte's meaning depends on the kind; commands that carry no
//! data use a filler byte. A `SetFileName` record is followed by a
//! newline-terminated name string. There is no response channel - the
//! controller ignores anything it does not recognize.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod metadata;
pub mod sender;

pub use command::{CommandKind, FILENAME_DELIMITER, FILLER_BYTE};
pub use metadata::{ColorFormat, Metadata, MetadataError, Resolution};
pub use sender::CommandSender;
