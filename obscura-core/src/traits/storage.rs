//! Storage backend trait
//!
//! The controller never talks to a filesystem directly; it consumes
//! storage through this narrow open/write/close capability. Backends are
//! expected to be SD cards or flash filesystems, but anything that can
//! append bytes to a named file qualifies.

/// Trait for the capture storage backend
///
/// `open` creates or truncates `name` for writing. File handles are
/// opaque to the controller; exactly one is held at a time.
pub trait Storage {
    /// Handle for an open file
    type File;

    /// Error type for backend operations
    type Error;

    /// Create or truncate `name` and open it for writing
    fn open(&mut self, name: &str) -> Result<Self::File, Self::Error>;

    /// Append bytes to an open file
    fn write(&mut self, file: &mut Self::File, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush and close an open file
    fn close(&mut self, file: Self::File) -> Result<(), Self::Error>;
}
