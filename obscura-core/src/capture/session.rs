//! Capture session lifecycle
//!
//! A session is the open/closed state of the destination image file. The
//! session exclusively owns the storage backend and the open handle; all
//! bytes that reach storage flow through [`CaptureSession::write`].

use heapless::String;

use crate::traits::Storage;

/// Maximum stored filename length in bytes
pub const FILENAME_CAPACITY: usize = 64;

/// Filename used when the host never sent one
pub const DEFAULT_FILENAME: &str = "IMAGE.BIN";

/// The capture session: destination file state and encode mode
///
/// State machine: `Closed --open--> Open --close--> Closed`, with both
/// transitions idempotent. There is no error state; a backend failure
/// escalates to the caller and leaves the session closed.
pub struct CaptureSession<S: Storage> {
    backend: S,
    file: Option<S::File>,
    filename: String<FILENAME_CAPACITY>,
    auto_encode: bool,
}

impl<S: Storage> CaptureSession<S> {
    /// Create a closed session over a storage backend
    ///
    /// Starts with the default filename and auto-encode off.
    pub fn new(backend: S) -> Self {
        let mut filename = String::new();
        // DEFAULT_FILENAME is within capacity by construction
        let _ = filename.push_str(DEFAULT_FILENAME);
        Self {
            backend,
            file: None,
            filename,
            auto_encode: false,
        }
    }

    /// Whether a destination file is currently open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Whether incoming data bytes are run through the pixel encoder
    pub fn auto_encode(&self) -> bool {
        self.auto_encode
    }

    /// Flip between raw passthrough and format-aware encoding
    pub fn toggle_auto_encode(&mut self) {
        self.auto_encode = !self.auto_encode;
    }

    /// The filename the next open will use
    pub fn filename(&self) -> &str {
        self.filename.as_str()
    }

    /// Borrow the storage backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Store a filename for the next open
    ///
    /// Always stored, but never retroactive: an already-open file keeps
    /// writing under the name it was opened with. Names longer than
    /// [`FILENAME_CAPACITY`] are truncated on a character boundary.
    pub fn set_filename(&mut self, name: &str) {
        let mut end = name.len().min(FILENAME_CAPACITY);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.filename.clear();
        let _ = self.filename.push_str(&name[..end]);
    }

    /// Open the stored filename for writing
    ///
    /// No-op while a file is already open. A backend failure propagates
    /// and the session stays closed.
    pub fn open(&mut self) -> Result<(), S::Error> {
        if self.file.is_some() {
            return Ok(());
        }
        let file = self.backend.open(self.filename.as_str())?;
        self.file = Some(file);
        Ok(())
    }

    /// Close the open file
    ///
    /// No-op while closed.
    pub fn close(&mut self) -> Result<(), S::Error> {
        match self.file.take() {
            Some(file) => self.backend.close(file),
            None => Ok(()),
        }
    }

    /// Append bytes to the open file
    ///
    /// Silently ignored while closed: the protocol treats stray writes as
    /// fire-and-forget, so no error is raised and storage is untouched.
    pub fn write(&mut self, data: &[u8]) -> Result<(), S::Error> {
        match self.file.as_mut() {
            Some(file) => self.backend.write(file, data),
            None => Ok(()),
        }
    }
}
