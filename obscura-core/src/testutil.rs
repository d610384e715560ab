//! Shared mock implementations for unit tests

use heapless::{String, Vec};

use crate::traits::{Indicator, Storage};

/// Error type for the mock backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockStorageError;

/// In-memory storage backend recording every interaction
pub(crate) struct MockStorage {
    /// Bytes written to the open file; cleared on open (truncate semantics)
    pub data: Vec<u8, 1024>,
    /// Names passed to open, in order
    pub opened_names: Vec<String<64>, 4>,
    pub open_calls: u32,
    pub close_calls: u32,
    pub fail_open: bool,
    pub fail_write: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            opened_names: Vec::new(),
            open_calls: 0,
            close_calls: 0,
            fail_open: false,
            fail_write: false,
        }
    }
}

impl Storage for MockStorage {
    type File = ();
    type Error = MockStorageError;

    fn open(&mut self, name: &str) -> Result<(), MockStorageError> {
        if self.fail_open {
            return Err(MockStorageError);
        }
        self.open_calls += 1;
        let mut stored = String::new();
        let _ = stored.push_str(name);
        let _ = self.opened_names.push(stored);
        self.data.clear();
        Ok(())
    }

    fn write(&mut self, _file: &mut (), data: &[u8]) -> Result<(), MockStorageError> {
        if self.fail_write {
            return Err(MockStorageError);
        }
        let _ = self.data.extend_from_slice(data);
        Ok(())
    }

    fn close(&mut self, _file: ()) -> Result<(), MockStorageError> {
        self.close_calls += 1;
        Ok(())
    }
}

/// Mock status indicator
pub(crate) struct MockIndicator {
    pub on: bool,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self { on: false }
    }
}

impl Indicator for MockIndicator {
    fn set(&mut self, on: bool) {
        self.on = on;
    }
}
