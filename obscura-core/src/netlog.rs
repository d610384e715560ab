//! Network diagnostic logger
//!
//! An optional text/byte sink over an already-connected network transport
//! (establishing the connection is the embedding's job). The capture path
//! never depends on it; it exists so a bench host can watch the device
//! without occupying the command link.
//!
//! Receive operations poll the transport under a fixed timeout that
//! restarts on every byte received, then return whatever arrived - the
//! remote side going quiet is data, not an error.

use embedded_io::{Read, ReadReady, Write};
use heapless::String;

/// Receive timeout in milliseconds
pub const READ_TIMEOUT_MS: u64 = 3000;

/// Milliseconds-since-boot clock
///
/// Must be monotonic; wrapping within a session is not handled.
pub trait Monotonic {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Errors from logger operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogError<E> {
    /// The logger was closed, or never had a transport
    Disconnected,
    /// The transport failed
    Transport(E),
}

/// Diagnostic logger over a byte transport
///
/// Wraps the transport together with a clock for receive timeouts. After
/// [`close`](NetLogger::close) every operation reports
/// [`LogError::Disconnected`].
pub struct NetLogger<T, C> {
    transport: Option<T>,
    clock: C,
}

impl<T, C> NetLogger<T, C>
where
    T: Read + ReadReady + Write,
    C: Monotonic,
{
    /// Wrap a connected transport
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport: Some(transport),
            clock,
        }
    }

    /// Whether a transport is still attached
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Send raw bytes
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), LogError<T::Error>> {
        let transport = self.transport.as_mut().ok_or(LogError::Disconnected)?;
        transport.write_all(bytes).map_err(LogError::Transport)
    }

    /// Send a single byte
    pub fn write_byte(&mut self, byte: u8) -> Result<(), LogError<T::Error>> {
        self.write(&[byte])
    }

    /// Send a string
    pub fn print(&mut self, text: &str) -> Result<(), LogError<T::Error>> {
        self.write(text.as_bytes())
    }

    /// Send a string followed by a newline
    pub fn println(&mut self, text: &str) -> Result<(), LogError<T::Error>> {
        self.print(text)?;
        self.write_byte(b'\n')
    }

    /// Receive bytes until the buffer fills or the timeout expires
    ///
    /// Returns the number of bytes received, possibly zero. The timeout
    /// restarts on every byte, so a slow-but-steady sender is never cut
    /// off mid-message.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, LogError<T::Error>> {
        let transport = self.transport.as_mut().ok_or(LogError::Disconnected)?;
        let mut count = 0;
        let mut window_start = self.clock.now_ms();

        while count < buf.len() {
            if self.clock.now_ms().saturating_sub(window_start) >= READ_TIMEOUT_MS {
                break;
            }
            if transport.read_ready().map_err(LogError::Transport)? {
                let n = transport
                    .read(&mut buf[count..count + 1])
                    .map_err(LogError::Transport)?;
                if n == 0 {
                    break;
                }
                count += n;
                window_start = self.clock.now_ms();
            }
        }

        Ok(count)
    }

    /// Receive a string up to (and not including) `delimiter`
    ///
    /// Stops at the delimiter or on timeout. Bytes beyond the string's
    /// capacity are dropped but still consumed.
    pub fn read_string_until<const N: usize>(
        &mut self,
        delimiter: u8,
        out: &mut String<N>,
    ) -> Result<(), LogError<T::Error>> {
        let transport = self.transport.as_mut().ok_or(LogError::Disconnected)?;
        let mut window_start = self.clock.now_ms();

        loop {
            if self.clock.now_ms().saturating_sub(window_start) >= READ_TIMEOUT_MS {
                return Ok(());
            }
            if transport.read_ready().map_err(LogError::Transport)? {
                let mut byte = [0u8; 1];
                let n = transport.read(&mut byte).map_err(LogError::Transport)?;
                if n == 0 {
                    return Ok(());
                }
                if byte[0] == delimiter {
                    return Ok(());
                }
                let _ = out.push(byte[0] as char);
                window_start = self.clock.now_ms();
            }
        }
    }

    /// Flush and detach the transport
    ///
    /// Transport errors during the final flush are ignored, matching the
    /// fire-and-forget character of the sink.
    pub fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            let _ = transport.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    /// Clock advancing a fixed step on every query
    struct StepClock {
        now: Cell<u64>,
        step: u64,
    }

    impl StepClock {
        fn new(step: u64) -> Self {
            Self {
                now: Cell::new(0),
                step,
            }
        }
    }

    impl Monotonic for StepClock {
        fn now_ms(&self) -> u64 {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }
    }

    /// Transport with scripted receive bytes and a capture buffer
    struct MockTransport {
        rx: heapless::Vec<u8, 64>,
        rx_pos: usize,
        tx: heapless::Vec<u8, 64>,
    }

    impl MockTransport {
        fn new(rx: &[u8]) -> Self {
            let mut queued = heapless::Vec::new();
            queued.extend_from_slice(rx).unwrap();
            Self {
                rx: queued,
                rx_pos: 0,
                tx: heapless::Vec::new(),
            }
        }
    }

    impl embedded_io::ErrorType for MockTransport {
        type Error = Infallible;
    }

    impl Read for MockTransport {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.rx_pos >= self.rx.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.rx[self.rx_pos];
            self.rx_pos += 1;
            Ok(1)
        }
    }

    impl ReadReady for MockTransport {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(self.rx_pos < self.rx.len())
        }
    }

    impl Write for MockTransport {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let _ = self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_println_appends_newline() {
        let mut logger = NetLogger::new(MockTransport::new(&[]), StepClock::new(1));
        logger.println("boot ok").unwrap();

        let transport = logger.transport.as_ref().unwrap();
        assert_eq!(transport.tx.as_slice(), b"boot ok\n");
    }

    #[test]
    fn test_read_drains_available_bytes() {
        let mut logger = NetLogger::new(MockTransport::new(b"pong"), StepClock::new(1));
        let mut buf = [0u8; 16];
        let n = logger.read(&mut buf).unwrap();

        assert_eq!(n, 4);
        assert_eq!(&buf[..4], b"pong");
    }

    #[test]
    fn test_read_times_out_with_partial_data() {
        // Two bytes queued, then silence; a 1000 ms step blows the
        // timeout after three idle polls
        let mut logger = NetLogger::new(MockTransport::new(b"ab"), StepClock::new(1000));
        let mut buf = [0u8; 16];
        let n = logger.read(&mut buf).unwrap();

        assert_eq!(n, 2);
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn test_read_string_stops_at_delimiter() {
        let mut logger =
            NetLogger::new(MockTransport::new(b"hello\nworld"), StepClock::new(1));
        let mut out = String::<32>::new();
        logger.read_string_until(b'\n', &mut out).unwrap();

        assert_eq!(out.as_str(), "hello");
    }

    #[test]
    fn test_operations_fail_after_close() {
        let mut logger = NetLogger::new(MockTransport::new(&[]), StepClock::new(1));
        logger.close();

        assert!(!logger.is_connected());
        assert_eq!(logger.print("late"), Err(LogError::Disconnected));
        let mut buf = [0u8; 4];
        assert_eq!(logger.read(&mut buf), Err(LogError::Disconnected));
    }

    #[test]
    fn test_close_flushes_once() {
        let mut logger = NetLogger::new(MockTransport::new(&[]), StepClock::new(1));
        logger.print("tail").unwrap();
        logger.close();
        // Second close is a no-op
        logger.close();
        assert!(!logger.is_connected());
    }
}
