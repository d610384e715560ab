//! Serial command link trait

/// Blocking byte source for the command link
///
/// The controller's [`run`](crate::Controller::run) pump pulls one byte
/// at a time; implementations block until a byte is available. Event-
/// driven embeddings can skip this trait entirely and push bytes through
/// [`feed`](crate::Controller::feed).
pub trait CommandLink {
    /// Error type for receive operations
    type Error;

    /// Read a single byte, blocking until one arrives
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// Any blocking [`embedded_io::Read`] works as a command link
///
/// End of input surfaces as [`embedded_io::ReadExactError::UnexpectedEof`],
/// which stops the pump - useful for driving the controller from a byte
/// slice in tests.
impl<T: embedded_io::Read> CommandLink for T {
    type Error = embedded_io::ReadExactError<T::Error>;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}
