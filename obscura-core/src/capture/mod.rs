//! Capture pipeline building blocks
//!
//! Everything between the command stream and the bytes that land in the
//! image file: the session that owns the destination file, the pixel
//! sample conversions, and the fixed bitmap headers.

pub mod headers;
pub mod pixel;
pub mod session;

pub use headers::{bmp_header, BMP_HEADER_LEN};
pub use pixel::{greyscale_to_rgb, Rgb565};
pub use session::{CaptureSession, DEFAULT_FILENAME, FILENAME_CAPACITY};
