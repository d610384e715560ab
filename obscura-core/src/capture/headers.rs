//! Fixed bitmap headers
//!
//! One pre-built 54-byte BMP header per supported resolution, written
//! verbatim as the first bytes of a capture file. The blobs are opaque
//! constants matched to the deployed host tooling; they are selected by
//! resolution only and never recomputed at runtime.

use obscura_protocol::Resolution;

/// Length of every header blob in bytes
pub const BMP_HEADER_LEN: usize = 54;

/// 160 x 120, 24 bits per pixel
pub const BMP_HEADER_160X120: [u8; BMP_HEADER_LEN] = [
    0x42, 0x4D, // signature
    0x36, 0x2C, 0x00, 0x00, // file size
    0x00, 0x00, // reserved
    0x00, 0x00, // reserved
    0x36, 0x00, 0x00, 0x00, // pixel data offset
    0x28, 0x00, 0x00, 0x00, // info header size
    0xA0, 0x00, 0x00, 0x00, // width
    0x78, 0x00, 0x00, 0x00, // height
    0x01, 0x00, // planes
    0x18, 0x00, // bits per pixel
    0x00, 0x00, 0x00, 0x00, // compression
    0x00, 0x2C, 0x00, 0x00, // image size
    0x13, 0x0B, 0x00, 0x00, // x pixels per meter
    0x13, 0x0B, 0x00, 0x00, // y pixels per meter
    0x00, 0x00, 0x00, 0x00, // colors used
    0x00, 0x00, 0x00, 0x00, // important colors
];

/// 320 x 240, 24 bits per pixel
pub const BMP_HEADER_320X240: [u8; BMP_HEADER_LEN] = [
    0x42, 0x4D, // signature
    0xDE, 0x82, 0x03, 0x00, // file size
    0x00, 0x00, // reserved
    0x00, 0x00, // reserved
    0x36, 0x00, 0x00, 0x00, // pixel data offset
    0x28, 0x00, 0x00, 0x00, // info header size
    0x40, 0x01, 0x00, 0x00, // width
    0xF0, 0x00, 0x00, 0x00, // height
    0x01, 0x00, // planes
    0x18, 0x00, // bits per pixel
    0x00, 0x00, 0x00, 0x00, // compression
    0x00, 0x82, 0x03, 0x00, // image size
    0x13, 0x0B, 0x00, 0x00, // x pixels per meter
    0x13, 0x0B, 0x00, 0x00, // y pixels per meter
    0x00, 0x00, 0x00, 0x00, // colors used
    0x00, 0x00, 0x00, 0x00, // important colors
];

/// 640 x 480, 24 bits per pixel
pub const BMP_HEADER_640X480: [u8; BMP_HEADER_LEN] = [
    0x42, 0x4D, // signature
    0x36, 0x6C, 0x0B, 0x00, // file size
    0x00, 0x00, // reserved
    0x00, 0x00, // reserved
    0x36, 0x00, 0x00, 0x00, // pixel data offset
    0x28, 0x00, 0x00, 0x00, // info header size
    0x80, 0x02, 0x00, 0x00, // width
    0xE0, 0x01, 0x00, 0x00, // height
    0x01, 0x00, // planes
    0x18, 0x00, // bits per pixel
    0x00, 0x00, 0x00, 0x00, // compression
    0x00, 0x6C, 0x0B, 0x00, // image size
    0x13, 0x0B, 0x00, 0x00, // x pixels per meter
    0x13, 0x0B, 0x00, 0x00, // y pixels per meter
    0x00, 0x00, 0x00, 0x00, // colors used
    0x00, 0x00, 0x00, 0x00, // important colors
];

/// Select the header blob for a resolution
pub fn bmp_header(resolution: Resolution) -> &'static [u8; BMP_HEADER_LEN] {
    match resolution {
        Resolution::Vga => &BMP_HEADER_640X480,
        Resolution::Qvga => &BMP_HEADER_320X240,
        Resolution::Qqvga => &BMP_HEADER_160X120,
    }
}
