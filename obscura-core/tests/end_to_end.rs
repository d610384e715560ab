//! Sender-to-controller integration
//!
//! Drives the controller with byte streams produced by the protocol
//! crate's `CommandSender`, through the blocking pump, and checks what
//! lands in storage.

use core::convert::Infallible;

use obscura_core::capture::bmp_header;
use obscura_core::traits::{Indicator, Storage};
use obscura_core::{Controller, ControllerError};
use obscura_protocol::{ColorFormat, CommandSender, Metadata, Resolution};

/// Growable byte sink for the sender side
#[derive(Default)]
struct VecSink {
    data: Vec<u8>,
}

impl embedded_io::ErrorType for VecSink {
    type Error = Infallible;
}

impl embedded_io::Write for VecSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Storage backend recording opens and writes
#[derive(Default)]
struct VecStorage {
    data: Vec<u8>,
    opened_names: Vec<String>,
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VecStorageError;

impl Storage for VecStorage {
    type File = ();
    type Error = VecStorageError;

    fn open(&mut self, name: &str) -> Result<(), VecStorageError> {
        self.opened_names.push(name.to_owned());
        self.data.clear();
        self.open = true;
        Ok(())
    }

    fn write(&mut self, _file: &mut (), data: &[u8]) -> Result<(), VecStorageError> {
        assert!(self.open, "write reached storage while no file was open");
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn close(&mut self, _file: ()) -> Result<(), VecStorageError> {
        self.open = false;
        Ok(())
    }
}

#[derive(Default)]
struct Led {
    on: bool,
}

impl Indicator for Led {
    fn set(&mut self, on: bool) {
        self.on = on;
    }
}

/// Build a wire byte stream with the sender
fn wire(build: impl FnOnce(&mut CommandSender<VecSink>)) -> Vec<u8> {
    let mut sender = CommandSender::new(VecSink::default());
    build(&mut sender);
    sender.release().data
}

/// Pump a byte stream through a controller until it runs dry
fn pump(controller: &mut Controller<VecStorage, Led>, bytes: &[u8]) {
    let mut link: &[u8] = bytes;
    let result = controller.run(&mut link);
    // The pump only stops when the script is exhausted
    assert!(matches!(result, Err(ControllerError::Link(_))));
}

#[test]
fn greyscale_capture_lands_header_then_pixels() {
    let bytes = wire(|sender| {
        sender.create_file("FRAME.BMP").unwrap();
        sender
            .set_metadata(Metadata {
                resolution: Resolution::Qqvga,
                color: ColorFormat::Greyscale,
            })
            .unwrap();
        sender.toggle_auto_encode().unwrap();
        sender.write_all(&[0x00, 0x80, 0xFF]).unwrap();
        sender.close_file().unwrap();
    });

    let mut controller = Controller::new(VecStorage::default(), Led::default());
    pump(&mut controller, &bytes);

    let storage = controller.session().backend();
    assert_eq!(storage.opened_names, ["FRAME.BMP"]);

    let header = bmp_header(Resolution::Qqvga);
    assert_eq!(&storage.data[..header.len()], header.as_slice());
    assert_eq!(
        &storage.data[header.len()..],
        &[0x00, 0x00, 0x00, 0x80, 0x80, 0x80, 0xFF, 0xFF, 0xFF]
    );
    assert!(!storage.open);
}

#[test]
fn raw_passthrough_copies_bytes_verbatim() {
    let payload = [0x42, 0x00, 0xFF, 0x13];
    let bytes = wire(|sender| {
        sender.create_file("RAW.BIN").unwrap();
        sender.write_all(&payload).unwrap();
        sender.close_file().unwrap();
    });

    let mut controller = Controller::new(VecStorage::default(), Led::default());
    pump(&mut controller, &bytes);

    assert_eq!(controller.session().backend().data, payload);
}

#[test]
fn writes_before_create_reach_nothing() {
    let bytes = wire(|sender| {
        sender.write_all(&[1, 2, 3]).unwrap();
    });

    let mut controller = Controller::new(VecStorage::default(), Led::default());
    pump(&mut controller, &bytes);

    let storage = controller.session().backend();
    assert!(storage.opened_names.is_empty());
    assert!(storage.data.is_empty());
}

#[test]
fn rgb_rendezvous_survives_interleaved_commands() {
    let bytes = wire(|sender| {
        sender.create_file("COLOR.BMP").unwrap();
        sender.toggle_auto_encode().unwrap();
        sender.write_byte(0xF8).unwrap();
        // Lands between the two halves of the pixel and must vanish
        sender.led_on().unwrap();
        sender.write_byte(0x00).unwrap();
    });

    let mut controller = Controller::with_metadata(
        VecStorage::default(),
        Led::default(),
        Metadata {
            resolution: Resolution::Qqvga,
            color: ColorFormat::Rgb,
        },
    );
    pump(&mut controller, &bytes);

    assert_eq!(controller.session().backend().data, [255, 0, 0]);
    assert_eq!(controller.stats().discarded_pairs, 1);
    assert!(!controller.indicator_mut().on);
}

#[test]
fn led_commands_reach_the_indicator() {
    let bytes = wire(|sender| {
        sender.led_on().unwrap();
    });

    let mut controller = Controller::new(VecStorage::default(), Led::default());
    pump(&mut controller, &bytes);
    assert!(controller.indicator_mut().on);

    let bytes = wire(|sender| {
        sender.led_off().unwrap();
    });
    pump(&mut controller, &bytes);
    assert!(!controller.indicator_mut().on);
}
