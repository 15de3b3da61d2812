//! The external contract of the device front end.
use ram_device::{
    ControlOp, ControlReply, DeviceError, ExclusiveDevice, ReclaimingDevice, Whence,
    DEFAULT_CAPACITY,
};

#[test]
fn second_open_is_busy_until_release() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();

    let session = device.open().unwrap();
    assert_eq!(device.open().err(), Some(DeviceError::Busy));

    drop(session);
    assert!(device.open().is_ok());
}

#[test]
fn read_back_what_was_written() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    assert_eq!(session.write(b"hello there").unwrap(), 11);
    assert_eq!(session.position(), 11);

    session.seek(0, Whence::FromStart).unwrap();
    let mut buf = [0u8; 11];
    assert_eq!(session.read(&mut buf).unwrap(), 11);
    assert_eq!(&buf, b"hello there");
}

#[test]
fn seek_contract() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    assert_eq!(session.seek(42, Whence::FromStart).unwrap(), 42);
    assert_eq!(session.seek(0, Whence::FromCurrent).unwrap(), 42);
    assert_eq!(session.seek(0, Whence::FromEnd).unwrap(), 1024);

    assert_eq!(
        session.seek(1025, Whence::FromStart).err(),
        Some(DeviceError::OutOfRange)
    );
    assert_eq!(
        session.seek(-1, Whence::FromStart).err(),
        Some(DeviceError::OutOfRange)
    );
}

#[test]
fn reads_and_writes_clamp_at_capacity() {
    let device = ExclusiveDevice::new(16).unwrap();
    let mut session = device.open().unwrap();

    session.seek(12, Whence::FromStart).unwrap();
    assert_eq!(session.write(b"abcdefgh").unwrap(), 4);
    // Cursor sits at the end; further transfers move nothing.
    assert_eq!(session.position(), 16);
    assert_eq!(session.write(b"more").unwrap(), 0);

    let mut buf = [0u8; 8];
    assert_eq!(session.read(&mut buf).unwrap(), 0);

    session.seek(-4, Whence::FromEnd).unwrap();
    assert_eq!(session.read(&mut buf).unwrap(), 4);
    assert_eq!(&buf[..4], b"abcd");
}

#[test]
fn vowel_counting() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    session.write(b"AEIOUaeiou").unwrap();
    assert_eq!(
        session.control(ControlOp::CountVowels).unwrap(),
        ControlReply::VowelCount(10)
    );

    assert_eq!(
        session.control(ControlOp::Clear).unwrap(),
        ControlReply::Cleared
    );
    assert_eq!(
        session.control(ControlOp::CountVowels).unwrap(),
        ControlReply::VowelCount(0)
    );
}

#[test]
fn get_size_is_idempotent() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    for _ in 0..3 {
        assert_eq!(
            session.control(ControlOp::GetSize).unwrap(),
            ControlReply::Size(1024)
        );
        session.write(b"changes nothing").unwrap();
        session.control(ControlOp::Clear).unwrap();
    }
}

#[test]
fn unknown_control_code_is_invalid() {
    let device = ExclusiveDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    assert_eq!(session.control_raw(1).unwrap(), ControlReply::Size(1024));
    assert_eq!(
        session.control_raw(9).err(),
        Some(DeviceError::InvalidOperation)
    );
}

#[test]
fn reclaiming_device_admits_concurrent_sessions() {
    let device = ReclaimingDevice::new(DEFAULT_CAPACITY).unwrap();

    let mut writer = device.open().unwrap();
    let mut reader = device.open().unwrap();

    assert_eq!(writer.write(b"shared").unwrap(), 6);

    let mut buf = [0u8; 6];
    assert_eq!(reader.read(&mut buf).unwrap(), 6);
    assert_eq!(&buf, b"shared");
}

#[test]
fn reclaiming_device_same_contract() {
    let device = ReclaimingDevice::new(DEFAULT_CAPACITY).unwrap();
    let mut session = device.open().unwrap();

    session.write(b"AEIOUxyz").unwrap();
    assert_eq!(
        session.control(ControlOp::CountVowels).unwrap(),
        ControlReply::VowelCount(5)
    );
    assert_eq!(
        session.control(ControlOp::GetSize).unwrap(),
        ControlReply::Size(1024)
    );
    assert_eq!(
        session.seek(2000, Whence::FromStart).err(),
        Some(DeviceError::OutOfRange)
    );

    session.control(ControlOp::Clear).unwrap();
    assert_eq!(
        session.control(ControlOp::CountVowels).unwrap(),
        ControlReply::VowelCount(0)
    );
}
