//! Accessor-backed fields.

use wirestruct_integration_test::{Mesh, SensorReading};
use wirestruct_serialize::{
    AccessError, Configuration, ErrorKind, LengthDirective, Struct,
    StructWriter, ValueSource, to_vec,
};

#[test]
fn accessor_value_is_written() {
    let reading = SensorReading { channel: 3, sample: 65, label: None };

    let bytes = to_vec(&reading, Configuration::default()).unwrap();

    assert_eq!(bytes, [0x03, 0x00, 0x19]);
}

#[test]
fn accessor_arrays() {
    let reading = SensorReading {
        channel: 1,
        sample: 40,
        label: Some(vec!['o', 'k']),
    };

    let bytes = to_vec(&reading, Configuration::default()).unwrap();

    assert_eq!(bytes, [0x01, 0x00, 0x00, 0x00, b'o', 0x00, b'k']);
}

#[test]
fn accessor_failure_aborts_the_call() {
    let reading = SensorReading { channel: 1, sample: i16::MIN, label: None };

    let error = to_vec(&reading, Configuration::default()).unwrap_err();

    let ErrorKind::Access(AccessError::Getter(source)) = error.kind() else {
        panic!("expected an accessor failure, found {:?}", error.kind());
    };
    assert_eq!(source.to_string(), "sample -32768 out of range");
    assert_eq!(error.path().to_string(), "sample");
}

#[test]
fn both_sources_are_available() {
    let reading = SensorReading { channel: 1, sample: 100, label: None };
    let sample = reading.layout().field("sample").unwrap();
    assert_eq!(sample.accessor(), Some("calibrated"));

    let mut writer = StructWriter::new(Vec::new());
    for source in [ValueSource::Direct, ValueSource::Accessor] {
        writer
            .write_field(&reading, sample, source, LengthDirective::Full)
            .unwrap();
    }

    assert_eq!(writer.into_inner(), [0x00, 0x64, 0x00, 0x3c]);
}

#[test]
fn computed_counts() {
    let mesh = Mesh::new(Vec::new());
    let count = mesh.layout().field("count").unwrap();

    assert_eq!(ValueSource::for_field(count), ValueSource::Accessor);
    assert_eq!(mesh.vertex_count(), 0);
}
