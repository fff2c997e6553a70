//! Byte order and fixed-width layout tests.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use wirestruct_integration_test::{BitmapFileHeader, Vec3, Vertex};
use wirestruct_serialize::{ByteOrder, Configuration, to_vec};

fn little_endian() -> Configuration {
    Configuration::builder().byte_order(ByteOrder::LittleEndian).build()
}

#[test]
fn bitmap_header_matches_the_file_format() {
    let header = BitmapFileHeader::new(0x0003_0036, 54);

    let bytes = to_vec(&header, little_endian()).unwrap();

    assert_eq!(bytes.len(), 14);
    assert_eq!(bytes, [
        b'B', b'M', // magic
        0x36, 0x00, 0x03, 0x00, // file size
        0x00, 0x00, 0x00, 0x00, // reserved
        0x36, 0x00, 0x00, 0x00, // pixel offset
    ]);
}

#[test]
fn byte_arrays_are_not_reordered() {
    let header = BitmapFileHeader::new(1, 2);

    let big = to_vec(&header, Configuration::default()).unwrap();
    let little = to_vec(&header, little_endian()).unwrap();

    assert_eq!(&big[..2], b"BM");
    assert_eq!(&little[..2], b"BM");
    assert_eq!(&big[2..6], [0, 0, 0, 1]);
    assert_eq!(&little[2..6], [1, 0, 0, 0]);
}

#[test]
fn floats_follow_the_configured_order() {
    let vertex = Vertex {
        position: Vec3::new(1.0, -2.5, 0.125),
        normal: Vec3::new(0.0, 1.0, 0.0),
        color: [0xff, 0x80, 0x00, 0x7f],
    };

    let mut expected_big = Vec::new();
    let mut expected_little = Vec::new();
    for component in [1.0, -2.5, 0.125, 0.0, 1.0, 0.0] {
        expected_big.write_f32::<BigEndian>(component).unwrap();
        expected_little.write_f32::<LittleEndian>(component).unwrap();
    }
    expected_big.extend_from_slice(&vertex.color);
    expected_little.extend_from_slice(&vertex.color);

    assert_eq!(to_vec(&vertex, Configuration::default()).unwrap(), expected_big);
    assert_eq!(to_vec(&vertex, little_endian()).unwrap(), expected_little);
}

#[test]
fn same_input_same_bytes() {
    let header = BitmapFileHeader::new(0xdead_beef, 0x0102_0304);

    for configuration in [Configuration::default(), little_endian()] {
        assert_eq!(
            to_vec(&header, configuration).unwrap(),
            to_vec(&header.clone(), configuration).unwrap()
        );
    }
}
