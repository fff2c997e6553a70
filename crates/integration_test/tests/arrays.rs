//! Array and length directive tests.

use wirestruct_integration_test::{Material, Mesh, Vec3, Vertex};
use wirestruct_serialize::{
    Configuration, LengthDirective, Struct, StructWriter, ValueSource,
    to_vec,
};

fn vertex(seed: u8) -> Vertex {
    let value = f32::from(seed);

    Vertex {
        position: Vec3::new(value, value, value),
        normal: Vec3::new(0.0, 0.0, 1.0),
        color: [seed; 4],
    }
}

#[test]
fn object_arrays_are_written_back_to_back() {
    let mesh = Mesh::new(vec![vertex(1), vertex(2)]);

    let bytes = to_vec(&mesh, Configuration::default()).unwrap();

    // count + two vertices of 6 floats and 4 color bytes
    assert_eq!(bytes.len(), 4 + 2 * (6 * 4 + 4));
    assert_eq!(&bytes[..4], [0, 0, 0, 2]);
    assert_eq!(&bytes[4 + 24..4 + 28], [1, 1, 1, 1]);
    assert_eq!(&bytes[bytes.len() - 4..], [2, 2, 2, 2]);
}

#[test]
fn empty_arrays_write_nothing() {
    let mesh = Mesh::new(Vec::new());

    assert_eq!(to_vec(&mesh, Configuration::default()).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn directive_truncates_object_arrays() {
    let mesh = Mesh::new(vec![vertex(1), vertex(2), vertex(3)]);
    let vertices = mesh.layout().field("vertices").unwrap();
    let mut writer = StructWriter::new(Vec::new());

    writer
        .write_field(
            &mesh,
            vertices,
            ValueSource::Direct,
            LengthDirective::AtMost(1),
        )
        .unwrap();

    assert_eq!(writer.into_inner(), to_vec(&vertex(1), Configuration::default()).unwrap());
}

#[test]
fn directive_beyond_length_writes_everything() {
    let mesh = Mesh::new(vec![vertex(4), vertex(5)]);
    let vertices = mesh.layout().field("vertices").unwrap();
    let mut bounded = StructWriter::new(Vec::new());
    let mut full = StructWriter::new(Vec::new());

    bounded
        .write_field(
            &mesh,
            vertices,
            ValueSource::Direct,
            LengthDirective::try_from(100i64).unwrap(),
        )
        .unwrap();
    full.write_field(
        &mesh,
        vertices,
        ValueSource::Direct,
        LengthDirective::try_from(-1i64).unwrap(),
    )
    .unwrap();

    assert_eq!(bounded.into_inner(), full.into_inner());
}

#[test]
fn fixed_arrays_in_nested_objects() {
    let mut mesh = Mesh::new(vec![vertex(9)]);
    mesh.material = Some(Box::new(Material { id: 0x0102, shininess: 3 }));

    let bytes = to_vec(&mesh, Configuration::default()).unwrap();

    assert_eq!(&bytes[bytes.len() - 3..], [0x01, 0x02, 0x03]);
}

#[test]
fn primitive_array_writers() {
    let mut writer = StructWriter::new(Vec::new());

    writer
        .write_short_array(&[1, 2, 3], LengthDirective::try_from(2i64).unwrap())
        .unwrap();
    writer
        .write_long_array(&[-1], LengthDirective::Full)
        .unwrap();
    writer
        .write_byte_array(b"abc", LengthDirective::try_from(0i64).unwrap())
        .unwrap();

    assert_eq!(writer.into_inner(), [
        0x00, 0x01, 0x00, 0x02, // shorts
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // long
    ]);
}

#[test]
fn invalid_directives_are_rejected() {
    assert!(LengthDirective::try_from(-2i32).is_err());
    assert!(LengthDirective::try_from(i64::MIN).is_err());
}
