//! Serializing into files.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
};

use tempfile::tempdir;
use wirestruct_integration_test::{BitmapFileHeader, write_to_file};
use wirestruct_serialize::{ByteOrder, Configuration, StructWriter, to_vec};

#[test]
fn file_matches_memory() {
    let tempdir = tempdir().unwrap();
    let header = BitmapFileHeader::new(1024, 54);
    let configuration =
        Configuration::builder().byte_order(ByteOrder::LittleEndian).build();

    let from_file =
        write_to_file(&tempdir, "header.bmp", &header, configuration).unwrap();

    assert_eq!(from_file, to_vec(&header, configuration).unwrap());
}

#[test]
fn consecutive_objects_are_appended() {
    let tempdir = tempdir().unwrap();
    let path = tempdir.path().join("records.bin");
    let headers = [
        BitmapFileHeader::new(1, 2),
        BitmapFileHeader::new(3, 4),
        BitmapFileHeader::new(5, 6),
    ];

    {
        let mut writer =
            StructWriter::new(BufWriter::new(File::create(&path).unwrap()));
        for header in &headers {
            writer.serialize(header).unwrap();
        }
        writer.get_mut().flush().unwrap();
    }

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), headers.len() * 14);

    for (chunk, header) in bytes.chunks_exact(14).zip(&headers) {
        assert_eq!(chunk, to_vec(header, Configuration::default()).unwrap());
    }
}

#[test]
fn interleaved_raw_writes() {
    let mut writer = StructWriter::new(Vec::new());

    writer.get_mut().extend_from_slice(b"HDR0");
    writer.serialize(&BitmapFileHeader::new(0, 0)).unwrap();

    assert_eq!(writer.get_ref().len(), 18);
    assert_eq!(&writer.into_inner()[..6], b"HDR0BM");
}
