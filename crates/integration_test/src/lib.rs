//! Common test utilities and shared struct definitions for wirestruct
//! integration tests.
//!
//! This crate provides fixture types modelled on real binary formats and a
//! helper that serializes through a file on disk.

#![allow(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]

use std::{
    fs::{self, File},
    io::{BufWriter, IntoInnerError},
};

use tempfile::TempDir;
use wirestruct_serialize::{
    Configuration, SerializationError, Struct, StructWriter,
};

// ============================================================================
// Bitmap File Header
// ============================================================================

/// The 14-byte header at the start of a BMP file. Written little-endian.
#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct BitmapFileHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved: [u16; 2],
    pub pixel_offset: u32,
}

impl BitmapFileHeader {
    pub fn new(file_size: u32, pixel_offset: u32) -> Self {
        Self { magic: *b"BM", file_size, reserved: [0, 0], pixel_offset }
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Struct)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self { Self { x, y, z } }
}

#[derive(Debug, Clone, PartialEq, Struct)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct Material {
    pub id: u16,
    pub shininess: u8,
}

/// A mesh whose vertex count is computed rather than stored.
#[derive(Debug, Clone, PartialEq, Struct)]
pub struct Mesh {
    #[structure(getter = "vertex_count")]
    pub count: u32,
    pub vertices: Vec<Vertex>,
    pub material: Option<Box<Material>>,
    #[structure(transient)]
    pub bounds_cache: Option<[f32; 6]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { count: 0, vertices, material: None, bounds_cache: None }
    }

    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.vertices.len()).unwrap_or(u32::MAX)
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// One field of every qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct Account {
    pub id: u32,
    pub(crate) balance: i64,
    pin: u16,
    #[structure(visibility = "protected")]
    pub audit_level: u8,
    #[structure(transient)]
    pub session_token: u32,
}

impl Account {
    pub fn new(id: u32, balance: i64, pin: u16) -> Self {
        Self { id, balance, pin, audit_level: 2, session_token: 0xdead_beef }
    }

    pub fn pin(&self) -> u16 { self.pin }
}

// ============================================================================
// Accessors
// ============================================================================

/// A sensor reading whose public value is derived from the raw sample.
#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct SensorReading {
    pub channel: u8,
    #[structure(getter = "calibrated")]
    pub sample: i16,
    #[structure(getter = "label")]
    pub label: Option<Vec<char>>,
}

impl SensorReading {
    pub const OFFSET: i16 = -40;

    pub fn calibrated(&self) -> Result<i16, String> {
        self.sample
            .checked_add(Self::OFFSET)
            .ok_or_else(|| format!("sample {} out of range", self.sample))
    }

    pub fn label(&self) -> Option<&[char]> { self.label.as_deref() }
}

// ============================================================================
// Recursive Structures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct TreeNode {
    pub value: i32,
    pub children: Vec<Option<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: i32) -> Self { Self { value, children: Vec::new() } }

    pub fn with_children(value: i32, children: Vec<Self>) -> Self {
        Self { value, children: children.into_iter().map(Some).collect() }
    }
}

/// A singly linked list node. `depth` nodes long when built with
/// [`ListNode::chain`].
#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct ListNode {
    pub index: u16,
    pub next: Option<Box<ListNode>>,
}

impl ListNode {
    pub fn chain(depth: u16) -> Self {
        let last = depth.saturating_sub(1);

        (0..last).rev().fold(Self { index: last, next: None }, |next, index| {
            Self { index, next: Some(Box::new(next)) }
        })
    }
}

/// A node whose `parent` accessor points back at itself, closing a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Struct)]
pub struct Ouroboros {
    pub id: u32,
    #[structure(getter = "parent")]
    pub parent: Option<Box<Ouroboros>>,
}

impl Ouroboros {
    pub fn parent(&self) -> &Self { self }
}

// ============================================================================
// Helpers
// ============================================================================

/// Serializes `object` into a file inside `dir` and reads the file back.
pub fn write_to_file(
    dir: &TempDir,
    name: &str,
    object: &dyn Struct,
    configuration: Configuration,
) -> Result<Vec<u8>, SerializationError> {
    let path = dir.path().join(name);
    let mut writer = StructWriter::with_configuration(
        BufWriter::new(File::create(&path)?),
        configuration,
    );

    writer.serialize(object)?;
    writer.into_inner().into_inner().map_err(IntoInnerError::into_error)?;

    Ok(fs::read(&path)?)
}
