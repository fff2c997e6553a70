//! Wirestruct Serialization Library
//!
//! This crate writes object graphs as flat, C-struct-like byte sequences:
//! every field occupies its natural fixed width, fields appear strictly in
//! declaration order, and there are no tags, length prefixes or padding. The
//! output is meant to be read by code that knows the layout, such as a C
//! program casting a buffer to a `struct`.
//!
//! # Overview
//!
//! - [`Encoder`]: low-level trait for emitting one primitive in a fixed
//!   [`ByteOrder`]. [`EndianEncoder`] implements it for any `io::Write`.
//! - [`Struct`]: implemented by every serializable type. It exposes the
//!   type's [`Layout`], an ordered table of [`FieldDescriptor`]s, and reads
//!   field values by slot.
//! - [`StructWriter`]: walks a layout, applies the [`Visibility`] inclusion
//!   policy and dispatches each field to the encoder, to a recursive call, or
//!   to an array writer bounded by a [`LengthDirective`].
//! - [`Record`]: an object whose layout is built at runtime from type
//!   descriptors.
//!
//! # Derive Macro
//!
//! `Struct` is normally derived:
//!
//! ```ignore
//! use wirestruct_serialize::{Struct, StructWriter};
//!
//! #[derive(Struct)]
//! pub struct Header {
//!     pub magic: u32,
//!     pub version: u16,
//!     pub(crate) flags: [u8; 4],
//!     #[structure(transient)]
//!     pub cached_len: u64,
//! }
//!
//! let header = Header {
//!     magic: 0xcafe_babe,
//!     version: 3,
//!     flags: [1, 0, 0, 0],
//!     cached_len: 0,
//! };
//!
//! let mut writer = StructWriter::new(Vec::new());
//! writer.serialize(&header)?;
//!
//! assert_eq!(writer.into_inner(), [
//!     0xca, 0xfe, 0xba, 0xbe, // magic
//!     0x00, 0x03,             // version
//!     0x01, 0x00, 0x00, 0x00, // flags
//! ]);
//! ```
//!
//! ## Field Attributes
//!
//! - `#[structure(getter = "method")]` reads the field through a method.
//! - `#[structure(visibility = "protected")]` overrides the qualifier
//!   inferred from the Rust visibility.
//! - `#[structure(transient)]` excludes the field unless the policy admits
//!   [`Visibility::TRANSIENT`].
//!
//! # Logging
//!
//! Every top-level [`StructWriter::serialize`] call runs in a `debug` span
//! named `serialize`. Skipped fields are reported at `trace` level and
//! aborted calls at `debug` level.

// Allow derive macros to reference this crate as `wirestruct_serialize`
// internally
extern crate self as wirestruct_serialize;

pub mod config;
pub mod encode;
pub mod endian;
pub mod engine;
pub mod error;
pub mod field;
pub mod kind;
pub mod length;
pub mod record;
pub mod value;

mod session;

// Re-export main traits and types at the crate root for convenience
pub use config::Configuration;
pub use encode::{ByteOrder, Encoder};
pub use endian::EndianEncoder;
pub use engine::{StructWriter, to_vec};
pub use error::{
    AccessError, ErrorKind, FieldPath, PathSegment, SerializationError,
};
pub use field::{FieldDescriptor, Layout, Struct, ValueSource, Visibility};
pub use kind::{FieldType, Kind};
pub use length::{InvalidLengthDirective, LengthDirective};
pub use record::{Datum, Record};
pub use value::{
    Accessed, ArrayValue, Element, FieldValue, PrimitiveElement, Value,
};
// Re-export derive macro
pub use wirestruct_serialize_derive::Struct;
