//! Primitive encoding for struct layouts.
//!
//! This module provides the [`Encoder`] trait, the leaf of the serialization
//! stack. An encoder knows nothing about objects or fields: it writes exactly
//! one primitive value at a time, using a fixed number of bytes, in the byte
//! order chosen when the encoder was constructed.
//!
//! | Kind      | Width | Representation                      |
//! |-----------|-------|-------------------------------------|
//! | `boolean` | 1     | `0x00` or `0x01`                    |
//! | `byte`    | 1     | two's complement                    |
//! | `short`   | 2     | two's complement                    |
//! | `char`    | 2     | UTF-16 code unit                    |
//! | `int`     | 4     | two's complement                    |
//! | `float`   | 4     | IEEE 754 binary32 bit pattern       |
//! | `long`    | 8     | two's complement                    |
//! | `double`  | 8     | IEEE 754 binary64 bit pattern       |
//!
//! Every NaN is written with the canonical quiet-NaN pattern
//! (`0x7fc00000` and `0x7ff8000000000000`); payload bits are not preserved.

use std::io;

/// The bit pattern written for every NaN `f32`.
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// The bit pattern written for every NaN `f64`.
pub const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// The bits written for `v`, with NaN collapsed to [`CANONICAL_NAN_F32`].
#[must_use]
pub const fn float_bits(v: f32) -> u32 {
    if v.is_nan() { CANONICAL_NAN_F32 } else { v.to_bits() }
}

/// The bits written for `v`, with NaN collapsed to [`CANONICAL_NAN_F64`].
#[must_use]
pub const fn double_bits(v: f64) -> u64 {
    if v.is_nan() { CANONICAL_NAN_F64 } else { v.to_bits() }
}

/// The order in which the bytes of a multi-byte primitive are written.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ByteOrder {
    /// Most significant byte first. This is the default, matching the network
    /// byte order used by most struct-based wire formats.
    #[default]
    BigEndian,

    /// Least significant byte first.
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the target architecture.
    #[must_use]
    pub const fn native() -> Self {
        #[cfg(target_endian = "big")]
        let order = Self::BigEndian;

        #[cfg(target_endian = "little")]
        let order = Self::LittleEndian;

        order
    }
}

/// A trait for sinks that can write primitive values in a fixed byte order.
///
/// Implementors provide the integer writers and the bulk byte path; the
/// remaining primitives have default implementations expressed in terms of
/// those. Every operation either writes all bytes of the value or fails.
///
/// # Example
///
/// ```ignore
/// use std::io;
/// use wirestruct_serialize::{ByteOrder, Encoder};
///
/// struct VecEncoder {
///     buffer: Vec<u8>,
/// }
///
/// impl Encoder for VecEncoder {
///     fn byte_order(&self) -> ByteOrder { ByteOrder::BigEndian }
///
///     fn emit_byte(&mut self, v: i8) -> io::Result<()> {
///         self.buffer.extend_from_slice(&v.to_be_bytes());
///         Ok(())
///     }
///
///     fn emit_raw_bytes(&mut self, s: &[u8]) -> io::Result<()> {
///         self.buffer.extend_from_slice(s);
///         Ok(())
///     }
///
///     // ... implement the other required methods
/// }
/// ```
pub trait Encoder {
    // =========================================================================
    // Required methods - these must be implemented by all encoders
    // =========================================================================

    /// The byte order every multi-byte primitive is written in.
    fn byte_order(&self) -> ByteOrder;

    /// Emits a single signed byte.
    fn emit_byte(&mut self, v: i8) -> io::Result<()>;

    /// Emits a 16-bit signed integer.
    fn emit_short(&mut self, v: i16) -> io::Result<()>;

    /// Emits a 32-bit signed integer.
    fn emit_int(&mut self, v: i32) -> io::Result<()>;

    /// Emits a 64-bit signed integer.
    fn emit_long(&mut self, v: i64) -> io::Result<()>;

    /// Emits raw bytes directly to the output.
    ///
    /// This is the bulk path for byte arrays. Its output must be identical to
    /// calling [`emit_byte`](Self::emit_byte) once per byte.
    fn emit_raw_bytes(&mut self, s: &[u8]) -> io::Result<()>;

    // =========================================================================
    // Default implementations - can be overridden for optimization
    // =========================================================================

    /// Emits a boolean value as `0x01` for `true` and `0x00` for `false`.
    fn emit_bool(&mut self, v: bool) -> io::Result<()> {
        self.emit_byte(i8::from(v))
    }

    /// Emits a character as its 16-bit UTF-16 code unit.
    ///
    /// # Errors
    ///
    /// Characters outside the Basic Multilingual Plane need a surrogate pair
    /// and cannot be represented in a two-byte slot; they are rejected with
    /// [`io::ErrorKind::InvalidInput`] before anything is written.
    #[allow(clippy::cast_possible_wrap)]
    fn emit_char(&mut self, v: char) -> io::Result<()> {
        let unit = u16::try_from(u32::from(v)).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "character U+{:04X} does not fit in a 16-bit char",
                    u32::from(v)
                ),
            )
        })?;

        self.emit_short(unit as i16)
    }

    /// Emits a 32-bit floating-point number as its IEEE 754 bit pattern.
    #[allow(clippy::cast_possible_wrap)]
    fn emit_float(&mut self, v: f32) -> io::Result<()> {
        self.emit_int(float_bits(v) as i32)
    }

    /// Emits a 64-bit floating-point number as its IEEE 754 bit pattern.
    #[allow(clippy::cast_possible_wrap)]
    fn emit_double(&mut self, v: f64) -> io::Result<()> {
        self.emit_long(double_bits(v) as i64)
    }
}

impl<E: Encoder + ?Sized> Encoder for &mut E {
    fn byte_order(&self) -> ByteOrder { (**self).byte_order() }

    fn emit_byte(&mut self, v: i8) -> io::Result<()> { (**self).emit_byte(v) }

    fn emit_short(&mut self, v: i16) -> io::Result<()> {
        (**self).emit_short(v)
    }

    fn emit_int(&mut self, v: i32) -> io::Result<()> { (**self).emit_int(v) }

    fn emit_long(&mut self, v: i64) -> io::Result<()> { (**self).emit_long(v) }

    fn emit_raw_bytes(&mut self, s: &[u8]) -> io::Result<()> {
        (**self).emit_raw_bytes(s)
    }

    fn emit_bool(&mut self, v: bool) -> io::Result<()> { (**self).emit_bool(v) }

    fn emit_char(&mut self, v: char) -> io::Result<()> { (**self).emit_char(v) }

    fn emit_float(&mut self, v: f32) -> io::Result<()> {
        (**self).emit_float(v)
    }

    fn emit_double(&mut self, v: f64) -> io::Result<()> {
        (**self).emit_double(v)
    }
}
