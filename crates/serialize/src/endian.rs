//! Fixed-width, byte-order-aware encoding.
//!
//! [`EndianEncoder`] implements [`Encoder`] on top of any [`Write`] sink.
//! Every primitive occupies its natural width (see the table in
//! [`crate::encode`]); there is no length prefix, varint, or padding. The byte
//! order is chosen once at construction and applies to every write.
//!
//! # Example
//!
//! ```ignore
//! use wirestruct_serialize::{ByteOrder, Encoder, EndianEncoder};
//!
//! let mut encoder = EndianEncoder::new(Vec::new(), ByteOrder::LittleEndian);
//! encoder.emit_int(0x0102_0304).unwrap();
//! assert_eq!(encoder.into_inner(), [0x04, 0x03, 0x02, 0x01]);
//! ```

use std::io::{self, Write};

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::encode::{ByteOrder, Encoder, double_bits, float_bits};


/// An encoder that writes fixed-width primitives to any [`Write`]
/// implementation in a configured byte order.
///
/// # Type Parameters
///
/// * `W` - The writer type that implements [`std::io::Write`].
///
/// # Example
///
/// ```ignore
/// use std::io::Cursor;
/// use wirestruct_serialize::{ByteOrder, EndianEncoder};
///
/// // Write to a Vec<u8>
/// let encoder = EndianEncoder::new(Vec::new(), ByteOrder::BigEndian);
///
/// // Write to a file
/// let file = std::fs::File::create("output.bin").unwrap();
/// let encoder = EndianEncoder::new(file, ByteOrder::LittleEndian);
/// ```
#[derive(Debug)]
pub struct EndianEncoder<W> {
    writer: W,
    order: ByteOrder,
}

impl<W> EndianEncoder<W> {
    /// Creates a new encoder wrapping the given writer.
    #[must_use]
    pub const fn new(writer: W, order: ByteOrder) -> Self {
        Self { writer, order }
    }

    /// Creates a big-endian encoder wrapping the given writer.
    #[must_use]
    pub const fn big_endian(writer: W) -> Self {
        Self::new(writer, ByteOrder::BigEndian)
    }

    /// Creates a little-endian encoder wrapping the given writer.
    #[must_use]
    pub const fn little_endian(writer: W) -> Self {
        Self::new(writer, ByteOrder::LittleEndian)
    }

    /// Returns a reference to the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W { &self.writer }

    /// Returns a mutable reference to the underlying writer.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn get_mut(&mut self) -> &mut W { &mut self.writer }

    /// Consumes the encoder and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> Encoder for EndianEncoder<W> {
    fn byte_order(&self) -> ByteOrder { self.order }

    fn emit_byte(&mut self, v: i8) -> io::Result<()> { self.writer.write_i8(v) }

    fn emit_short(&mut self, v: i16) -> io::Result<()> {
        match self.order {
            ByteOrder::BigEndian => self.writer.write_i16::<BigEndian>(v),
            ByteOrder::LittleEndian => {
                self.writer.write_i16::<LittleEndian>(v)
            }
        }
    }

    fn emit_int(&mut self, v: i32) -> io::Result<()> {
        match self.order {
            ByteOrder::BigEndian => self.writer.write_i32::<BigEndian>(v),
            ByteOrder::LittleEndian => {
                self.writer.write_i32::<LittleEndian>(v)
            }
        }
    }

    fn emit_long(&mut self, v: i64) -> io::Result<()> {
        match self.order {
            ByteOrder::BigEndian => self.writer.write_i64::<BigEndian>(v),
            ByteOrder::LittleEndian => {
                self.writer.write_i64::<LittleEndian>(v)
            }
        }
    }

    fn emit_raw_bytes(&mut self, s: &[u8]) -> io::Result<()> {
        self.writer.write_all(s)
    }

    fn emit_bool(&mut self, v: bool) -> io::Result<()> {
        self.writer.write_u8(u8::from(v))
    }

    fn emit_float(&mut self, v: f32) -> io::Result<()> {
        match self.order {
            ByteOrder::BigEndian => self.writer.write_u32::<BigEndian>(float_bits(v)),
            ByteOrder::LittleEndian => {
                self.writer.write_u32::<LittleEndian>(float_bits(v))
            }
        }
    }

    fn emit_double(&mut self, v: f64) -> io::Result<()> {
        match self.order {
            ByteOrder::BigEndian => self.writer.write_u64::<BigEndian>(double_bits(v)),
            ByteOrder::LittleEndian => {
                self.writer.write_u64::<LittleEndian>(double_bits(v))
            }
        }
    }
}
