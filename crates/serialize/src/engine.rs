//! The struct serialization engine.
//!
//! [`StructWriter`] walks an object's [`Layout`](crate::Layout) in
//! declaration order and writes every field admitted by its inclusion policy:
//!
//! - primitives go straight to the [`Encoder`],
//! - nested objects are serialized recursively with the same policy,
//! - arrays are written element by element, bounded by a [`LengthDirective`].
//!
//! Nothing is buffered or reordered. Bytes reach the sink in field order, and
//! a failure part way through leaves whatever was already written in place.
//!
//! # Example
//!
//! ```ignore
//! use wirestruct_serialize::{Struct, StructWriter};
//!
//! #[derive(Struct)]
//! struct Point {
//!     pub x: i32,
//!     pub y: i32,
//! }
//!
//! let mut writer = StructWriter::new(Vec::new());
//! writer.serialize(&Point { x: 1, y: -1 })?;
//!
//! assert_eq!(writer.into_inner(), [0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]);
//! ```

use std::io::{self, Write};

use crate::{
    config::Configuration,
    encode::{ByteOrder, Encoder},
    endian::EndianEncoder,
    error::{AccessError, SerializationError},
    field::{FieldDescriptor, Struct, ValueSource, Visibility},
    kind::{FieldType, Kind},
    length::LengthDirective,
    session::Session,
    value::{ArrayValue, Value},
};


/// Writes objects as flat, C-struct-like byte sequences.
///
/// The byte order is fixed by the encoder for the lifetime of the writer; the
/// inclusion policy can be changed between calls with
/// [`set_policy`](Self::set_policy).
///
/// A writer is not meant to be shared between threads: every write takes
/// `&mut self` and owns the sink exclusively for its duration.
#[derive(Debug)]
pub struct StructWriter<E> {
    encoder: E,
    policy: Visibility,
    max_depth: usize,
}

impl<W: Write> StructWriter<EndianEncoder<W>> {
    /// Creates a big-endian writer with the default inclusion policy.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_configuration(writer, Configuration::default())
    }

    /// Creates a writer from an explicit configuration.
    #[must_use]
    pub const fn with_configuration(
        writer: W,
        configuration: Configuration,
    ) -> Self {
        Self {
            encoder: EndianEncoder::new(writer, configuration.byte_order),
            policy: configuration.policy,
            max_depth: configuration.max_depth,
        }
    }

    /// Returns a reference to the underlying sink.
    #[must_use]
    pub const fn get_ref(&self) -> &W { self.encoder.get_ref() }

    /// Returns a mutable reference to the underlying sink.
    ///
    /// Writing to the sink directly interleaves with the serialized output.
    pub fn get_mut(&mut self) -> &mut W { self.encoder.get_mut() }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> W { self.encoder.into_inner() }
}

impl<E: Encoder> StructWriter<E> {
    /// Creates a writer around an existing encoder.
    ///
    /// The encoder's own byte order is used; `configuration.byte_order` is
    /// ignored.
    #[must_use]
    pub const fn from_encoder(encoder: E, configuration: Configuration) -> Self {
        Self {
            encoder,
            policy: configuration.policy,
            max_depth: configuration.max_depth,
        }
    }

    /// The byte order of every multi-byte primitive written.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder { self.encoder.byte_order() }

    /// The inclusion policy applied to every field.
    #[must_use]
    pub const fn policy(&self) -> Visibility { self.policy }

    /// Replaces the inclusion policy for subsequent writes.
    pub const fn set_policy(&mut self, policy: Visibility) {
        self.policy = policy;
    }

    /// The effective configuration of this writer.
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration {
            byte_order: self.byte_order(),
            policy: self.policy,
            max_depth: self.max_depth,
        }
    }

    /// Returns a reference to the encoder.
    #[must_use]
    pub const fn encoder(&self) -> &E { &self.encoder }

    /// Consumes the writer and returns the encoder.
    pub fn into_encoder(self) -> E { self.encoder }

    /// Serializes every admitted field of `object` in declaration order.
    ///
    /// Fields whose qualifiers are not admitted by the policy are skipped, as
    /// are fields whose current value is absent; neither contributes any
    /// bytes. Nested objects are written recursively with the same policy.
    ///
    /// # Errors
    ///
    /// Returns a [`SerializationError`] carrying the path of the failing
    /// field if a value cannot be read, the sink fails, the graph is cyclic,
    /// or it nests deeper than the configured limit. The bytes written before
    /// the failure stay in the sink.
    #[tracing::instrument(
        skip_all,
        level = "debug",
        name = "serialize",
        fields(type_name = %object.layout().name())
    )]
    pub fn serialize(
        &mut self,
        object: &dyn Struct,
    ) -> Result<(), SerializationError> {
        let mut session = Session::new(self.max_depth);

        self.serialize_in(object, &mut session).inspect_err(|error| {
            tracing::debug!(
                "serialization aborted at `{}`: {}",
                error.path(),
                error.kind()
            );
        })
    }

    /// Writes a single field of `instance`, reading it from `source`.
    ///
    /// This is the dispatch step [`serialize`](Self::serialize) performs for
    /// every admitted field, exposed for callers that drive the layout
    /// themselves. The inclusion policy is not consulted. `len` bounds the
    /// number of elements written when the field is an array and is ignored
    /// otherwise. An absent value writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::TypeMismatch`] (wrapped) if the value read does
    /// not have the field's declared type, and otherwise fails like
    /// [`serialize`](Self::serialize).
    pub fn write_field(
        &mut self,
        instance: &dyn Struct,
        field: &FieldDescriptor,
        source: ValueSource,
        len: LengthDirective,
    ) -> Result<(), SerializationError> {
        let mut session = Session::new(self.max_depth);

        session.enter(instance)?;
        let result =
            self.write_field_in(instance, field, source, len, &mut session);
        session.exit();

        result
    }

    /// Writes up to `len` booleans, one byte each.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_boolean_array(
        &mut self,
        buffer: &[bool],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_bool)
    }

    /// Writes up to `len` bytes with one bulk write.
    ///
    /// When nothing is to be written the sink is not touched at all.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_byte_array(
        &mut self,
        buffer: &[u8],
        len: LengthDirective,
    ) -> io::Result<()> {
        let count = len.resolve(buffer.len());
        if count == 0 {
            return Ok(());
        }

        self.encoder.emit_raw_bytes(&buffer[..count])
    }

    /// Writes up to `len` 16-bit integers.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_short_array(
        &mut self,
        buffer: &[i16],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_short)
    }

    /// Writes up to `len` 32-bit integers.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_int_array(
        &mut self,
        buffer: &[i32],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_int)
    }

    /// Writes up to `len` 64-bit integers.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_long_array(
        &mut self,
        buffer: &[i64],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_long)
    }

    /// Writes up to `len` characters as UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Propagates sink failures, and fails with
    /// [`io::ErrorKind::InvalidInput`] on a character outside the Basic
    /// Multilingual Plane.
    pub fn write_char_array(
        &mut self,
        buffer: &[char],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_char)
    }

    /// Writes up to `len` 32-bit floats.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_float_array(
        &mut self,
        buffer: &[f32],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_float)
    }

    /// Writes up to `len` 64-bit floats.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_double_array(
        &mut self,
        buffer: &[f64],
        len: LengthDirective,
    ) -> io::Result<()> {
        self.write_each(buffer, len, E::emit_double)
    }

    /// Serializes up to `len` objects back to back.
    ///
    /// An absent buffer, or a directive resolving to zero elements, writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AbsentElement`] (wrapped, with the element
    /// index as path) if an element inside the written range is `None`, and
    /// otherwise fails like [`serialize`](Self::serialize).
    pub fn write_object_array(
        &mut self,
        buffer: Option<&[Option<&dyn Struct>]>,
        len: LengthDirective,
    ) -> Result<(), SerializationError> {
        let mut session = Session::new(self.max_depth);

        self.write_object_array_in(buffer, len, &mut session)
    }

    fn write_each<T: Copy>(
        &mut self,
        buffer: &[T],
        len: LengthDirective,
        mut emit: impl FnMut(&mut E, T) -> io::Result<()>,
    ) -> io::Result<()> {
        let count = len.resolve(buffer.len());

        buffer[..count]
            .iter()
            .try_for_each(|item| emit(&mut self.encoder, *item))
    }

    fn serialize_in(
        &mut self,
        object: &dyn Struct,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        session.enter(object)?;
        let result = self.serialize_fields(object, session);
        session.exit();

        result
    }

    fn serialize_fields(
        &mut self,
        object: &dyn Struct,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        let layout = object.layout();

        for field in layout.fields() {
            if !field.visibility().admitted_by(self.policy) {
                tracing::trace!(
                    "skipping `{}.{}`: {:?} not admitted by {:?}",
                    layout.name(),
                    field.name(),
                    field.visibility(),
                    self.policy
                );
                continue;
            }

            self.write_field_in(
                object,
                field,
                ValueSource::for_field(field),
                LengthDirective::Full,
                session,
            )?;
        }

        Ok(())
    }

    fn write_field_in(
        &mut self,
        instance: &dyn Struct,
        field: &FieldDescriptor,
        source: ValueSource,
        len: LengthDirective,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        self.dispatch(instance, field, source, len, session)
            .map_err(|error| error.within_field(field.name()))
    }

    fn dispatch(
        &mut self,
        instance: &dyn Struct,
        field: &FieldDescriptor,
        source: ValueSource,
        len: LengthDirective,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        let Some(value) = source.read(instance, field)? else {
            tracing::trace!(
                "skipping `{}.{}`: value is absent",
                instance.layout().name(),
                field.name()
            );
            return Ok(());
        };

        match field.field_type() {
            FieldType::Scalar(kind) => self.write_scalar(kind, value, session),
            FieldType::Array(kind) => {
                self.write_array(kind, value, len, session)
            }
        }
    }

    fn write_scalar(
        &mut self,
        kind: Kind,
        value: Value<'_>,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        match (kind, value) {
            (Kind::Boolean, Value::Boolean(v)) => self.encoder.emit_bool(v)?,
            (Kind::Byte, Value::Byte(v)) => self.encoder.emit_byte(v)?,
            (Kind::Short, Value::Short(v)) => self.encoder.emit_short(v)?,
            (Kind::Int, Value::Int(v)) => self.encoder.emit_int(v)?,
            (Kind::Long, Value::Long(v)) => self.encoder.emit_long(v)?,
            (Kind::Char, Value::Char(v)) => self.encoder.emit_char(v)?,
            (Kind::Float, Value::Float(v)) => self.encoder.emit_float(v)?,
            (Kind::Double, Value::Double(v)) => self.encoder.emit_double(v)?,
            (Kind::Object, Value::Object(nested)) => {
                self.serialize_in(nested, session)?;
            }
            (kind, value) => {
                return Err(AccessError::TypeMismatch {
                    expected: FieldType::Scalar(kind),
                    found: value.field_type(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn write_array(
        &mut self,
        kind: Kind,
        value: Value<'_>,
        len: LengthDirective,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        let array = match value {
            Value::Array(array) => array,
            other => {
                return Err(AccessError::TypeMismatch {
                    expected: FieldType::Array(kind),
                    found: other.field_type(),
                }
                .into());
            }
        };

        match (kind, array) {
            (Kind::Boolean, ArrayValue::Boolean(items)) => {
                self.write_boolean_array(&items, len)?;
            }
            (Kind::Byte, ArrayValue::Byte(items)) => {
                self.write_byte_array(&items, len)?;
            }
            (Kind::Short, ArrayValue::Short(items)) => {
                self.write_short_array(&items, len)?;
            }
            (Kind::Int, ArrayValue::Int(items)) => {
                self.write_int_array(&items, len)?;
            }
            (Kind::Long, ArrayValue::Long(items)) => {
                self.write_long_array(&items, len)?;
            }
            (Kind::Char, ArrayValue::Char(items)) => {
                self.write_char_array(&items, len)?;
            }
            (Kind::Float, ArrayValue::Float(items)) => {
                self.write_float_array(&items, len)?;
            }
            (Kind::Double, ArrayValue::Double(items)) => {
                self.write_double_array(&items, len)?;
            }
            (Kind::Object, ArrayValue::Object(items)) => {
                self.write_object_array_in(
                    Some(items.as_slice()),
                    len,
                    session,
                )?;
            }
            (kind, array) => {
                return Err(AccessError::TypeMismatch {
                    expected: FieldType::Array(kind),
                    found: FieldType::Array(array.kind()),
                }
                .into());
            }
        }

        Ok(())
    }

    fn write_object_array_in(
        &mut self,
        buffer: Option<&[Option<&dyn Struct>]>,
        len: LengthDirective,
        session: &mut Session,
    ) -> Result<(), SerializationError> {
        let Some(buffer) = buffer else {
            return Ok(());
        };
        let count = len.resolve(buffer.len());

        for (index, element) in buffer[..count].iter().enumerate() {
            let Some(element) = element else {
                return Err(SerializationError::from(AccessError::AbsentElement)
                    .within_index(index));
            };

            self.serialize_in(*element, session)
                .map_err(|error| error.within_index(index))?;
        }

        Ok(())
    }
}

/// Serializes `object` into a fresh byte vector.
///
/// # Errors
///
/// Fails like [`StructWriter::serialize`]. Writing to a `Vec` never fails, so
/// every error comes from the object graph itself.
pub fn to_vec(
    object: &dyn Struct,
    configuration: Configuration,
) -> Result<Vec<u8>, SerializationError> {
    let mut writer =
        StructWriter::with_configuration(Vec::new(), configuration);
    writer.serialize(object)?;

    Ok(writer.into_inner())
}
