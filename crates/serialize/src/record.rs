//! Objects whose layout is built at runtime.
//!
//! A [`Record`] declares each field with a textual type descriptor such as
//! `"int"`, `"[B"` or `"[Lcom.example.Point;"` and classifies it with
//! [`FieldType::from_descriptor`]. Values are stored as [`Datum`]s. Records are
//! written by the same engine as derived types, so they are useful for
//! describing structures that are only known at runtime, and for building
//! objects whose stored values disagree with their declared types.
//!
//! ```ignore
//! use wirestruct_serialize::{Record, Visibility, to_vec};
//!
//! let record = Record::new("Packet")
//!     .with_field("a", "int", Visibility::PUBLIC, 300i32)?
//!     .with_field("b", "[B", Visibility::PUBLIC, vec![1u8, 2, 3])?;
//!
//! assert_eq!(
//!     to_vec(&record, Default::default())?,
//!     [0x00, 0x00, 0x01, 0x2c, 0x01, 0x02, 0x03]
//! );
//! ```

use std::{borrow::Cow, fmt};

use crate::{
    error::{AccessError, ErrorKind},
    field::{FieldDescriptor, Layout, Struct, Visibility},
    kind::FieldType,
    value::{ArrayValue, PrimitiveElement, Value},
};

/// The stored value of one record field.
pub enum Datum {
    /// An absent value; the field is skipped when written.
    Null,
    /// A `boolean`.
    Boolean(bool),
    /// A `byte`.
    Byte(i8),
    /// A `short`.
    Short(i16),
    /// An `int`.
    Int(i32),
    /// A `long`.
    Long(i64),
    /// A `char`.
    Char(char),
    /// A `float`.
    Float(f32),
    /// A `double`.
    Double(f64),
    /// A primitive array.
    Array(ArrayValue<'static>),
    /// A nested object.
    Object(Box<dyn Struct>),
    /// An array of nested objects. `None` marks an absent element.
    ObjectArray(Vec<Option<Box<dyn Struct>>>),
}

impl Datum {
    /// Views the stored value as a field value, `None` for [`Datum::Null`].
    #[must_use]
    pub fn as_value(&self) -> Option<Value<'_>> {
        Some(match self {
            Self::Null => return None,
            Self::Boolean(v) => Value::Boolean(*v),
            Self::Byte(v) => Value::Byte(*v),
            Self::Short(v) => Value::Short(*v),
            Self::Int(v) => Value::Int(*v),
            Self::Long(v) => Value::Long(*v),
            Self::Char(v) => Value::Char(*v),
            Self::Float(v) => Value::Float(*v),
            Self::Double(v) => Value::Double(*v),
            Self::Array(array) => Value::Array(array.reborrow()),
            Self::Object(object) => Value::Object(&**object),
            Self::ObjectArray(items) => Value::Array(ArrayValue::Object(
                items
                    .iter()
                    .map(|item| item.as_deref().map(|item| item as &dyn Struct))
                    .collect(),
            )),
        })
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_value() {
            Some(value) => value.fmt(f),
            None => f.write_str("Null"),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Datum {
    fn from(value: Option<T>) -> Self { value.map_or(Self::Null, Into::into) }
}

impl<E: PrimitiveElement> From<Vec<E>> for Datum {
    fn from(items: Vec<E>) -> Self { Self::Array(E::into_array(items)) }
}

impl From<Record> for Datum {
    fn from(record: Record) -> Self { Self::Object(Box::new(record)) }
}

impl From<Vec<Option<Record>>> for Datum {
    fn from(records: Vec<Option<Record>>) -> Self {
        Self::ObjectArray(
            records
                .into_iter()
                .map(|record| {
                    record.map(|record| Box::new(record) as Box<dyn Struct>)
                })
                .collect(),
        )
    }
}

macro_rules! datum_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Datum {
            #[allow(clippy::cast_possible_wrap)]
            fn from(value: $ty) -> Self { Self::$variant(value as _) }
        }
    )*};
}

datum_from! {
    bool => Boolean,
    i8 => Byte,
    u8 => Byte,
    i16 => Short,
    u16 => Short,
    i32 => Int,
    u32 => Int,
    i64 => Long,
    u64 => Long,
    char => Char,
    f32 => Float,
    f64 => Double,
}

/// A named object with a runtime-built layout.
#[derive(Debug)]
pub struct Record {
    layout: Layout,
    data: Vec<Datum>,
}

impl Record {
    /// Creates a record with no fields.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { layout: Layout::owned(name, Vec::new()), data: Vec::new() }
    }

    /// Appends a field and returns the record, for chaining.
    ///
    /// # Errors
    ///
    /// See [`push_field`](Self::push_field).
    pub fn with_field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        descriptor: &str,
        visibility: Visibility,
        datum: impl Into<Datum>,
    ) -> Result<Self, ErrorKind> {
        self.push_field(name, descriptor, visibility, datum)?;

        Ok(self)
    }

    /// Appends a field declared with a type descriptor.
    ///
    /// The datum is not checked against the descriptor here; a value of the
    /// wrong shape surfaces as [`AccessError::TypeMismatch`] when the record
    /// is written.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnsupportedType`] if the descriptor is empty, a
    /// bare `[`, or a multi-dimensional array.
    pub fn push_field(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        descriptor: &str,
        visibility: Visibility,
        datum: impl Into<Datum>,
    ) -> Result<(), ErrorKind> {
        if matches!(descriptor.as_bytes(), [] | [b'['] | [b'[', b'[', ..]) {
            return Err(ErrorKind::UnsupportedType {
                descriptor: descriptor.to_owned(),
            });
        }

        let slot = self.data.len();
        self.layout.push(FieldDescriptor::owned(
            name,
            slot,
            FieldType::from_descriptor(descriptor),
            visibility,
        ));
        self.data.push(datum.into());

        Ok(())
    }

    /// The stored value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Datum> {
        self.layout.field(name).and_then(|field| self.data.get(field.slot()))
    }

    /// Replaces the stored value of the named field, returning the previous
    /// one. Returns `None` and stores nothing if there is no such field.
    pub fn set(
        &mut self,
        name: &str,
        datum: impl Into<Datum>,
    ) -> Option<Datum> {
        let slot = self.layout.field(name)?.slot();
        let stored = self.data.get_mut(slot)?;

        Some(std::mem::replace(stored, datum.into()))
    }
}

impl Struct for Record {
    fn layout(&self) -> &Layout { &self.layout }

    fn read_field(&self, slot: usize) -> Result<Option<Value<'_>>, AccessError> {
        self.data
            .get(slot)
            .map(Datum::as_value)
            .ok_or(AccessError::UnknownSlot { slot })
    }
}
