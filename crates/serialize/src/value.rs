//! Field values and the traits that produce them.
//!
//! [`Value`] is what a [`ValueSource`](crate::ValueSource) hands to the
//! engine: one primitive, one nested object, or one array. Arrays borrow their
//! elements when the field stores them in the canonical element type and own
//! a converted copy otherwise (unsigned integers are reinterpreted as their
//! signed counterparts of the same width).
//!
//! Three traits connect Rust types to values:
//!
//! - [`FieldValue`] is implemented by every type that can be a field. Its
//!   [`FIELD_TYPE`](FieldValue::FIELD_TYPE) constant is the compile-time
//!   classification used in derived layouts.
//! - [`Element`] is implemented by every type that can be an array element.
//! - [`Accessed`] is implemented by every type an accessor method may
//!   return.

use std::{borrow::Cow, error::Error};

use crate::{
    error::AccessError,
    field::Struct,
    kind::{FieldType, Kind},
};

/// The current value of one field.
#[derive(Clone)]
pub enum Value<'a> {
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
    /// A nested struct.
    Object(&'a dyn Struct),
    /// An array of any kind.
    Array(ArrayValue<'a>),
}

impl Value<'_> {
    /// The type this value would be classified as.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Boolean(_) => FieldType::Scalar(Kind::Boolean),
            Self::Byte(_) => FieldType::Scalar(Kind::Byte),
            Self::Short(_) => FieldType::Scalar(Kind::Short),
            Self::Int(_) => FieldType::Scalar(Kind::Int),
            Self::Long(_) => FieldType::Scalar(Kind::Long),
            Self::Char(_) => FieldType::Scalar(Kind::Char),
            Self::Float(_) => FieldType::Scalar(Kind::Float),
            Self::Double(_) => FieldType::Scalar(Kind::Double),
            Self::Object(_) => FieldType::OBJECT,
            Self::Array(array) => FieldType::Array(array.kind()),
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Self::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            Self::Short(v) => f.debug_tuple("Short").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Self::Object(v) => {
                f.debug_tuple("Object").field(&v.layout().name()).finish()
            }
            Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
        }
    }
}

/// The elements of an array field.
#[derive(Clone)]
pub enum ArrayValue<'a> {
    /// `boolean[]`
    Boolean(Cow<'a, [bool]>),
    /// `byte[]`
    Byte(Cow<'a, [u8]>),
    /// `short[]`
    Short(Cow<'a, [i16]>),
    /// `int[]`
    Int(Cow<'a, [i32]>),
    /// `long[]`
    Long(Cow<'a, [i64]>),
    /// `char[]`
    Char(Cow<'a, [char]>),
    /// `float[]`
    Float(Cow<'a, [f32]>),
    /// `double[]`
    Double(Cow<'a, [f64]>),
    /// An array of nested structs. `None` marks an absent element.
    Object(Vec<Option<&'a dyn Struct>>),
}

impl ArrayValue<'_> {
    /// The kind of the elements.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Boolean(_) => Kind::Boolean,
            Self::Byte(_) => Kind::Byte,
            Self::Short(_) => Kind::Short,
            Self::Int(_) => Kind::Int,
            Self::Long(_) => Kind::Long,
            Self::Char(_) => Kind::Char,
            Self::Float(_) => Kind::Float,
            Self::Double(_) => Kind::Double,
            Self::Object(_) => Kind::Object,
        }
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Object(v) => v.len(),
        }
    }

    /// Returns `true` if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Borrows the elements without copying them.
    #[must_use]
    pub fn reborrow(&self) -> ArrayValue<'_> {
        match self {
            Self::Boolean(v) => ArrayValue::Boolean(Cow::Borrowed(&**v)),
            Self::Byte(v) => ArrayValue::Byte(Cow::Borrowed(&**v)),
            Self::Short(v) => ArrayValue::Short(Cow::Borrowed(&**v)),
            Self::Int(v) => ArrayValue::Int(Cow::Borrowed(&**v)),
            Self::Long(v) => ArrayValue::Long(Cow::Borrowed(&**v)),
            Self::Char(v) => ArrayValue::Char(Cow::Borrowed(&**v)),
            Self::Float(v) => ArrayValue::Float(Cow::Borrowed(&**v)),
            Self::Double(v) => ArrayValue::Double(Cow::Borrowed(&**v)),
            Self::Object(v) => ArrayValue::Object(v.clone()),
        }
    }
}

impl std::fmt::Debug for ArrayValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayValue")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .finish()
    }
}

/// A type that can be the declared type of a struct field.
///
/// Implemented for the primitive types, `Option<T>` (absent when `None`),
/// `Box<T>`, `Vec<E>` and `[E; N]` for any [`Element`], and for every type
/// deriving `Struct`.
///
/// | Rust type        | Classified as |
/// |------------------|---------------|
/// | `bool`           | `boolean`     |
/// | `i8`, `u8`       | `byte`        |
/// | `i16`, `u16`     | `short`       |
/// | `i32`, `u32`     | `int`         |
/// | `i64`, `u64`     | `long`        |
/// | `char`           | `char`        |
/// | `f32`            | `float`       |
/// | `f64`            | `double`      |
pub trait FieldValue {
    /// The declared type of a field of this type.
    const FIELD_TYPE: FieldType;

    /// The current value, or `None` when absent.
    fn value(&self) -> Option<Value<'_>>;
}

/// A type that can be the element of an array field.
pub trait Element: Sized {
    /// The kind of each element.
    const KIND: Kind;

    /// Views a slice of elements as an array value.
    fn array(items: &[Self]) -> ArrayValue<'_>;
}

/// A primitive element whose arrays can be moved into an owned value.
///
/// Accessor methods returning `Vec<E>` rely on this.
pub trait PrimitiveElement: Element {
    /// Converts owned elements into an array value.
    fn into_array(items: Vec<Self>) -> ArrayValue<'static>;
}

/// A type an accessor method may return.
///
/// Accessors can return primitives and primitive `Vec`s by value, any
/// [`FieldValue`] by reference, and `Option` or `Result` wrappers around any
/// of those. An `Err` from the accessor surfaces as
/// [`AccessError::Getter`].
pub trait Accessed<'a> {
    /// Converts the accessor's return value into a field value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Getter`] if the accessor itself failed.
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError>;
}

impl<'a, T: FieldValue + ?Sized> Accessed<'a> for &'a T {
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        Ok(self.value())
    }
}

impl<'a, A: Accessed<'a>> Accessed<'a> for Option<A> {
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        self.map_or(Ok(None), Accessed::into_value)
    }
}

impl<'a, A: Accessed<'a>, E: Into<Box<dyn Error + Send + Sync>>> Accessed<'a>
    for Result<A, E>
{
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        self.map_err(|source| AccessError::Getter(source.into()))?
            .into_value()
    }
}

impl<'a, E: PrimitiveElement> Accessed<'a> for Vec<E> {
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        Ok(Some(Value::Array(E::into_array(self))))
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;

    fn value(&self) -> Option<Value<'_>> { (**self).value() }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;

    fn value(&self) -> Option<Value<'_>> { (**self).value() }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;

    fn value(&self) -> Option<Value<'_>> {
        self.as_ref().and_then(FieldValue::value)
    }
}

impl<E: Element> FieldValue for Vec<E> {
    const FIELD_TYPE: FieldType = FieldType::Array(E::KIND);

    fn value(&self) -> Option<Value<'_>> { Some(Value::Array(E::array(self))) }
}

impl<E: Element, const N: usize> FieldValue for [E; N] {
    const FIELD_TYPE: FieldType = FieldType::Array(E::KIND);

    fn value(&self) -> Option<Value<'_>> { Some(Value::Array(E::array(self))) }
}

impl<E: Element> FieldValue for [E] {
    const FIELD_TYPE: FieldType = FieldType::Array(E::KIND);

    fn value(&self) -> Option<Value<'_>> { Some(Value::Array(E::array(self))) }
}

impl<T: Struct> Element for Option<T> {
    const KIND: Kind = Kind::Object;

    fn array(items: &[Self]) -> ArrayValue<'_> {
        ArrayValue::Object(
            items
                .iter()
                .map(|item| item.as_ref().map(|item| item as &dyn Struct))
                .collect(),
        )
    }
}

// =============================================================================
// Implementations for primitive types
// =============================================================================

/// Primitives stored in the canonical element type of their array variant:
/// arrays of these are borrowed.
macro_rules! canonical_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::Scalar(Kind::$kind);

            fn value(&self) -> Option<Value<'_>> { Some(Value::$kind(*self)) }
        }

        impl<'a> Accessed<'a> for $ty {
            fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
                Ok(Some(Value::$kind(self)))
            }
        }

        impl Element for $ty {
            const KIND: Kind = Kind::$kind;

            fn array(items: &[Self]) -> ArrayValue<'_> {
                ArrayValue::$kind(Cow::Borrowed(items))
            }
        }

        impl PrimitiveElement for $ty {
            fn into_array(items: Vec<Self>) -> ArrayValue<'static> {
                ArrayValue::$kind(Cow::Owned(items))
            }
        }
    )*};
}

canonical_primitive! {
    bool => Boolean,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    char => Char,
    f32 => Float,
    f64 => Double,
}

/// Primitives that are reinterpreted as a same-width type before encoding:
/// arrays of these are copied.
macro_rules! reinterpreted_primitive {
    ($($ty:ty as $repr:ty => $kind:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::Scalar(Kind::$kind);

            #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
            fn value(&self) -> Option<Value<'_>> {
                Some(Value::$kind(*self as _))
            }
        }

        impl<'a> Accessed<'a> for $ty {
            #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
            fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
                Ok(Some(Value::$kind(self as _)))
            }
        }

        impl Element for $ty {
            const KIND: Kind = Kind::$kind;

            #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
            fn array(items: &[Self]) -> ArrayValue<'_> {
                ArrayValue::$kind(Cow::Owned(
                    items.iter().map(|item| *item as $repr).collect(),
                ))
            }
        }

        impl PrimitiveElement for $ty {
            #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
            fn into_array(items: Vec<Self>) -> ArrayValue<'static> {
                ArrayValue::$kind(Cow::Owned(
                    items.into_iter().map(|item| item as $repr).collect(),
                ))
            }
        }
    )*};
}

reinterpreted_primitive! {
    u16 as i16 => Short,
    u32 as i32 => Int,
    u64 as i64 => Long,
}

// Byte arrays are stored unsigned so the bulk path can hand them to the sink
// unchanged; scalar bytes are signed.

impl FieldValue for u8 {
    const FIELD_TYPE: FieldType = FieldType::Scalar(Kind::Byte);

    #[allow(clippy::cast_possible_wrap)]
    fn value(&self) -> Option<Value<'_>> { Some(Value::Byte(*self as i8)) }
}

impl<'a> Accessed<'a> for u8 {
    #[allow(clippy::cast_possible_wrap)]
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        Ok(Some(Value::Byte(self as i8)))
    }
}

impl Element for u8 {
    const KIND: Kind = Kind::Byte;

    fn array(items: &[Self]) -> ArrayValue<'_> {
        ArrayValue::Byte(Cow::Borrowed(items))
    }
}

impl PrimitiveElement for u8 {
    fn into_array(items: Vec<Self>) -> ArrayValue<'static> {
        ArrayValue::Byte(Cow::Owned(items))
    }
}

impl FieldValue for i8 {
    const FIELD_TYPE: FieldType = FieldType::Scalar(Kind::Byte);

    fn value(&self) -> Option<Value<'_>> { Some(Value::Byte(*self)) }
}

impl<'a> Accessed<'a> for i8 {
    fn into_value(self) -> Result<Option<Value<'a>>, AccessError> {
        Ok(Some(Value::Byte(self)))
    }
}

impl Element for i8 {
    const KIND: Kind = Kind::Byte;

    #[allow(clippy::cast_sign_loss)]
    fn array(items: &[Self]) -> ArrayValue<'_> {
        ArrayValue::Byte(Cow::Owned(
            items.iter().map(|item| *item as u8).collect(),
        ))
    }
}

impl PrimitiveElement for i8 {
    #[allow(clippy::cast_sign_loss)]
    fn into_array(items: Vec<Self>) -> ArrayValue<'static> {
        ArrayValue::Byte(Cow::Owned(
            items.into_iter().map(|item| item as u8).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_time_classification() {
        assert_eq!(<bool as FieldValue>::FIELD_TYPE, FieldType::Scalar(Kind::Boolean));
        assert_eq!(<u8 as FieldValue>::FIELD_TYPE, FieldType::Scalar(Kind::Byte));
        assert_eq!(<u16 as FieldValue>::FIELD_TYPE, FieldType::Scalar(Kind::Short));
        assert_eq!(<i64 as FieldValue>::FIELD_TYPE, FieldType::Scalar(Kind::Long));
        assert_eq!(<Option<f32> as FieldValue>::FIELD_TYPE, FieldType::Scalar(Kind::Float));
        assert_eq!(<Vec<char> as FieldValue>::FIELD_TYPE, FieldType::Array(Kind::Char));
        assert_eq!(<[u8; 4] as FieldValue>::FIELD_TYPE, FieldType::Array(Kind::Byte));
        assert_eq!(
            <Option<Vec<f64>> as FieldValue>::FIELD_TYPE,
            FieldType::Array(Kind::Double)
        );
    }

    #[test]
    fn unsigned_values_are_reinterpreted() {
        assert!(matches!(0xffu8.value(), Some(Value::Byte(-1))));
        assert!(matches!(0xffffu16.value(), Some(Value::Short(-1))));
        assert!(matches!(u32::MAX.value(), Some(Value::Int(-1))));
        assert!(matches!(u64::MAX.value(), Some(Value::Long(-1))));

        let data = vec![1u32, u32::MAX];
        let Some(Value::Array(ArrayValue::Int(ints))) = data.value() else {
            panic!("expected an int array");
        };
        assert_eq!(&*ints, &[1, -1]);
    }

    #[test]
    fn canonical_arrays_are_borrowed() {
        let data = vec![1i32, 2, 3];
        let Some(Value::Array(ArrayValue::Int(ints))) = data.value() else {
            panic!("expected an int array");
        };
        assert!(matches!(ints, Cow::Borrowed(_)));

        let bytes = [1u8, 2];
        let Some(Value::Array(ArrayValue::Byte(bytes))) = bytes.value() else {
            panic!("expected a byte array");
        };
        assert!(matches!(bytes, Cow::Borrowed(_)));
    }

    #[test]
    fn absent_options() {
        let none: Option<i32> = None;
        assert!(none.value().is_none());
        assert!(matches!(Some(7i32).value(), Some(Value::Int(7))));
    }

    #[test]
    fn accessed_results() {
        let ok: Result<i32, std::io::Error> = Ok(5);
        assert!(matches!(ok.into_value(), Ok(Some(Value::Int(5)))));

        let err: Result<i32, std::io::Error> =
            Err(std::io::Error::other("boom"));
        assert!(matches!(err.into_value(), Err(AccessError::Getter(_))));

        let owned = vec![1i16, 2].into_value().unwrap();
        assert!(matches!(
            owned,
            Some(Value::Array(ArrayValue::Short(Cow::Owned(_))))
        ));
    }
}
