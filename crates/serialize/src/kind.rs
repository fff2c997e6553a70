//! Type classification.
//!
//! Every field of a serializable type is classified once, when its layout is
//! built, into a [`FieldType`]: either a single value of some [`Kind`] or an
//! array whose elements share a [`Kind`]. The engine dispatches on this
//! classification rather than on the value it reads.
//!
//! Types laid out by `#[derive(Struct)]` get their classification at compile
//! time through [`FieldValue::FIELD_TYPE`](crate::FieldValue::FIELD_TYPE).
//! Runtime-built layouts (see [`Record`](crate::Record)) classify textual
//! type tokens with [`Kind::from_type_name`] and
//! [`FieldType::from_descriptor`].

use std::fmt;

/// The nine kinds a field or array element can be classified as.
///
/// Anything that is not one of the eight primitives is an [`Kind::Object`]:
/// a nested struct that is serialized recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// One byte, `0x00` or `0x01`.
    Boolean,
    /// 8-bit integer.
    Byte,
    /// 16-bit integer.
    Short,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// 16-bit character code unit.
    Char,
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 float.
    Double,
    /// A nested struct.
    Object,
}

impl Kind {
    /// Classifies a primitive type name.
    ///
    /// Recognizes `boolean`, `byte`, `short`, `int`, `long`, `char`, `float`
    /// and `double`. Any other name classifies as [`Kind::Object`].
    #[must_use]
    pub const fn from_type_name(name: &str) -> Self {
        let name = name.as_bytes();

        if bytes_eq(name, b"boolean") {
            Self::Boolean
        } else if bytes_eq(name, b"byte") {
            Self::Byte
        } else if bytes_eq(name, b"short") {
            Self::Short
        } else if bytes_eq(name, b"int") {
            Self::Int
        } else if bytes_eq(name, b"long") {
            Self::Long
        } else if bytes_eq(name, b"char") {
            Self::Char
        } else if bytes_eq(name, b"float") {
            Self::Float
        } else if bytes_eq(name, b"double") {
            Self::Double
        } else {
            Self::Object
        }
    }

    /// Classifies a single-character element code of an array descriptor.
    ///
    /// The codes are `Z` (boolean), `B` (byte), `S` (short), `I` (int), `J`
    /// (long), `C` (char), `F` (float) and `D` (double). Any other code,
    /// including `L` for class types and `[` for nested arrays, classifies as
    /// [`Kind::Object`].
    #[must_use]
    pub const fn from_descriptor_code(code: u8) -> Self {
        match code {
            b'Z' => Self::Boolean,
            b'B' => Self::Byte,
            b'S' => Self::Short,
            b'I' => Self::Int,
            b'J' => Self::Long,
            b'C' => Self::Char,
            b'F' => Self::Float,
            b'D' => Self::Double,
            _ => Self::Object,
        }
    }

    /// The encoded width of one value of this kind in bytes, or `None` for
    /// [`Kind::Object`] whose width depends on its fields.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Boolean | Self::Byte => Some(1),
            Self::Short | Self::Char => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            Self::Object => None,
        }
    }

    /// Returns `true` for the eight primitive kinds.
    #[must_use]
    pub const fn is_primitive(self) -> bool { !matches!(self, Self::Object) }

    /// The canonical lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldType {
    /// A single value of the given kind.
    Scalar(Kind),

    /// An array whose elements are of the given kind.
    Array(Kind),
}

impl FieldType {
    /// A nested struct field.
    pub const OBJECT: Self = Self::Scalar(Kind::Object);

    /// Classifies a type descriptor.
    ///
    /// A descriptor beginning with `[` is an array; its element kind is
    /// derived from the character that follows with
    /// [`Kind::from_descriptor_code`]. Every other descriptor is a scalar
    /// classified by name with [`Kind::from_type_name`].
    ///
    /// ```ignore
    /// use wirestruct_serialize::{FieldType, Kind};
    ///
    /// assert_eq!(FieldType::from_descriptor("int"), FieldType::Scalar(Kind::Int));
    /// assert_eq!(FieldType::from_descriptor("[B"), FieldType::Array(Kind::Byte));
    /// assert_eq!(FieldType::from_descriptor("[Lpkg.Point;"), FieldType::Array(Kind::Object));
    /// ```
    #[must_use]
    pub const fn from_descriptor(descriptor: &str) -> Self {
        match descriptor.as_bytes() {
            [b'[', code, ..] => Self::Array(Kind::from_descriptor_code(*code)),
            [b'['] => Self::Array(Kind::Object),
            _ => Self::Scalar(Kind::from_type_name(descriptor)),
        }
    }

    /// The kind of the value, or of each element for arrays.
    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Scalar(kind) | Self::Array(kind) => kind,
        }
    }

    /// Returns `true` if this is an array type.
    #[must_use]
    pub const fn is_array(self) -> bool { matches!(self, Self::Array(_)) }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Array(kind) => write!(f, "{kind}[]"),
        }
    }
}

const fn bytes_eq(lhs: &[u8], rhs: &[u8]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut i = 0;
    while i < lhs.len() {
        if lhs[i] != rhs[i] {
            return false;
        }
        i += 1;
    }

    true
}
