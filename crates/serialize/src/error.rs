//! Error types.
//!
//! Every failure during a top-level [`serialize`](crate::StructWriter::serialize)
//! call is reported as a single [`SerializationError`]. It wraps the original
//! cause ([`ErrorKind`]) and records the path of the field that was being
//! written when the failure happened, e.g. `header.sections[2].offset`.

use std::{collections::VecDeque, error::Error, fmt, io};

use crate::kind::FieldType;

/// A failure to read the value of a field.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The layout named a slot the instance does not know.
    #[error("slot {slot} is not part of the layout")]
    UnknownSlot {
        /// The requested slot.
        slot: usize,
    },

    /// The field was read through its accessor but none is registered.
    #[error("slot {slot} has no accessor")]
    NoAccessor {
        /// The requested slot.
        slot: usize,
    },

    /// The value read does not have the declared type.
    #[error("expected a value of type {expected}, found {found}")]
    TypeMismatch {
        /// The declared type of the field.
        expected: FieldType,
        /// The type of the value actually read.
        found: FieldType,
    },

    /// An element inside the written range of an object array is absent.
    #[error("array element is absent")]
    AbsentElement,

    /// The accessor method itself failed.
    #[error("accessor failed")]
    Getter(#[source] Box<dyn Error + Send + Sync>),
}

/// The cause of a [`SerializationError`].
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A value source could not be read.
    #[error("failed to read field value")]
    Access(#[from] AccessError),

    /// The sink rejected a write.
    #[error("failed to write to the sink")]
    Io(#[from] io::Error),

    /// A type descriptor does not name a writable type.
    #[error("type descriptor `{descriptor}` cannot be written")]
    UnsupportedType {
        /// The offending descriptor.
        descriptor: String,
    },

    /// An object was reached again while it was still being written.
    #[error("cyclic object graph through `{type_name}`")]
    CyclicGraph {
        /// The layout name of the object that closed the cycle.
        type_name: String,
    },

    /// The object graph nests deeper than the configured limit.
    #[error("object graph nests deeper than {limit} levels")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field.
    Field(String),

    /// An element of an array.
    Index(usize),
}

/// The location of a field relative to the top-level object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: VecDeque<PathSegment>,
}

impl FieldPath {
    /// The segments from the outermost field inwards.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns `true` if the failure happened on the top-level object itself.
    #[must_use]
    pub fn is_root(&self) -> bool { self.segments.is_empty() }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }

        Ok(())
    }
}

/// The error returned by every serialization entry point.
///
/// The bytes already written to the sink by the failed call are unusable.
#[derive(Debug, thiserror::Error)]
#[error("failed to serialize `{path}`")]
pub struct SerializationError {
    path: FieldPath,
    #[source]
    kind: ErrorKind,
}

impl SerializationError {
    /// The wrapped cause.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind { &self.kind }

    /// Consumes the error and returns the wrapped cause.
    #[must_use]
    pub fn into_kind(self) -> ErrorKind { self.kind }

    /// Where in the object graph the failure happened.
    #[must_use]
    pub const fn path(&self) -> &FieldPath { &self.path }

    pub(crate) fn within_field(mut self, name: &str) -> Self {
        self.path.segments.push_front(PathSegment::Field(name.to_owned()));
        self
    }

    pub(crate) fn within_index(mut self, index: usize) -> Self {
        self.path.segments.push_front(PathSegment::Index(index));
        self
    }
}

impl From<ErrorKind> for SerializationError {
    fn from(kind: ErrorKind) -> Self { Self { path: FieldPath::default(), kind } }
}

impl From<AccessError> for SerializationError {
    fn from(error: AccessError) -> Self { ErrorKind::from(error).into() }
}

impl From<io::Error> for SerializationError {
    fn from(error: io::Error) -> Self { ErrorKind::from(error).into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    #[test]
    fn path_display() {
        let error = SerializationError::from(AccessError::AbsentElement)
            .within_field("value")
            .within_index(2)
            .within_field("inner")
            .within_field("outer");

        assert_eq!(error.path().to_string(), "outer.inner[2].value");
        assert_eq!(
            error.to_string(),
            "failed to serialize `outer.inner[2].value`"
        );
    }

    #[test]
    fn root_path() {
        let error = SerializationError::from(ErrorKind::DepthExceeded {
            limit: 4,
        });

        assert!(error.path().is_root());
        assert_eq!(error.path().to_string(), "<root>");
    }

    #[test]
    fn source_chain() {
        let error = SerializationError::from(AccessError::TypeMismatch {
            expected: FieldType::Scalar(Kind::Int),
            found: FieldType::Array(Kind::Int),
        });

        let kind = error.source().unwrap();
        assert_eq!(kind.to_string(), "failed to read field value");

        let access = kind.source().unwrap();
        assert_eq!(
            access.to_string(),
            "expected a value of type int, found int[]"
        );
    }
}
