//! Writer configuration.
//!
//! A [`Configuration`] is fixed when a [`StructWriter`](crate::StructWriter)
//! is constructed:
//!
//! - **Byte order**: the order of every multi-byte primitive. There is no
//!   per-field override.
//! - **Inclusion policy**: which field qualifiers are eligible for output.
//! - **Maximum depth**: how deeply objects may nest before the call fails.
//!
//! # Example
//!
//! ```ignore
//! use wirestruct_serialize::{ByteOrder, Configuration, Visibility};
//!
//! let configuration = Configuration::builder()
//!     .byte_order(ByteOrder::LittleEndian)
//!     .policy(Visibility::PUBLIC)
//!     .build();
//! ```

use bon::Builder;

use crate::{encode::ByteOrder, field::Visibility};

/// The default maximum nesting depth of an object graph.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration options for a [`StructWriter`](crate::StructWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Builder)]
pub struct Configuration {
    /// The byte order of every multi-byte primitive.
    ///
    /// Defaults to big-endian.
    #[builder(default)]
    pub byte_order: ByteOrder,

    /// The set of qualifiers a field may carry to be written.
    ///
    /// Defaults to [`Visibility::DEFAULT_POLICY`]: public, private, protected
    /// and package fields, but not transient ones.
    #[builder(default = Visibility::DEFAULT_POLICY)]
    pub policy: Visibility,

    /// The maximum number of objects on one recursion path, the top-level
    /// object included.
    ///
    /// Graphs nesting deeper fail with
    /// [`ErrorKind::DepthExceeded`](crate::ErrorKind::DepthExceeded) instead
    /// of exhausting the stack.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for Configuration {
    fn default() -> Self { Self::builder().build() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let configuration = Configuration::default();

        assert_eq!(configuration.byte_order, ByteOrder::BigEndian);
        assert_eq!(configuration.policy, Visibility::DEFAULT_POLICY);
        assert_eq!(configuration.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn builder_overrides() {
        let configuration = Configuration::builder()
            .byte_order(ByteOrder::LittleEndian)
            .policy(Visibility::PUBLIC | Visibility::TRANSIENT)
            .max_depth(3)
            .build();

        assert_eq!(configuration.byte_order, ByteOrder::LittleEndian);
        assert!(!Visibility::PRIVATE.admitted_by(configuration.policy));
        assert_eq!(configuration.max_depth, 3);
    }
}
