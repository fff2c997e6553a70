//! Per-call bookkeeping for recursive serialization.
//!
//! A [`Session`] lives for exactly one top-level write. It tracks the objects
//! on the current recursion path so that a cyclic object graph fails fast with
//! [`ErrorKind::CyclicGraph`] instead of recursing until the stack overflows,
//! and it bounds the nesting depth.
//!
//! # Object Identity
//!
//! An object is identified by its address together with the address of its
//! layout. The layout is part of the key because a struct and its first field
//! can share an address; they never share a layout.

use crate::{error::ErrorKind, field::Struct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ObjectKey {
    object: *const (),
    layout: *const (),
}

impl ObjectKey {
    fn of(object: &dyn Struct) -> Self {
        Self {
            object: std::ptr::from_ref(object).cast::<()>(),
            layout: std::ptr::from_ref(object.layout()).cast::<()>(),
        }
    }
}

/// Tracks the objects currently being written.
///
/// Not designed for concurrent access; a session belongs to one call on one
/// thread.
#[derive(Debug)]
pub(crate) struct Session {
    /// Objects entered but not yet exited, outermost first.
    active: Vec<ObjectKey>,
    max_depth: usize,
}

impl Session {
    /// Creates a new, empty session.
    pub(crate) const fn new(max_depth: usize) -> Self {
        Self { active: Vec::new(), max_depth }
    }

    /// Marks `object` as being written.
    ///
    /// Fails if `object` is already on the path or if entering it would
    /// exceed the depth limit. On failure nothing is recorded.
    pub(crate) fn enter(&mut self, object: &dyn Struct) -> Result<(), ErrorKind> {
        if self.active.len() >= self.max_depth {
            return Err(ErrorKind::DepthExceeded { limit: self.max_depth });
        }

        let key = ObjectKey::of(object);
        if self.active.contains(&key) {
            return Err(ErrorKind::CyclicGraph {
                type_name: object.layout().name().to_owned(),
            });
        }

        self.active.push(key);
        Ok(())
    }

    /// Marks the innermost object as finished.
    pub(crate) fn exit(&mut self) { self.active.pop(); }
}
