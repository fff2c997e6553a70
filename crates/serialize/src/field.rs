//! Field descriptors and the [`Struct`] trait.
//!
//! A serializable type declares its layout up front: an ordered list of
//! [`FieldDescriptor`]s, one per field, carrying the field's name, declared
//! [`FieldType`], [`Visibility`] and optional accessor. The engine walks this
//! table instead of inspecting values at runtime.
//!
//! Values are read through a [`ValueSource`], which either reads the stored
//! field directly or calls the field's registered accessor method. Both paths
//! produce the same [`Value`], so the engine does not care which one is bound.

use std::borrow::Cow;

use bitflags::bitflags;

use crate::{error::AccessError, kind::FieldType, value::Value};

bitflags! {
    /// The access qualifiers of a field.
    ///
    /// A field normally carries exactly one of the four visibility
    /// qualifiers. [`Visibility::TRANSIENT`] is an extra modifier that keeps
    /// a field out of the output unless the inclusion policy explicitly
    /// admits it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Visibility: u8 {
        /// Visible everywhere (`pub`).
        const PUBLIC = 1 << 0;
        /// Visible only to the declaring type.
        const PRIVATE = 1 << 1;
        /// Visible to the declaring type and its extensions.
        const PROTECTED = 1 << 2;
        /// Visible within the declaring package or crate (`pub(crate)`).
        const PACKAGE = 1 << 3;
        /// Excluded from serialization by default.
        const TRANSIENT = 1 << 4;
    }
}

impl Visibility {
    /// The inclusion policy used when none is configured: every visibility
    /// qualifier, but not [`Visibility::TRANSIENT`].
    pub const DEFAULT_POLICY: Self = Self::PUBLIC
        .union(Self::PRIVATE)
        .union(Self::PROTECTED)
        .union(Self::PACKAGE);

    /// Returns `true` if a field with these qualifiers is eligible under the
    /// given inclusion policy.
    ///
    /// The field's qualifiers must lie entirely within the policy, and the
    /// combined set must not be empty.
    #[must_use]
    pub const fn admitted_by(self, policy: Self) -> bool {
        (self.bits() & !policy.bits()) == 0
            && (self.bits() | policy.bits()) != 0
    }
}

impl Default for Visibility {
    fn default() -> Self { Self::DEFAULT_POLICY }
}

/// Describes one named, typed slot of a serializable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    slot: usize,
    field_type: FieldType,
    visibility: Visibility,
    accessor: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    /// Creates a descriptor usable in `static` layout tables.
    ///
    /// `slot` is the index the owning type's [`Struct::read_field`] and
    /// [`Struct::read_accessor`] understand; for derived types it is the
    /// declaration index.
    #[must_use]
    pub const fn new(
        name: &'static str,
        slot: usize,
        field_type: FieldType,
        visibility: Visibility,
        accessor: Option<&'static str>,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            slot,
            field_type,
            visibility,
            accessor: match accessor {
                Some(accessor) => Some(Cow::Borrowed(accessor)),
                None => None,
            },
        }
    }

    /// Creates a descriptor with an owned name, for layouts built at runtime.
    #[must_use]
    pub fn owned(
        name: impl Into<Cow<'static, str>>,
        slot: usize,
        field_type: FieldType,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            slot,
            field_type,
            visibility,
            accessor: None,
        }
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// The slot index passed back to the owning type when reading.
    #[must_use]
    pub const fn slot(&self) -> usize { self.slot }

    /// The declared type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType { self.field_type }

    /// The access qualifiers.
    #[must_use]
    pub const fn visibility(&self) -> Visibility { self.visibility }

    /// The name of the accessor method bound to this field, if any.
    #[must_use]
    pub fn accessor(&self) -> Option<&str> { self.accessor.as_deref() }
}

/// The ordered field table of one serializable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    name: Cow<'static, str>,
    fields: Cow<'static, [FieldDescriptor]>,
}

impl Layout {
    /// Creates a layout usable in `static` items.
    #[must_use]
    pub const fn new(
        name: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self { name: Cow::Borrowed(name), fields: Cow::Borrowed(fields) }
    }

    /// Creates a layout built at runtime.
    #[must_use]
    pub fn owned(
        name: impl Into<Cow<'static, str>>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self { name: name.into(), fields: Cow::Owned(fields) }
    }

    /// The name of the type this layout belongs to.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] { &self.fields }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub(crate) fn push(&mut self, field: FieldDescriptor) {
        self.fields.to_mut().push(field);
    }
}

/// A type whose instances can be written as a C-style struct.
///
/// Implementations are normally generated with `#[derive(Struct)]`:
///
/// ```ignore
/// use wirestruct_serialize::Struct;
///
/// #[derive(Struct)]
/// pub struct Header {
///     pub magic: u32,
///     pub version: u16,
///     pub flags: [u8; 4],
/// }
/// ```
///
/// The trait is object safe; nested objects are visited through
/// `&dyn Struct`.
pub trait Struct {
    /// The field table of this type.
    fn layout(&self) -> &Layout;

    /// Reads the stored value of the field at `slot`.
    ///
    /// Returns `Ok(None)` when the value is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownSlot`] if `slot` is not part of the
    /// layout.
    fn read_field(&self, slot: usize) -> Result<Option<Value<'_>>, AccessError>;

    /// Reads the field at `slot` by calling its accessor method.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`AccessError::NoAccessor`].
    /// Implementations forward failures reported by the accessor itself as
    /// [`AccessError::Getter`].
    fn read_accessor(
        &self,
        slot: usize,
    ) -> Result<Option<Value<'_>>, AccessError> {
        Err(AccessError::NoAccessor { slot })
    }
}

/// Where the value of a field is read from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ValueSource {
    /// Read the stored field.
    #[default]
    Direct,

    /// Call the accessor method registered for the field.
    Accessor,
}

impl ValueSource {
    /// The source the engine uses for `field`: its accessor when one is
    /// registered, the stored value otherwise.
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Self {
        if field.accessor().is_some() { Self::Accessor } else { Self::Direct }
    }

    /// Reads the current value of `field` on `instance`.
    ///
    /// # Errors
    ///
    /// Propagates whatever the instance reports for the chosen path.
    pub fn read<'a>(
        self,
        instance: &'a dyn Struct,
        field: &FieldDescriptor,
    ) -> Result<Option<Value<'a>>, AccessError> {
        match self {
            Self::Direct => instance.read_field(field.slot()),
            Self::Accessor => instance.read_accessor(field.slot()),
        }
    }
}
