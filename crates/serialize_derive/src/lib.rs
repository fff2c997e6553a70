//! Derive macro for the `Struct` trait.
//!
//! This crate provides `#[derive(Struct)]`, which implements the `Struct`,
//! `FieldValue` and `Element` traits from the `wirestruct_serialize` crate.
//! The generated implementation declares a static layout table with one
//! descriptor per field, in declaration order, and reads field values either
//! directly or through a registered accessor method.
//!
//! # Supported Types
//!
//! The derive macro supports non-generic:
//! - Structs with named fields
//! - Tuple structs (fields are named `0`, `1`, ...)
//! - Unit structs
//!
//! Enums and unions have no fixed field layout and are rejected.
//!
//! # Example
//!
//! ```ignore
//! use wirestruct_serialize::Struct;
//!
//! #[derive(Struct)]
//! pub struct Header {
//!     pub magic: u32,
//!     pub version: u16,
//!     pub(crate) flags: [u8; 4],
//!     checksum: Option<u32>,
//! }
//! ```
//!
//! # Field Attributes
//!
//! ## `#[structure(getter = "method")]`
//!
//! Read the field by calling `self.method()` instead of reading it directly.
//! The method may return anything implementing `Accessed`: a primitive, a
//! primitive `Vec`, a reference to any field type, or an `Option`/`Result`
//! around those.
//!
//! ## `#[structure(visibility = "...")]`
//!
//! Override the qualifier inferred from the Rust visibility. Accepts
//! `public`, `private`, `protected` and `package`. Without it, `pub` fields
//! are public, `pub(crate)`, `pub(super)` and `pub(in ...)` fields are package
//! fields, and everything else is private.
//!
//! ## `#[structure(transient)]`
//!
//! Add the transient modifier. The field keeps its slot in the layout but is
//! only written when the inclusion policy admits transient fields.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, LitStr, Member, ext::IdentExt,
    parse_macro_input, spanned::Spanned,
};

/// The parsed `#[structure(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttributes {
    getter: Option<Ident>,
    visibility: Option<Ident>,
    transient: bool,
}

fn parse_field_attributes(field: &Field) -> syn::Result<FieldAttributes> {
    let mut attributes = FieldAttributes::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("structure") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("transient") {
                attributes.transient = true;
                Ok(())
            } else if meta.path.is_ident("getter") {
                let name: LitStr = meta.value()?.parse()?;
                attributes.getter = Some(name.parse()?);
                Ok(())
            } else if meta.path.is_ident("visibility") {
                let name: LitStr = meta.value()?.parse()?;
                let qualifier = match name.value().as_str() {
                    "public" => "PUBLIC",
                    "private" => "PRIVATE",
                    "protected" => "PROTECTED",
                    "package" => "PACKAGE",
                    other => {
                        return Err(syn::Error::new_spanned(
                            &name,
                            format!(
                                "unknown visibility `{other}`, expected one \
                                 of `public`, `private`, `protected`, \
                                 `package`"
                            ),
                        ));
                    }
                };
                attributes.visibility =
                    Some(Ident::new(qualifier, name.span()));
                Ok(())
            } else {
                Err(meta.error("unknown structure attribute"))
            }
        })?;
    }

    Ok(attributes)
}

/// Maps a Rust visibility to the qualifier constant it corresponds to.
fn inferred_qualifier(vis: &syn::Visibility) -> Ident {
    let name = match vis {
        syn::Visibility::Public(_) => "PUBLIC",
        syn::Visibility::Restricted(_) => "PACKAGE",
        syn::Visibility::Inherited => "PRIVATE",
    };

    Ident::new(name, Span::call_site())
}

/// Derive macro for `Struct`.
///
/// Generates:
///
/// - `Struct`, with a static layout listing every field in declaration order
/// - `FieldValue`, so the type can be a nested field of another struct
/// - `Element`, so the type can be the element of an array field
///
/// # Example
///
/// ```ignore
/// use wirestruct_serialize::Struct;
///
/// #[derive(Struct)]
/// struct Sample {
///     pub id: u32,
///     #[structure(getter = "scaled")]
///     value: f32,
///     #[structure(transient)]
///     cache: u64,
/// }
///
/// impl Sample {
///     fn scaled(&self) -> f32 { self.value * 2.0 }
/// }
/// ```
#[proc_macro_derive(Struct, attributes(structure))]
pub fn derive_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_struct(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(error) => error.to_compile_error().into(),
    }
}

fn impl_struct(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Struct cannot be derived for generic types because their field \
             layout is not fixed",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Struct can only be derived for structs",
            ));
        }
    };

    let members: Vec<(Member, &Field)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                field.ident.clone().map(|ident| (Member::Named(ident), field))
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, field)| (Member::Unnamed(i.into()), field))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let mut descriptors = Vec::with_capacity(members.len());
    let mut direct_reads = Vec::with_capacity(members.len());
    let mut accessor_reads = Vec::new();

    for (slot, (member, field)) in members.iter().enumerate() {
        let attributes = parse_field_attributes(field)?;

        let field_name = match member {
            Member::Named(ident) => {
                LitStr::new(&ident.unraw().to_string(), ident.span())
            }
            Member::Unnamed(index) => {
                LitStr::new(&index.index.to_string(), field.span())
            }
        };
        let field_type = &field.ty;

        let qualifier = attributes
            .visibility
            .unwrap_or_else(|| inferred_qualifier(&field.vis));
        let visibility = if attributes.transient {
            quote! {
                ::wirestruct_serialize::Visibility::#qualifier
                    .union(::wirestruct_serialize::Visibility::TRANSIENT)
            }
        } else {
            quote! { ::wirestruct_serialize::Visibility::#qualifier }
        };

        let accessor = match &attributes.getter {
            Some(getter) => {
                let getter_name = getter.to_string();
                accessor_reads.push(quote! {
                    #slot => ::wirestruct_serialize::Accessed::into_value(
                        self.#getter()
                    ),
                });
                quote! { ::std::option::Option::Some(#getter_name) }
            }
            None => quote! { ::std::option::Option::None },
        };

        descriptors.push(quote! {
            ::wirestruct_serialize::FieldDescriptor::new(
                #field_name,
                #slot,
                <#field_type as ::wirestruct_serialize::FieldValue>::FIELD_TYPE,
                #visibility,
                #accessor,
            )
        });

        direct_reads.push(quote! {
            #slot => ::std::result::Result::Ok(
                ::wirestruct_serialize::FieldValue::value(&self.#member)
            ),
        });
    }

    let field_count = descriptors.len();
    let name_str = name.to_string();

    let read_accessor = if accessor_reads.is_empty() {
        quote! {}
    } else {
        quote! {
            fn read_accessor(
                &self,
                slot: usize,
            ) -> ::std::result::Result<
                ::std::option::Option<::wirestruct_serialize::Value<'_>>,
                ::wirestruct_serialize::AccessError,
            > {
                match slot {
                    #(#accessor_reads)*
                    _ => ::std::result::Result::Err(
                        ::wirestruct_serialize::AccessError::NoAccessor { slot },
                    ),
                }
            }
        }
    };

    Ok(quote! {
        #[automatically_derived]
        impl ::wirestruct_serialize::Struct for #name {
            fn layout(&self) -> &::wirestruct_serialize::Layout {
                static FIELDS: [::wirestruct_serialize::FieldDescriptor; #field_count] = [
                    #(#descriptors),*
                ];
                static LAYOUT: ::wirestruct_serialize::Layout =
                    ::wirestruct_serialize::Layout::new(#name_str, &FIELDS);

                &LAYOUT
            }

            fn read_field(
                &self,
                slot: usize,
            ) -> ::std::result::Result<
                ::std::option::Option<::wirestruct_serialize::Value<'_>>,
                ::wirestruct_serialize::AccessError,
            > {
                match slot {
                    #(#direct_reads)*
                    _ => ::std::result::Result::Err(
                        ::wirestruct_serialize::AccessError::UnknownSlot { slot },
                    ),
                }
            }

            #read_accessor
        }

        #[automatically_derived]
        impl ::wirestruct_serialize::FieldValue for #name {
            const FIELD_TYPE: ::wirestruct_serialize::FieldType =
                ::wirestruct_serialize::FieldType::OBJECT;

            fn value(
                &self,
            ) -> ::std::option::Option<::wirestruct_serialize::Value<'_>> {
                ::std::option::Option::Some(
                    ::wirestruct_serialize::Value::Object(self),
                )
            }
        }

        #[automatically_derived]
        impl ::wirestruct_serialize::Element for #name {
            const KIND: ::wirestruct_serialize::Kind =
                ::wirestruct_serialize::Kind::Object;

            fn array(
                items: &[Self],
            ) -> ::wirestruct_serialize::ArrayValue<'_> {
                ::wirestruct_serialize::ArrayValue::Object(
                    items
                        .iter()
                        .map(|item| {
                            ::std::option::Option::Some(
                                item as &dyn ::wirestruct_serialize::Struct,
                            )
                        })
                        .collect(),
                )
            }
        }
    })
}
