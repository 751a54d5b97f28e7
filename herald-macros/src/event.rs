//! `#[derive(Event)]`.
//!
//! Container attributes, all optional:
//!
//! - `#[event(key = "app::PostAdded")]` - the type key; defaults to the
//!   module path and type name
//! - `#[event(implements(dyn Auditable, dyn Billable))]` - capability sets
//! - `#[event(stoppable)]` - expose a hand-written `StoppableEvent` impl
//!
//! Field attributes:
//!
//! - `#[event(parent)]` - the embedded parent event (at most one)
//! - `#[event(stop)]` - a `bool` flag; generates `StoppableEvent` on top of it

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Index, LitStr, Member, Token, Type, parenthesized,
    parse_macro_input, punctuated::Punctuated, spanned::Spanned,
};

/// Options read from the container attributes.
#[derive(Default)]
struct EventArgs {
    key: Option<LitStr>,
    implements: Vec<Type>,
    stoppable: bool,
}

impl EventArgs {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("event")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    args.key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("implements") {
                    let content;
                    parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.implements.extend(types);
                    Ok(())
                } else if meta.path.is_ident("stoppable") {
                    args.stoppable = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown event attribute, expected `key`, `implements` or `stoppable`"))
                }
            })?;
        }
        Ok(args)
    }
}

/// A field marked with `#[event(parent)]` or `#[event(stop)]`.
struct MarkedField {
    member: Member,
    ty: Type,
}

#[derive(Default)]
struct MarkedFields {
    parent: Option<MarkedField>,
    stop: Option<MarkedField>,
}

impl MarkedFields {
    fn from_fields(fields: &Fields) -> syn::Result<Self> {
        let mut marked = Self::default();
        for (index, field) in fields.iter().enumerate() {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index {
                    index: index as u32,
                    span: field.span(),
                }),
            };
            for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("event")) {
                attr.parse_nested_meta(|meta| {
                    let slot = if meta.path.is_ident("parent") {
                        &mut marked.parent
                    } else if meta.path.is_ident("stop") {
                        &mut marked.stop
                    } else {
                        return Err(meta.error("unknown field attribute, expected `parent` or `stop`"));
                    };
                    if slot.is_some() {
                        return Err(meta.error("only one field can carry this attribute"));
                    }
                    *slot = Some(MarkedField {
                        member: member.clone(),
                        ty: field.ty.clone(),
                    });
                    Ok(())
                })?;
            }
        }
        Ok(marked)
    }
}

/// Implementation of `#[derive(Event)]`.
pub fn derive_event_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let args = EventArgs::from_attrs(&input.attrs)?;

    let marked = match &input.data {
        Data::Struct(data) => MarkedFields::from_fields(&data.fields)?,
        Data::Enum(_) => MarkedFields::default(),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(Event)] can only be used on structs and enums",
            ));
        }
    };
    let stoppable = args.stoppable || marked.stop.is_some();

    let key = match &args.key {
        Some(key) => quote! { #key },
        None => quote! { concat!(module_path!(), "::", stringify!(#name)) },
    };

    let mut own_capabilities: Vec<TokenStream2> = args
        .implements
        .iter()
        .map(|ty| quote! { <#ty as ::herald::Capability>::KEY })
        .collect();
    if stoppable {
        own_capabilities.push(quote! { <dyn ::herald::StoppableEvent as ::herald::Capability>::KEY });
    }

    let parent_items = marked.parent.as_ref().map(|parent| {
        let MarkedField { member, ty } = parent;
        quote! {
            fn ancestry() -> ::std::vec::Vec<::herald::TypeKey> {
                let mut keys = ::std::vec![<#ty as ::herald::EventType>::KEY];
                keys.extend(<#ty as ::herald::EventType>::ancestry());
                keys
            }

            fn view_ancestor(&self, key: &::herald::TypeKey) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::herald::Event::view(&self.#member, key)
            }

            fn view_ancestor_mut(&mut self, key: &::herald::TypeKey) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                ::herald::Event::view_mut(&mut self.#member, key)
            }
        }
    });

    let inherited_capabilities = marked.parent.as_ref().map(|MarkedField { ty, .. }| {
        quote! {
            for key in <#ty as ::herald::EventType>::capability_keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    });
    let capability_items = (!own_capabilities.is_empty() || inherited_capabilities.is_some())
        .then(|| {
            quote! {
                fn capability_keys() -> ::std::vec::Vec<::herald::TypeKey> {
                    #[allow(unused_mut)]
                    let mut keys: ::std::vec::Vec<::herald::TypeKey> = ::std::vec![#(#own_capabilities),*];
                    #inherited_capabilities
                    keys
                }
            }
        });

    let stoppable_items = if stoppable {
        Some(quote! {
            fn stoppable(&self) -> ::core::option::Option<&dyn ::herald::StoppableEvent> {
                ::core::option::Option::Some(self)
            }

            fn stoppable_mut(&mut self) -> ::core::option::Option<&mut dyn ::herald::StoppableEvent> {
                ::core::option::Option::Some(self)
            }
        })
    } else {
        marked.parent.as_ref().map(|MarkedField { member, .. }| {
            quote! {
                fn stoppable(&self) -> ::core::option::Option<&dyn ::herald::StoppableEvent> {
                    ::herald::Event::as_stoppable(&self.#member)
                }

                fn stoppable_mut(&mut self) -> ::core::option::Option<&mut dyn ::herald::StoppableEvent> {
                    ::herald::Event::as_stoppable_mut(&mut self.#member)
                }
            }
        })
    };

    let stop_impl = match &marked.stop {
        Some(MarkedField { member, .. }) if !args.stoppable => Some(quote! {
            impl #impl_generics ::herald::StoppableEvent for #name #ty_generics #where_clause {
                fn stop_propagation(&mut self) {
                    self.#member = true;
                }

                fn is_propagation_stopped(&self) -> bool {
                    self.#member
                }
            }
        }),
        Some(MarkedField { member, .. }) => {
            return Err(syn::Error::new(
                member.span(),
                "`#[event(stop)]` generates `StoppableEvent`; drop `#[event(stoppable)]`",
            ));
        }
        None => None,
    };

    Ok(quote! {
        impl #impl_generics ::herald::EventType for #name #ty_generics #where_clause {
            const KEY: ::herald::TypeKey = ::herald::TypeKey::from_static(#key);

            #parent_items
            #capability_items
            #stoppable_items
        }

        #stop_impl
    })
}
