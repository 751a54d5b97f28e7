//! Procedural macros for Herald.
//!
//! Use them through the `herald` crate (feature `macros`); the generated code
//! refers to `::herald` paths.

use proc_macro::TokenStream;

mod event;

/// Derive `EventType` for an event struct or enum.
///
/// ```rust,ignore
/// #[derive(herald::Event)]
/// #[event(key = "blog::PostEvent")]
/// struct PostEvent {
///     id: u64,
/// }
///
/// #[derive(herald::Event)]
/// #[event(implements(dyn Auditable))]
/// struct PostAdded {
///     #[event(parent)]
///     post: PostEvent,
///     #[event(stop)]
///     stopped: bool,
/// }
/// ```
///
/// `PostAdded` gets the key `"<module path>::PostAdded"`, ancestry
/// `[PostEvent]`, the capabilities `Auditable` and `StoppableEvent`, and a
/// generated `StoppableEvent` impl backed by `stopped`.
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    event::derive_event_impl(input)
}
