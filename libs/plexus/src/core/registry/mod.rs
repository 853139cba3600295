// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Element type registry.
//!
//! Types are registered either at runtime through [`ElementTypeRegistry`] or
//! at link time with [`register_element!`](crate::register_element), which
//! feeds the process-wide [`ELEMENT_REGISTRY`].

mod element_type_registry;

pub use element_type_registry::{
    ElementConstructorFn, ElementRegistration, ElementTypeRegistry, ELEMENT_REGISTRY,
};

/// Register a `Default` element type with [`ELEMENT_REGISTRY`] at link time.
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Counter { /* ... */ }
/// impl plexus::Element for Counter { /* ... */ }
///
/// plexus::register_element!(Counter, "counter");
/// ```
#[macro_export]
macro_rules! register_element {
    ($element:ty, $name:expr) => {
        const _: () = {
            fn __plexus_construct() -> ::std::boxed::Box<dyn $crate::Element> {
                ::std::boxed::Box::new(<$element as ::std::default::Default>::default())
            }

            $crate::inventory::submit! {
                $crate::ElementRegistration::new($name, __plexus_construct)
            }
        };
    };
}
