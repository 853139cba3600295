// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Shared ownership for graph-resident objects.
//!
//! Pipelines, elements and pins are all held through [`Ref`]. Counts are
//! atomic, so handles can be cloned and dropped from any scheduler thread.
//!
//! `Ref` does not break cycles. The pipeline → element edge is a strong
//! `Ref<ElementNode>`; the element → pipeline edge is a [`WeakRef`] and is
//! only upgraded for lookup, never kept alive.

use std::sync::{Arc, Weak};

/// Shared, reference-counted handle.
pub type Ref<T> = Arc<T>;

/// Non-owning back-reference.
pub type WeakRef<T> = Weak<T>;

/// Number of strong handles currently alive for the referent.
pub fn ref_count<T: ?Sized>(handle: &Ref<T>) -> usize {
    Arc::strong_count(handle)
}
