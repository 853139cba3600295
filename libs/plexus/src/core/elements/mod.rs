// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod element;
mod element_node;
mod element_state;
mod element_unique_id;

pub use element::Element;
pub use element_node::ElementNode;
pub use element_state::ElementState;
pub use element_unique_id::ElementUniqueId;
