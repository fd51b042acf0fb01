//! # viewfill
//!
//! `viewfill` provides hooks for sizing an element to the viewport height its siblings leave
//! free, and for tracking whether a modal dialog is open, along with the small hook runtime they
//! run on.
//!
//! The environment (viewport, element tree, resize signal) is reached through the [`Host`] trait.
//! [`MockHost`] is an in-memory implementation for tests and demos.

#![warn(missing_docs)]

// # Organization
//
// Types are re-exported in the root so that users of the library have a flat namespace to work
// with. Hooks stay in their module for the public API.

mod element_ref;
mod height;
mod hook;
mod host;
mod mock;
mod render;

mod flattened_exports {
    pub use crate::element_ref::*;
    pub use crate::height::*;
    pub use crate::hook::*;
    pub use crate::host::*;
    pub use crate::mock::*;
    pub use crate::render::*;
}

pub use flattened_exports::*;

/// Hooks for adding behavior to your components.
pub mod hooks;

/// By importing this module, you'll bring all of the crate's commonly used types into scope.
pub mod prelude {
    pub use crate::flattened_exports::*;
    pub use crate::hooks::*;
}
