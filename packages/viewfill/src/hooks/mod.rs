//! This module contains hooks that can be used to add behavior to components.
//!
//! Hooks are implemented as traits which extend the [`Hooks`](crate::Hooks) object that gets
//! passed to your render function.
//!
//! For example, if you want a hook that reports whether there's room for a sidebar, you might
//! define and use it like this:
//!
//! ```
//! # use viewfill::prelude::*;
//! # use std::sync::Arc;
//! pub trait UseRoomForSidebar {
//!     /// Returns `true` if the viewport is at least 600 pixels tall.
//!     fn use_room_for_sidebar(&mut self) -> bool;
//! }
//!
//! impl UseRoomForSidebar for Hooks<'_> {
//!     fn use_room_for_sidebar(&mut self) -> bool {
//!         self.use_viewport_height() >= 600
//!     }
//! }
//!
//! let mut mount = Mount::new(Arc::new(MockHost::new(900)), |hooks: &mut Hooks, _: &()| {
//!     hooks.use_room_for_sidebar()
//! });
//! assert!(mount.settle(&()));
//! ```

mod use_element_ref;
pub use use_element_ref::*;
mod use_height_calculator;
pub use use_height_calculator::*;
mod use_modal;
pub use use_modal::*;
mod use_state;
pub use use_state::*;
mod use_viewport_height;
pub use use_viewport_height::*;
