use crate::{
    hooks::{State, UseState},
    Hooks,
};

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Hooks<'_> {}
}

/// `UseModal` is a hook that tracks whether a modal dialog is open.
///
/// # Example
///
/// ```
/// # use viewfill::prelude::*;
/// # use std::sync::Arc;
/// let mut mount = Mount::new(Arc::new(MockHost::new(0)), |hooks: &mut Hooks, _: &()| {
///     hooks.use_modal()
/// });
/// let modal = mount.update(&());
/// assert!(!modal.is_open());
///
/// modal.open_modal();
/// assert!(mount.update(&()).is_open());
/// ```
pub trait UseModal: private::Sealed {
    /// Returns the modal's state. The modal starts out closed.
    fn use_modal(&mut self) -> ModalState;
}

impl UseModal for Hooks<'_> {
    fn use_modal(&mut self) -> ModalState {
        ModalState {
            is_open: self.use_state(|| false),
        }
    }
}

/// The open/closed state of a modal, returned by [`UseModal::use_modal`].
///
/// It's a copyable handle, so it can be moved into event handlers.
#[derive(Clone, Copy, Debug)]
pub struct ModalState {
    is_open: State<bool>,
}

impl ModalState {
    /// Returns `true` if the modal is open.
    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    /// Opens the modal. Opening an open modal does nothing.
    pub fn open_modal(&self) {
        self.is_open.set(true);
    }

    /// Closes the modal. Closing a closed modal does nothing.
    pub fn close_modal(&self) {
        self.is_open.set(false);
    }
}
