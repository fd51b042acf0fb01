use crate::{ElementRef, Hook, Hooks};

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Hooks<'_> {}
}

/// `UseElementRef` is a hook that gives a component a stable [`ElementRef`].
///
/// The same handle is returned on every update, so hooks that depend on it won't see it as a
/// change.
pub trait UseElementRef: private::Sealed {
    /// Returns the component's element handle, creating it on the first update.
    fn use_element_ref(&mut self) -> ElementRef;
}

impl UseElementRef for Hooks<'_> {
    fn use_element_ref(&mut self) -> ElementRef {
        self.use_hook(|| UseElementRefImpl {
            element: ElementRef::new(),
        })
        .element
        .clone()
    }
}

struct UseElementRefImpl {
    element: ElementRef,
}

impl Hook for UseElementRefImpl {}
