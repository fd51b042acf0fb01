use crate::{Hook, Hooks};
use generational_box::{AnyStorage, GenerationalBox, Owner, SyncStorage};
use std::{
    cmp,
    fmt::{self, Debug, Display, Formatter},
    ops,
    pin::Pin,
    task::{Context, Poll, Waker},
};

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Hooks<'_> {}
}

/// `UseState` is a hook that allows you to store state in a component.
///
/// When the state changes, the component will be updated again.
///
/// # Example
///
/// ```
/// # use viewfill::prelude::*;
/// # use std::sync::Arc;
/// let mut mount = Mount::new(Arc::new(MockHost::new(0)), |hooks: &mut Hooks, _: &()| {
///     let clicks = hooks.use_state(|| 0);
///     clicks.get()
/// });
/// assert_eq!(mount.update(&()), 0);
/// ```
pub trait UseState: private::Sealed {
    /// Creates a new state with its initial value computed by the given function.
    ///
    /// When the state changes, the component will be updated again.
    fn use_state<T, F>(&mut self, initial_value: F) -> State<T>
    where
        T: Unpin + Sync + Send + 'static,
        F: FnOnce() -> T;
}

impl UseState for Hooks<'_> {
    fn use_state<T, F>(&mut self, initial_value: F) -> State<T>
    where
        T: Unpin + Sync + Send + 'static,
        F: FnOnce() -> T,
    {
        self.use_hook(move || UseStateImpl::new(initial_value()))
            .state
    }
}

struct UseStateImpl<T: Unpin + Send + Sync + 'static> {
    _storage: Owner<SyncStorage>,
    state: State<T>,
}

impl<T: Unpin + Send + Sync + 'static> UseStateImpl<T> {
    fn new(initial_value: T) -> Self {
        let storage = Owner::default();
        UseStateImpl {
            state: State {
                inner: storage.insert(StateValue {
                    did_change: false,
                    waker: None,
                    value: initial_value,
                }),
            },
            _storage: storage,
        }
    }
}

impl<T: Unpin + Send + Sync + 'static> Hook for UseStateImpl<T> {
    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if let Ok(mut value) = self.state.inner.try_write() {
            if value.did_change {
                value.did_change = false;
                Poll::Ready(())
            } else {
                value.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        } else {
            Poll::Pending
        }
    }
}

struct StateValue<T> {
    did_change: bool,
    waker: Option<Waker>,
    value: T,
}

/// A reference to the value of a [`State`].
pub struct StateRef<T: 'static> {
    inner: <SyncStorage as AnyStorage>::Ref<'static, StateValue<T>>,
}

impl<T: 'static> ops::Deref for StateRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner.value
    }
}

/// `State` is a copyable handle to a value owned by a component. Setting it causes the component
/// to be updated again.
///
/// Handles may be moved into listeners and other callbacks. Once the owning component is
/// unmounted, writes through a handle are silently dropped.
pub struct State<T: Send + Sync + 'static> {
    inner: GenerationalBox<StateValue<T>, SyncStorage>,
}

impl<T: Sync + Send + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Sync + Send + 'static> Copy for State<T> {}

impl<T: Copy + Sync + Send + 'static> State<T> {
    /// Gets a copy of the current value of the state.
    ///
    /// # Panics
    ///
    /// Panics if the owning component has been unmounted.
    pub fn get(&self) -> T {
        self.inner.read().value
    }
}

impl<T: Sync + Send + 'static> State<T> {
    /// Sets the value of the state and wakes whoever is waiting for the component to change.
    pub fn set(&self, value: T) {
        if let Ok(mut inner) = self.inner.try_write() {
            inner.value = value;
            inner.did_change = true;
            if let Some(waker) = inner.waker.take() {
                waker.wake();
            }
        }
    }

    /// Returns a reference to the state's value.
    ///
    /// # Panics
    ///
    /// Panics if the owning component has been unmounted.
    pub fn read(&self) -> StateRef<T> {
        StateRef {
            inner: self.inner.read(),
        }
    }
}

impl<T: Debug + Sync + Send + 'static> Debug for State<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.inner.read().value.fmt(f)
    }
}

impl<T: Display + Sync + Send + 'static> Display for State<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.inner.read().value.fmt(f)
    }
}

impl<T: cmp::PartialEq<T> + Sync + Send + 'static> cmp::PartialEq<T> for State<T> {
    fn eq(&self, other: &T) -> bool {
        self.inner.read().value == *other
    }
}
