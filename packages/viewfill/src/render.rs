use crate::{hook::AnyHook, Hook, Hooks, Host};
use futures::{future::poll_fn, task::noop_waker};
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

/// Gives hooks access to the component's environment during an update.
pub struct ComponentUpdater<'a> {
    host: &'a Arc<dyn Host>,
}

impl<'a> ComponentUpdater<'a> {
    pub(crate) fn new(host: &'a Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// Returns the host the component is mounted on.
    pub fn host(&self) -> &'a Arc<dyn Host> {
        self.host
    }
}

type RenderFn<P, O> = Box<dyn FnMut(&mut Hooks<'_>, &P) -> O + Send>;

/// `Mount` is a component instance: a render function plus the hooks it has allocated.
///
/// Each call to [`update`](Mount::update) runs the render function and then lets every hook run
/// its effects. Hooks can signal that the component needs another update, which is observed with
/// [`wait`](Mount::wait) or [`has_pending_change`](Mount::has_pending_change).
///
/// Dropping the mount (or calling [`unmount`](Mount::unmount)) drops its hooks, which releases any
/// subscriptions they hold.
///
/// # Example
///
/// ```
/// # use viewfill::prelude::*;
/// # use std::sync::Arc;
/// let host = Arc::new(MockHost::new(900));
/// let mut mount = Mount::new(host, |hooks: &mut Hooks, _props: &()| {
///     hooks.use_viewport_height()
/// });
/// assert_eq!(mount.settle(&()), 900);
/// ```
pub struct Mount<P, O> {
    host: Arc<dyn Host>,
    hooks: Vec<Box<dyn AnyHook>>,
    first_update: bool,
    render: RenderFn<P, O>,
}

impl<P, O> Mount<P, O> {
    /// Creates a component on the given host. Nothing runs until the first update.
    pub fn new<F>(host: Arc<dyn Host>, render: F) -> Self
    where
        F: FnMut(&mut Hooks<'_>, &P) -> O + Send + 'static,
    {
        Self {
            host,
            hooks: Vec::new(),
            first_update: true,
            render: Box::new(render),
        }
    }

    /// Returns the host the component is mounted on.
    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// Renders the component with the given props, then runs the hooks' effects.
    pub fn update(&mut self, props: &P) -> O {
        let mut updater = ComponentUpdater::new(&self.host);
        self.hooks.pre_component_update(&mut updater);
        let output = {
            let mut hooks = Hooks::new(&mut self.hooks, self.first_update, &self.host);
            (self.render)(&mut hooks, props)
        };
        self.first_update = false;
        self.hooks.post_component_update(&mut updater);
        output
    }

    /// Polls the hooks for a change that requires another update.
    pub fn poll_change(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.hooks).poll_change(cx)
    }

    /// Waits until a hook reports a change.
    pub async fn wait(&mut self) {
        poll_fn(|cx| self.poll_change(cx)).await;
    }

    /// Returns `true` if a hook has reported a change since the last poll.
    pub fn has_pending_change(&mut self) -> bool {
        self.poll_change(&mut Context::from_waker(&noop_waker()))
            .is_ready()
    }

    /// Updates the component until no hook reports a change, returning the last output.
    ///
    /// A component that changes its own state on every update will never settle.
    pub fn settle(&mut self, props: &P) -> O {
        let mut output = self.update(props);
        while self.has_pending_change() {
            output = self.update(props);
        }
        output
    }

    /// Tears the component down, releasing everything its hooks hold.
    pub fn unmount(self) {
        debug!(hooks = self.hooks.len(), "unmounting component");
    }
}
