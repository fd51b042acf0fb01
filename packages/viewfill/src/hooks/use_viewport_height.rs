use crate::{
    hooks::{State, UseState},
    ComponentUpdater, Hook, Hooks, Host, ResizeSubscription,
};
use std::sync::Arc;
use tracing::warn;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Hooks<'_> {}
}

/// `UseViewportHeight` is a hook that returns the current viewport height.
pub trait UseViewportHeight: private::Sealed {
    /// Returns the current viewport height, updating the component whenever it's resized.
    fn use_viewport_height(&mut self) -> i32;
}

impl UseViewportHeight for Hooks<'_> {
    fn use_viewport_height(&mut self) -> i32 {
        let host = self.host();
        let height = self.use_state(|| host.viewport_height());
        self.use_hook(move || UseViewportHeightImpl {
            height,
            started: false,
            subscription: None,
        });
        height.get()
    }
}

struct UseViewportHeightImpl {
    height: State<i32>,
    started: bool,
    subscription: Option<ResizeSubscription>,
}

impl Hook for UseViewportHeightImpl {
    fn post_component_update(&mut self, updater: &mut ComponentUpdater) {
        if self.started {
            return;
        }
        self.started = true;
        let height = self.height;
        match ResizeSubscription::new(
            updater.host(),
            Arc::new(move |host: &dyn Host| height.set(host.viewport_height())),
        ) {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(err) => warn!(%err, "viewport height will not follow resizes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_use_viewport_height() {
        let host = Arc::new(MockHost::new(900));
        let mut mount = Mount::new(host.clone(), |hooks: &mut Hooks, _: &()| {
            hooks.use_viewport_height()
        });
        assert_eq!(mount.settle(&()), 900);
        assert_eq!(host.listener_count(), 1);

        host.resize(640);
        assert_eq!(mount.settle(&()), 640);
        assert_eq!(host.listener_count(), 1);

        mount.unmount();
        assert_eq!(host.listener_count(), 0);
    }
}
