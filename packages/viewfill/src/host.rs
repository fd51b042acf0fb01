use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};
use thiserror::Error;
use tracing::debug;

/// An opaque handle to an element owned by a [`Host`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A length in whole pixels. Displays as a CSS pixel length, e.g. `712px`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Px(pub i32);

impl Display for Px {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Identifies a listener registered with [`Host::add_resize_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A callback invoked by the host whenever the viewport is resized.
///
/// The host passes itself in so that listeners don't need to hold a reference to it.
pub type ResizeListener = Arc<dyn Fn(&dyn Host) + Send + Sync + 'static>;

/// An error reported by a [`Host`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HostError {
    /// The host refused to register a resize listener.
    #[error("resize listener rejected: {0}")]
    ListenerRejected(String),
}

/// `Host` is the environment that hooks measure and mutate: the viewport, the element tree, and
/// the resize signal.
///
/// Every read is expected to reflect the current state of the environment. Nothing is cached by
/// the callers.
pub trait Host: Send + Sync {
    /// Returns the current height of the viewport in pixels.
    fn viewport_height(&self) -> i32;

    /// Resolves an element by its identifier, if it currently exists.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Returns the rendered height of an element in pixels.
    fn offset_height(&self, node: NodeId) -> i32;

    /// Sets the height style of an element.
    fn set_height(&self, node: NodeId, height: Px);

    /// Registers a listener for the viewport's resize signal.
    fn add_resize_listener(&self, listener: ResizeListener) -> Result<ListenerId, HostError>;

    /// Removes a previously registered resize listener. Unknown ids are ignored.
    fn remove_resize_listener(&self, id: ListenerId);
}

/// A registered resize listener. The listener is removed from the host when this is dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct ResizeSubscription {
    host: Arc<dyn Host>,
    id: ListenerId,
}

impl ResizeSubscription {
    /// Registers the listener with the host.
    pub fn new(host: &Arc<dyn Host>, listener: ResizeListener) -> Result<Self, HostError> {
        let id = host.add_resize_listener(listener)?;
        debug!(listener = id.0, "subscribed to resize");
        Ok(Self {
            host: host.clone(),
            id,
        })
    }

    /// Returns the id the host assigned to the listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.host.remove_resize_listener(self.id);
        debug!(listener = self.id.0, "unsubscribed from resize");
    }
}
