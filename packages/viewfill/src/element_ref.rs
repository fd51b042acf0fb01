use crate::NodeId;
use std::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    sync::{Arc, RwLock},
};
use uuid::Uuid;

/// `ElementRef` is a handle to an element that may or may not currently be mounted.
///
/// The owner of the element attaches it once it exists and detaches it when it goes away. Hooks
/// only ever borrow the handle: they resolve it at the moment they need the element and skip their
/// work if it isn't there.
///
/// Clones share the same slot. Equality and hashing are based on the handle's identity rather than
/// on the element it currently points to, so attaching or detaching an element is not seen as a
/// change by hooks that depend on the handle.
#[derive(Clone)]
pub struct ElementRef {
    key: Uuid,
    current: Arc<RwLock<Option<NodeId>>>,
}

impl ElementRef {
    /// Creates a new, detached handle.
    pub fn new() -> Self {
        Self {
            key: Uuid::new_v4(),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Points the handle at the given element.
    pub fn attach(&self, node: NodeId) {
        *self.current.write().unwrap() = Some(node);
    }

    /// Clears the handle, returning the element it pointed to.
    pub fn detach(&self) -> Option<NodeId> {
        self.current.write().unwrap().take()
    }

    /// Returns the element the handle currently points to.
    pub fn current(&self) -> Option<NodeId> {
        *self.current.read().unwrap()
    }
}

impl Default for ElementRef {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ElementRef {}

impl Hash for ElementRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Debug for ElementRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("key", &self.key)
            .field("current", &self.current())
            .finish()
    }
}
