use crate::{Host, HostError, ListenerId, NodeId, Px, ResizeListener};
use std::{collections::HashMap, sync::Mutex};

struct MockElement {
    id: Option<String>,
    offset_height: i32,
    style_height: Option<String>,
}

#[derive(Default)]
struct MockHostInner {
    viewport_height: i32,
    next_node: u64,
    elements: HashMap<NodeId, MockElement>,
    next_listener: u64,
    listeners: Vec<(ListenerId, ResizeListener)>,
    reject_listeners: bool,
    style_writes: usize,
}

/// `MockHost` is an in-memory [`Host`] for tests and demos.
///
/// Elements are plain records with a fixed rendered height. Resizing the viewport with
/// [`resize`](MockHost::resize) invokes every registered listener synchronously, in registration
/// order.
#[derive(Default)]
pub struct MockHost {
    inner: Mutex<MockHostInner>,
}

impl MockHost {
    /// Creates a host with the given viewport height and no elements.
    pub fn new(viewport_height: i32) -> Self {
        Self {
            inner: Mutex::new(MockHostInner {
                viewport_height,
                ..Default::default()
            }),
        }
    }

    fn add_element(&self, id: Option<String>, offset_height: i32) -> NodeId {
        let mut inner = self.inner.lock().unwrap();
        let node = NodeId(inner.next_node);
        inner.next_node += 1;
        inner.elements.insert(
            node,
            MockElement {
                id,
                offset_height,
                style_height: None,
            },
        );
        node
    }

    /// Adds an element without an identifier, e.g. a target that's reached through an
    /// [`ElementRef`](crate::ElementRef).
    pub fn create_element(&self, offset_height: i32) -> NodeId {
        self.add_element(None, offset_height)
    }

    /// Adds an element that can be resolved by its identifier.
    pub fn insert_element(&self, id: &str, offset_height: i32) -> NodeId {
        self.add_element(Some(id.to_string()), offset_height)
    }

    /// Changes an element's rendered height. This does not fire the resize signal.
    pub fn set_element_height(&self, node: NodeId, offset_height: i32) {
        if let Some(element) = self.inner.lock().unwrap().elements.get_mut(&node) {
            element.offset_height = offset_height;
        }
    }

    /// Removes an element. Returns `false` if it didn't exist.
    pub fn remove_element(&self, node: NodeId) -> bool {
        self.inner.lock().unwrap().elements.remove(&node).is_some()
    }

    /// Removes every element with the given identifier.
    pub fn remove_element_by_id(&self, id: &str) {
        self.inner
            .lock()
            .unwrap()
            .elements
            .retain(|_, element| element.id.as_deref() != Some(id));
    }

    /// Changes the viewport height without firing the resize signal.
    pub fn set_viewport_height(&self, viewport_height: i32) {
        self.inner.lock().unwrap().viewport_height = viewport_height;
    }

    /// Changes the viewport height and fires the resize signal.
    pub fn resize(&self, viewport_height: i32) {
        let listeners = {
            let mut inner = self.inner.lock().unwrap();
            inner.viewport_height = viewport_height;
            inner
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect::<Vec<_>>()
        };
        for listener in listeners {
            listener(self);
        }
    }

    /// Returns the height style last written to the element, e.g. `"712px"`.
    pub fn style_height(&self, node: NodeId) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .elements
            .get(&node)
            .and_then(|element| element.style_height.clone())
    }

    /// Returns the number of height styles written so far.
    pub fn style_writes(&self) -> usize {
        self.inner.lock().unwrap().style_writes
    }

    /// Returns the number of registered resize listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }

    /// When set, new resize listeners are refused with [`HostError::ListenerRejected`].
    pub fn reject_listeners(&self, reject: bool) {
        self.inner.lock().unwrap().reject_listeners = reject;
    }
}

impl Host for MockHost {
    fn viewport_height(&self) -> i32 {
        self.inner.lock().unwrap().viewport_height
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let inner = self.inner.lock().unwrap();
        inner
            .elements
            .iter()
            .filter(|(_, element)| element.id.as_deref() == Some(id))
            .map(|(node, _)| *node)
            .min()
    }

    fn offset_height(&self, node: NodeId) -> i32 {
        self.inner
            .lock()
            .unwrap()
            .elements
            .get(&node)
            .map(|element| element.offset_height)
            .unwrap_or(0)
    }

    fn set_height(&self, node: NodeId, height: Px) {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        if let Some(element) = inner.elements.get_mut(&node) {
            element.style_height = Some(height.to_string());
            inner.style_writes += 1;
        }
    }

    fn add_resize_listener(&self, listener: ResizeListener) -> Result<ListenerId, HostError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.reject_listeners {
            return Err(HostError::ListenerRejected(
                "mock host is rejecting listeners".to_string(),
            ));
        }
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, listener));
        Ok(id)
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        self.inner
            .lock()
            .unwrap()
            .listeners
            .retain(|(listener_id, _)| *listener_id != id);
    }
}
