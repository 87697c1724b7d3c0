//! Event listeners and dispatch.
//!
//! [§ 2 Events](https://dom.spec.whatwg.org/#events)
//!
//! Only what the widget uses is modeled: `click`, `mouseover` and
//! `mouseout`, all of which bubble. There is no capture phase and no
//! `stopPropagation`.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::geometry::Layout;
use crate::{DomTree, NodeId};

/// Event types the tree understands.
///
/// [UI Events § 5.3](https://w3c.github.io/uievents/#events-mouseevents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    /// "click"
    Click,
    /// "mouseover": the pointer moved onto an element or one of its descendants
    MouseOver,
    /// "mouseout": the pointer moved off an element or one of its descendants
    MouseOut,
}

/// [§ 2.2 Interface Event](https://dom.spec.whatwg.org/#interface-event)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// "type"
    pub kind: EventKind,
    /// "target": the node the event was dispatched to
    pub target: NodeId,
    /// "currentTarget": the node whose listener is being invoked
    pub current_target: NodeId,
}

/// Handle returned by [`DomTree::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback stored for a listener.
pub type Callback = Rc<dyn Fn(&mut DomTree, &dyn Layout, &Event)>;

struct Entry {
    id: ListenerId,
    callback: Callback,
}

/// [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
///
/// "Each EventTarget object has an associated event listener list". Lists
/// for all nodes of a tree are kept together, keyed by node and event type.
#[derive(Default, Clone)]
pub struct EventListeners {
    lists: HashMap<(NodeId, EventKind), Vec<Rc<Entry>>>,
    next_id: u64,
}

impl EventListeners {
    /// Append a listener; it runs after those already registered.
    pub fn add<F>(&mut self, target: NodeId, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&mut DomTree, &dyn Layout, &Event) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.lists.entry((target, kind)).or_default().push(Rc::new(Entry {
            id,
            callback: Rc::new(callback),
        }));
        id
    }

    /// Remove a listener by id. Returns whether it was registered.
    pub fn remove(&mut self, listener: ListenerId) -> bool {
        let mut removed = false;
        self.lists.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id != listener);
            removed |= entries.len() != before;
            !entries.is_empty()
        });
        removed
    }

    /// Number of listeners for `kind` on `target`.
    #[must_use]
    pub fn count(&self, target: NodeId, kind: EventKind) -> usize {
        self.lists.get(&(target, kind)).map_or(0, Vec::len)
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Callbacks to run for one dispatch step, cloned so that they can
    /// mutate the tree (and its listener lists) while running.
    pub(crate) fn snapshot(&self, target: NodeId, kind: EventKind) -> Vec<Callback> {
        self.lists
            .get(&(target, kind))
            .map(|entries| entries.iter().map(|e| Rc::clone(&e.callback)).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("listeners", &self.len())
            .finish_non_exhaustive()
    }
}
