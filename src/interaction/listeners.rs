//! Global listener bookkeeping.
//!
//! A drag attaches a move listener and a release listener when it starts and
//! must detach both on every way out. Move and release events are only
//! routed to a drag while its listeners are registered.

/// The two kinds of drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Repositioning a module by its header.
    Module,
    /// Pulling a cable out of an output port.
    Cable,
}

/// Event a listener is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerEvent {
    Move,
    Release,
}

/// A registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Listener {
    /// Drag that owns the listener.
    pub owner: DragKind,
    /// Event it listens for.
    pub event: ListenerEvent,
}

/// Set of currently registered listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the move and release listeners of a drag.
    ///
    /// Registering twice for the same owner does not duplicate listeners.
    pub fn register(&mut self, owner: DragKind) {
        for event in [ListenerEvent::Move, ListenerEvent::Release] {
            let listener = Listener { owner, event };
            if !self.listeners.contains(&listener) {
                self.listeners.push(listener);
            }
        }
    }

    /// Detaches every listener of a drag. Safe to call when none are attached.
    pub fn unregister(&mut self, owner: DragKind) {
        self.listeners.retain(|l| l.owner != owner);
    }

    /// Returns true if the drag listens for the event.
    pub fn is_registered(&self, owner: DragKind, event: ListenerEvent) -> bool {
        self.listeners.contains(&Listener { owner, event })
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
