//! # World Events
//!
//! A typed callback registry. Listeners subscribe to one [`EventKind`] with an
//! [`EventPriority`]; [`EventRegistry::dispatch`] calls them from
//! `Lowest` to `Monitor`, registration order breaking ties.
//!
//! ```
//! use chunk_world::events::{EventKind, EventPriority, EventRegistry, WorldEvent};
//! use cgmath::Point3;
//!
//! let mut events = EventRegistry::new();
//! events.register(EventKind::ChunkLoaded, EventPriority::Normal, |event| {
//!     if let WorldEvent::ChunkLoaded { coord } = event {
//!         println!("loaded {coord:?}");
//!     }
//! });
//! events.dispatch(&WorldEvent::ChunkLoaded { coord: Point3::new(0, 0, 0) });
//! ```

use std::collections::HashMap;

use crate::voxels::ChunkCoord;

/// Something that happened to a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// A chunk was generated and published.
    ChunkLoaded { coord: ChunkCoord },
    /// Generation for a chunk failed; nothing was stored.
    ChunkLoadFailed { coord: ChunkCoord, reason: String },
    /// A proposed world name was rejected and replaced.
    NameFallback { proposed: String, fallback: String },
}

/// Discriminant of a [`WorldEvent`], used as the subscription key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    ChunkLoaded,
    ChunkLoadFailed,
    NameFallback,
}

impl WorldEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorldEvent::ChunkLoaded { .. } => EventKind::ChunkLoaded,
            WorldEvent::ChunkLoadFailed { .. } => EventKind::ChunkLoadFailed,
            WorldEvent::NameFallback { .. } => EventKind::NameFallback,
        }
    }
}

/// Order in which listeners of the same kind run. `Monitor` runs last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    Lowest,
    Low,
    Normal,
    High,
    Highest,
    Monitor,
}

/// Handle returned by [`EventRegistry::register`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn Fn(&WorldEvent) + Send + Sync>;

struct Listener {
    id: ListenerId,
    priority: EventPriority,
    callback: Callback,
}

/// Listeners grouped by event kind, each group kept sorted by priority.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<EventKind, Vec<Listener>>,
    next_id: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, kind: EventKind, priority: EventPriority, callback: F) -> ListenerId
    where
        F: Fn(&WorldEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let group = self.listeners.entry(kind).or_default();
        // Insert after every listener with priority <= ours to keep ties in registration order.
        let position = group.partition_point(|listener| listener.priority <= priority);
        group.insert(
            position,
            Listener {
                id,
                priority,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        for group in self.listeners.values_mut() {
            if let Some(position) = group.iter().position(|listener| listener.id == id) {
                group.remove(position);
                return true;
            }
        }
        false
    }

    pub fn dispatch(&self, event: &WorldEvent) {
        if let Some(group) = self.listeners.get(&event.kind()) {
            for listener in group {
                (listener.callback)(event);
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, group)| (*kind, group.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
