//! Layout notifications for the surrounding UI.

use crate::markers::{Marker, MarkerKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutEvent {
    MarkerPlaced { index: usize, marker: Marker },
    PlacementChanged(Option<MarkerKind>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub struct LayoutObservers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn FnMut(&LayoutEvent)>)>,
}

impl LayoutObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&LayoutEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver to every observer in subscription order.
    pub fn notify(&mut self, event: &LayoutEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer(event);
        }
    }
}

impl std::fmt::Debug for LayoutObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutObservers")
            .field("observers", &self.entries.len())
            .finish()
    }
}
