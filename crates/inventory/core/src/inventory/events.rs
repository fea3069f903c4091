//! Change notifications.

use crate::state::{InstanceId, PlacementRecord, RecordId};

/// Notification fired after a mutation has fully committed.
///
/// Observers are fire-and-forget: they cannot veto or acknowledge. Every
/// mutation ends with a [`InventoryEvent::DataChanged`] for bulk consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryEvent<'a> {
    ItemAdded(&'a PlacementRecord),
    ItemRemoved { id: RecordId, instance: InstanceId },
    DataChanged,
}

/// Boxed observer callback.
pub type Observer = Box<dyn FnMut(&InventoryEvent<'_>) + Send>;

pub(crate) fn emit(observers: &mut [Observer], event: &InventoryEvent<'_>) {
    for observer in observers.iter_mut() {
        observer(event);
    }
}
