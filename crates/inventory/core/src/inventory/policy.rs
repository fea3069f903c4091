//! Per-inventory policy hooks.
//!
//! A policy decides *whether* an operation may happen; the grid decides
//! whether it fits. Policies are plain values handed to the builder, so the
//! same engine serves the bag, the pickup overflow and equipment slots.

use crate::env::{Template, TypeTagSet};
use crate::state::{GridStore, PlacementRecord};

use super::RejectReason;

pub trait InventoryPolicy: Send + Sync {
    /// Whether `template` may enter this inventory in its current state.
    ///
    /// # Errors
    ///
    /// Returns the reason the item is declined.
    fn can_accept(&self, template: &Template, grid: &GridStore) -> Result<(), RejectReason> {
        let _ = (template, grid);
        Ok(())
    }

    /// Whether `record` may leave this inventory.
    fn can_remove(&self, record: &PlacementRecord) -> bool {
        let _ = record;
        true
    }

    /// Elastic inventories grow to fit the item they receive while empty and
    /// shrink back to their initial size once emptied.
    fn is_elastic(&self) -> bool {
        false
    }
}

/// Accepts and releases everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPolicy;

impl InventoryPolicy for StandardPolicy {}

/// Pickup overflow: holds at most one item of any shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleSlotPolicy;

impl InventoryPolicy for SingleSlotPolicy {
    fn can_accept(&self, _template: &Template, grid: &GridStore) -> Result<(), RejectReason> {
        if grid.is_empty() {
            Ok(())
        } else {
            Err(RejectReason::ContainerFull)
        }
    }

    fn is_elastic(&self) -> bool {
        true
    }
}

/// Accepts only the listed item kinds; used for equipment slots.
#[derive(Clone, Copy, Debug)]
pub struct KindFilterPolicy {
    accepts: TypeTagSet,
    single_item: bool,
}

impl KindFilterPolicy {
    pub fn new(accepts: TypeTagSet) -> Self {
        Self {
            accepts,
            single_item: false,
        }
    }

    /// Additionally limits the inventory to one item at a time.
    pub fn single_item(mut self) -> Self {
        self.single_item = true;
        self
    }

    pub fn accepts(&self) -> TypeTagSet {
        self.accepts
    }
}

impl InventoryPolicy for KindFilterPolicy {
    fn can_accept(&self, template: &Template, grid: &GridStore) -> Result<(), RejectReason> {
        let tag = template.type_tag();
        if !self.accepts.contains_tag(tag) {
            return Err(RejectReason::TypeNotAccepted(tag));
        }
        if self.single_item && !grid.is_empty() {
            return Err(RejectReason::ContainerFull);
        }
        Ok(())
    }
}

type AcceptFn = dyn Fn(&Template, &GridStore) -> Result<(), RejectReason> + Send + Sync;
type RemoveFn = dyn Fn(&PlacementRecord) -> bool + Send + Sync;

/// Policy assembled from closures. Hooks left unset allow everything.
#[derive(Default)]
pub struct FnPolicy {
    accept: Option<Box<AcceptFn>>,
    remove: Option<Box<RemoveFn>>,
    elastic: bool,
}

impl FnPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_accept<F>(mut self, f: F) -> Self
    where
        F: Fn(&Template, &GridStore) -> Result<(), RejectReason> + Send + Sync + 'static,
    {
        self.accept = Some(Box::new(f));
        self
    }

    pub fn on_remove<F>(mut self, f: F) -> Self
    where
        F: Fn(&PlacementRecord) -> bool + Send + Sync + 'static,
    {
        self.remove = Some(Box::new(f));
        self
    }

    pub fn elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }
}

impl core::fmt::Debug for FnPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnPolicy")
            .field("accept", &self.accept.is_some())
            .field("remove", &self.remove.is_some())
            .field("elastic", &self.elastic)
            .finish()
    }
}

impl InventoryPolicy for FnPolicy {
    fn can_accept(&self, template: &Template, grid: &GridStore) -> Result<(), RejectReason> {
        match &self.accept {
            Some(accept) => accept(template, grid),
            None => Ok(()),
        }
    }

    fn can_remove(&self, record: &PlacementRecord) -> bool {
        self.remove.as_ref().is_none_or(|remove| remove(record))
    }

    fn is_elastic(&self) -> bool {
        self.elastic
    }
}
