//! Inventory orchestrator.
//!
//! [`Inventory`] composes a [`GridStore`] with an injected template resolver,
//! a policy and a list of observers. Each operation is a single synchronous
//! call that either commits completely (grid mutated, observers notified) or
//! fails without touching anything. Nothing is retried internally.
mod error;
mod events;
mod policy;
#[cfg(feature = "serde")]
mod snapshot;
mod transfer;

use std::fmt;
use std::sync::Arc;

pub use error::{InventoryError, RejectReason};
pub use events::{InventoryEvent, Observer};
pub use policy::{
    FnPolicy, InventoryPolicy, KindFilterPolicy, SingleSlotPolicy, StandardPolicy,
};
pub use transfer::transfer;

use crate::config::InventoryConfig;
use crate::env::{ShapeId, ShapeLibrary, Template, TemplateId, TemplateResolver};
use crate::state::{
    Candidate, GridPosition, GridSize, GridStore, InstanceId, ItemInstance, PlacementRecord,
    RecordId,
};

use events::emit;

pub type Result<T> = std::result::Result<T, InventoryError>;

/// One grid inventory with its policy and observers.
pub struct Inventory {
    grid: GridStore,
    initial_size: GridSize,
    resolver: Arc<dyn TemplateResolver>,
    policy: Box<dyn InventoryPolicy>,
    observers: Vec<Observer>,
    next_id: RecordId,
}

impl Inventory {
    /// Starts building an inventory. Nothing is allocated until
    /// [`InventoryBuilder::build`].
    pub fn builder(
        shapes: Arc<ShapeLibrary>,
        resolver: Arc<dyn TemplateResolver>,
    ) -> InventoryBuilder {
        InventoryBuilder::new(shapes, resolver)
    }

    // ===== mutations =====

    /// Creates a new item from `template` and places it.
    ///
    /// A valid `position` is used as given; otherwise the first free anchor
    /// in row-major order is used.
    ///
    /// # Errors
    ///
    /// `Rejected` if the policy declines the item, `NoSpace` if it fits
    /// nowhere.
    pub fn add_new(
        &mut self,
        template: &Template,
        position: Option<GridPosition>,
        rotation: Option<u8>,
    ) -> Result<&PlacementRecord> {
        self.policy.can_accept(template, &self.grid)?;
        let instance = ItemInstance::create(template);
        let id = self.place_instance(template, instance, position, rotation, 1)?;
        self.record_or_missing(id)
    }

    /// Resolves `template_id` through the injected resolver, then behaves
    /// like [`Inventory::add_new`].
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` before anything else is attempted.
    pub fn add_by_id(
        &mut self,
        template_id: &TemplateId,
        position: Option<GridPosition>,
        rotation: Option<u8>,
    ) -> Result<&PlacementRecord> {
        let template = self.resolve(template_id)?;
        self.add_new(&template, position, rotation)
    }

    /// Places a *copy* of the item held by `source` (typically a record of
    /// another inventory). The copy gets a fresh instance id; the source is
    /// never touched, so two inventories never share mutable state.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound`, `Rejected` or `NoSpace`, as for
    /// [`Inventory::add_new`].
    pub fn add_existing(
        &mut self,
        source: &PlacementRecord,
        position: Option<GridPosition>,
        rotation: Option<u8>,
    ) -> Result<&PlacementRecord> {
        let template = self.resolve(source.instance().template_id())?;
        self.policy.can_accept(&template, &self.grid)?;
        let instance = source.instance().duplicate();
        let id = self.place_instance(
            &template,
            instance,
            position,
            rotation,
            source.stack_count(),
        )?;
        self.record_or_missing(id)
    }

    /// Detaches a record and hands its instance to the caller.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Rejected` if the policy keeps the item.
    pub fn remove(&mut self, id: RecordId) -> Result<ItemInstance> {
        let record = self.grid.get(id).ok_or(InventoryError::NotFound(id))?;
        if !self.policy.can_remove(record) {
            return Err(RejectReason::RemovalDenied.into());
        }
        self.detach(id).ok_or(InventoryError::NotFound(id))
    }

    /// Moves a record to a new anchor, keeping its orientation.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `InvalidPosition` with the record left exactly where it
    /// was.
    pub fn move_item(&mut self, id: RecordId, position: GridPosition) -> Result<()> {
        let record = self.grid.get(id).ok_or(InventoryError::NotFound(id))?;
        if record.position() == position {
            return Ok(());
        }
        let rotation = record.rotation();
        if !self.grid.relocate(id, position, rotation) {
            return Err(InventoryError::InvalidPosition(position));
        }
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(())
    }

    /// Turns a record to its next orientation around the same anchor.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NotRotatable` for single-orientation shapes, or
    /// `InvalidPosition` when the next orientation does not fit (the original
    /// orientation is kept).
    pub fn rotate(&mut self, id: RecordId) -> Result<()> {
        let record = self.grid.get(id).ok_or(InventoryError::NotFound(id))?;
        let count = self.grid.shapes().rotation_count(record.shape());
        if count <= 1 {
            return Err(InventoryError::NotRotatable(id));
        }
        let (position, next) = (record.position(), (record.rotation() + 1) % count);
        if !self.grid.relocate(id, position, next) {
            return Err(InventoryError::InvalidPosition(position));
        }
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(())
    }

    /// Empties the inventory and restores its initial size.
    pub fn clear(&mut self) {
        self.grid.reset(self.initial_size);
        emit(&mut self.observers, &InventoryEvent::DataChanged);
    }

    /// Mutates a placed item's state through `f`, then notifies observers.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `TemplateNotFound` if the item's
    /// template no longer resolves.
    pub fn update_instance<R>(
        &mut self,
        id: RecordId,
        f: impl FnOnce(&mut ItemInstance, &Template) -> R,
    ) -> Result<R> {
        let record = self.grid.get(id).ok_or(InventoryError::NotFound(id))?;
        let template = self.resolve(record.instance().template_id())?;
        let instance = self
            .grid
            .instance_mut(id)
            .ok_or(InventoryError::NotFound(id))?;
        let result = f(instance, &template);
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(result)
    }

    /// Sets the visual stack count, clamped to `[1, template.max_stack]`.
    ///
    /// # Errors
    ///
    /// `NotFound` or `TemplateNotFound`.
    pub fn set_stack_count(&mut self, id: RecordId, count: u16) -> Result<u16> {
        let record = self.grid.get(id).ok_or(InventoryError::NotFound(id))?;
        let template = self.resolve(record.instance().template_id())?;
        let clamped = count.clamp(1, template.max_stack.max(1));
        let record = self
            .grid
            .record_mut(id)
            .ok_or(InventoryError::NotFound(id))?;
        record.set_stack_count(clamped);
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(clamped)
    }

    /// Registers an observer for every committed change.
    pub fn subscribe(&mut self, observer: impl FnMut(&InventoryEvent<'_>) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ===== queries =====

    /// First free anchor for `template` at `rotation`, without mutating.
    pub fn find_free_position_for(
        &self,
        template: &Template,
        rotation: u8,
    ) -> Option<GridPosition> {
        if self.grows_when_empty() {
            let bounds = self.grid.shapes().bounds(template.shape, rotation);
            let size = self.initial_size.union(bounds);
            return self
                .fits_within(size, template.shape, rotation, GridPosition::ORIGIN)
                .then_some(GridPosition::ORIGIN);
        }
        self.grid
            .find_valid_position(&Candidate::new(template.shape, rotation))
    }

    /// Whether `template` fits anywhere in its default orientation.
    pub fn has_space_for(&self, template: &Template) -> bool {
        self.find_free_position_for(template, 0).is_some()
    }

    /// Whether `template` fits at `position` in `rotation`.
    pub fn has_space_for_at(
        &self,
        template: &Template,
        position: GridPosition,
        rotation: u8,
    ) -> bool {
        if self.grows_when_empty() {
            let bounds = self.grid.shapes().bounds(template.shape, rotation);
            let size = self.initial_size.union(bounds);
            return self.fits_within(size, template.shape, rotation, position);
        }
        self.grid
            .is_valid_position(position, &Candidate::new(template.shape, rotation))
    }

    /// First orientation (in index order) with a free anchor, and that anchor.
    pub fn find_free_placement(&self, template: &Template) -> Option<(GridPosition, u8)> {
        let count = self.grid.shapes().rotation_count(template.shape);
        (0..count).find_map(|rotation| {
            self.find_free_position_for(template, rotation)
                .map(|position| (position, rotation))
        })
    }

    pub fn get(&self, id: RecordId) -> Option<&PlacementRecord> {
        self.grid.get(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.grid.records()
    }

    /// Owned copy of every record.
    pub fn all_records(&self) -> Vec<PlacementRecord> {
        self.grid.all_records()
    }

    pub fn find_by_instance(&self, instance: InstanceId) -> Option<&PlacementRecord> {
        self.grid.records().find(|r| r.instance().id() == instance)
    }

    pub fn contains_instance(&self, instance: InstanceId) -> bool {
        self.find_by_instance(instance).is_some()
    }

    /// Number of placed items made from `template`.
    pub fn count_of(&self, template: &TemplateId) -> usize {
        self.grid
            .records()
            .filter(|r| r.instance().template_id() == template)
            .count()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn initial_size(&self) -> GridSize {
        self.initial_size
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn resolver(&self) -> &Arc<dyn TemplateResolver> {
        &self.resolver
    }

    pub fn policy(&self) -> &dyn InventoryPolicy {
        self.policy.as_ref()
    }

    // ===== internals =====

    fn resolve(&self, id: &TemplateId) -> Result<Template> {
        self.resolver
            .resolve(id)
            .ok_or_else(|| InventoryError::TemplateNotFound(id.clone()))
    }

    fn record_or_missing(&self, id: RecordId) -> Result<&PlacementRecord> {
        self.grid.get(id).ok_or(InventoryError::NotFound(id))
    }

    fn grows_when_empty(&self) -> bool {
        self.policy.is_elastic() && self.grid.is_empty()
    }

    fn fits_within(
        &self,
        size: GridSize,
        shape: ShapeId,
        rotation: u8,
        position: GridPosition,
    ) -> bool {
        self.grid
            .footprint(position, shape, rotation)
            .all(|cell| size.index_of_cell(cell).is_some())
    }

    /// Shared tail of every add: pick an anchor, commit, notify.
    fn place_instance(
        &mut self,
        template: &Template,
        instance: ItemInstance,
        position: Option<GridPosition>,
        rotation: Option<u8>,
        stack_count: u16,
    ) -> Result<RecordId> {
        let shapes = Arc::clone(self.grid.shapes());
        let rotation = rotation.unwrap_or(0) % shapes.rotation_count(template.shape);
        let candidate = Candidate::new(template.shape, rotation);

        // Elastic containers take the item's size while empty. The grid holds
        // nothing yet, so resizing loses no data and is undone on failure.
        let previous_size = self.grid.size();
        if self.grows_when_empty() {
            let bounds = shapes.bounds(template.shape, rotation);
            let size = self.initial_size.union(bounds);
            if size != previous_size {
                self.grid.reset(size);
            }
        }

        let target = position
            .filter(|&p| self.grid.is_valid_position(p, &candidate))
            .or_else(|| self.grid.find_valid_position(&candidate));
        let Some(target) = target else {
            self.restore_size(previous_size);
            return Err(InventoryError::NoSpace);
        };

        let id = self.next_id;
        let Some(following) = id.next() else {
            self.restore_size(previous_size);
            return Err(InventoryError::RecordIdsExhausted);
        };
        let stack_count = stack_count.min(template.max_stack.max(1));
        let record = PlacementRecord::new(id, instance, template.shape, target, rotation)
            .with_stack_count(stack_count);
        if self.grid.place(record).is_err() {
            self.restore_size(previous_size);
            return Err(InventoryError::InvalidPosition(target));
        }
        self.next_id = following;

        if let Some(record) = self.grid.get(id) {
            emit(&mut self.observers, &InventoryEvent::ItemAdded(record));
        }
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Ok(id)
    }

    fn restore_size(&mut self, size: GridSize) {
        if self.grid.is_empty() && self.grid.size() != size {
            self.grid.reset(size);
        }
    }

    /// Removes a record regardless of policy and notifies observers.
    pub(crate) fn detach(&mut self, id: RecordId) -> Option<ItemInstance> {
        let record = self.grid.remove(id)?;
        if self.policy.is_elastic() && self.grid.is_empty() {
            self.grid.reset(self.initial_size);
        }
        let instance = record.into_instance();
        emit(
            &mut self.observers,
            &InventoryEvent::ItemRemoved {
                id,
                instance: instance.id(),
            },
        );
        emit(&mut self.observers, &InventoryEvent::DataChanged);
        Some(instance)
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("grid", &self.grid)
            .field("initial_size", &self.initial_size)
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Inventory`]; the uninitialized state of an inventory.
pub struct InventoryBuilder {
    shapes: Arc<ShapeLibrary>,
    resolver: Arc<dyn TemplateResolver>,
    size: GridSize,
    policy: Box<dyn InventoryPolicy>,
    observers: Vec<Observer>,
}

impl InventoryBuilder {
    fn new(shapes: Arc<ShapeLibrary>, resolver: Arc<dyn TemplateResolver>) -> Self {
        Self {
            shapes,
            resolver,
            size: InventoryConfig::DEFAULT_BAG,
            policy: Box::new(StandardPolicy),
            observers: Vec::new(),
        }
    }

    pub fn size(mut self, size: GridSize) -> Self {
        self.size = size;
        self
    }

    pub fn policy(mut self, policy: impl InventoryPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn observer(mut self, observer: impl FnMut(&InventoryEvent<'_>) + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Allocates the grid.
    pub fn build(self) -> Inventory {
        Inventory {
            grid: GridStore::new(self.size, self.shapes),
            initial_size: self.size,
            resolver: self.resolver,
            policy: self.policy,
            observers: self.observers,
            next_id: RecordId::FIRST,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::env::{AmmoRules, StaticTemplates, TemplateRules, TypeTag, TypeTagSet};
    use crate::state::ItemState;

    fn ammo() -> Template {
        Template::new(
            "ammo",
            ShapeId::SINGLE,
            TemplateRules::Ammo(AmmoRules {
                max_ammo_per_stack: 30,
            }),
        )
        .with_max_stack(5)
    }

    fn l_block() -> Template {
        Template::new("crowbar", ShapeId::L, TemplateRules::Unarmed { damage: 3 })
    }

    fn inventory(size: GridSize) -> Inventory {
        let templates: StaticTemplates = [ammo(), l_block()].into_iter().collect();
        Inventory::builder(Arc::new(ShapeLibrary::builtin()), Arc::new(templates))
            .size(size)
            .build()
    }

    #[test]
    fn add_uses_given_position_when_valid() {
        let mut inv = inventory(GridSize::new(5, 5));
        let record = inv
            .add_new(&ammo(), Some(GridPosition::new(3, 2)), None)
            .unwrap();
        assert_eq!(record.position(), GridPosition::new(3, 2));
        assert_eq!(record.id(), RecordId::FIRST);
    }

    #[test]
    fn add_falls_back_to_search_when_position_invalid() {
        let mut inv = inventory(GridSize::new(5, 5));
        let record = inv
            .add_new(&l_block(), Some(GridPosition::new(4, 4)), None)
            .unwrap();
        assert_eq!(record.position(), GridPosition::ORIGIN);
    }

    #[test]
    fn add_reports_no_space_without_mutation() {
        let mut inv = inventory(GridSize::new(1, 2));
        let before = inv.grid().digest();
        assert_eq!(
            inv.add_new(&l_block(), None, None).map(|r| r.id()),
            Err(InventoryError::NoSpace)
        );
        assert!(inv.is_empty());
        assert_eq!(inv.grid().digest(), before);
    }

    #[test]
    fn add_by_id_reports_missing_templates() {
        let mut inv = inventory(GridSize::new(3, 3));
        let missing = TemplateId::new("plasma_rifle");
        assert_eq!(
            inv.add_by_id(&missing, None, None).map(|r| r.id()),
            Err(InventoryError::TemplateNotFound(missing))
        );
        assert!(inv.add_by_id(&TemplateId::new("ammo"), None, None).is_ok());
    }

    #[test]
    fn remove_returns_the_instance() {
        let mut inv = inventory(GridSize::new(3, 3));
        let (id, instance_id) = {
            let record = inv.add_new(&ammo(), None, None).unwrap();
            (record.id(), record.instance().id())
        };
        let instance = inv.remove(id).unwrap();
        assert_eq!(instance.id(), instance_id);
        assert_eq!(inv.remove(id).map(|i| i.id()), Err(InventoryError::NotFound(id)));
    }

    #[test]
    fn move_to_invalid_position_keeps_original() {
        let mut inv = inventory(GridSize::new(4, 4));
        let a = inv.add_new(&ammo(), None, None).unwrap().id();
        let b = inv.add_new(&ammo(), None, None).unwrap().id();
        let before = inv.grid().digest();

        assert_eq!(
            inv.move_item(a, GridPosition::new(1, 0)),
            Err(InventoryError::InvalidPosition(GridPosition::new(1, 0)))
        );
        assert_eq!(
            inv.move_item(b, GridPosition::new(4, 0)),
            Err(InventoryError::InvalidPosition(GridPosition::new(4, 0)))
        );
        assert_eq!(inv.grid().digest(), before);

        inv.move_item(a, GridPosition::new(3, 3)).unwrap();
        assert_eq!(inv.get(a).map(|r| r.position()), Some(GridPosition::new(3, 3)));
        assert!(inv.grid().verify_integrity());
    }

    #[test]
    fn anchors_at_coordinate_limits_are_invalid_positions() {
        let s_block = Template::new("hook", ShapeId::S, TemplateRules::Unarmed { damage: 1 });
        let mut inv = inventory(GridSize::new(4, 4));
        let id = inv.add_new(&s_block, None, None).unwrap().id();
        let before = inv.grid().digest();

        let far = GridPosition::new(i32::MAX, 0);
        assert_eq!(inv.move_item(id, far), Err(InventoryError::InvalidPosition(far)));
        assert!(!inv.has_space_for_at(&s_block, far, 1));
        assert!(!inv.has_space_for_at(&s_block, GridPosition::new(0, i32::MIN), 0));
        assert_eq!(inv.grid().digest(), before);

        // A requested anchor that cannot hold the item falls back to search.
        let placed = inv.add_new(&s_block, Some(far), None).unwrap().position();
        assert_eq!(placed, GridPosition::new(1, 1));
        assert!(inv.grid().verify_integrity());
    }

    #[test]
    fn rotate_single_orientation_shape_is_rejected() {
        let mut inv = inventory(GridSize::new(3, 3));
        let id = inv.add_new(&ammo(), None, None).unwrap().id();
        assert_eq!(inv.rotate(id), Err(InventoryError::NotRotatable(id)));
        assert_eq!(inv.rotate(RecordId(99)), Err(InventoryError::NotFound(RecordId(99))));
    }

    #[test]
    fn rotate_blocked_keeps_orientation() {
        let mut inv = inventory(GridSize::new(2, 3));
        let id = inv.add_new(&l_block(), None, None).unwrap().id();
        // Turned clockwise the L is three cells wide; the grid is two.
        let before = inv.grid().digest();
        assert_eq!(
            inv.rotate(id),
            Err(InventoryError::InvalidPosition(GridPosition::ORIGIN))
        );
        assert_eq!(inv.get(id).map(|r| r.rotation()), Some(0));
        assert_eq!(inv.grid().digest(), before);
    }

    #[test]
    fn clear_restores_initial_state() {
        let mut inv = inventory(GridSize::new(3, 3));
        inv.add_new(&ammo(), None, None).unwrap();
        inv.clear();
        assert!(inv.is_empty());
        assert_eq!(inv.size(), GridSize::new(3, 3));
        assert!(inv.has_space_for(&l_block()));
    }

    #[test]
    fn queries_do_not_mutate() {
        let mut inv = inventory(GridSize::new(3, 3));
        inv.add_new(&l_block(), None, None).unwrap();
        let before = inv.grid().digest();

        assert_eq!(
            inv.find_free_position_for(&ammo(), 0),
            Some(GridPosition::new(1, 0))
        );
        assert!(!inv.has_space_for(&l_block()));
        assert!(!inv.has_space_for_at(&ammo(), GridPosition::ORIGIN, 0));
        assert!(inv.has_space_for_at(&ammo(), GridPosition::new(2, 2), 0));
        assert_eq!(inv.grid().digest(), before);
    }

    #[test]
    fn find_free_placement_tries_other_rotations() {
        let inv = inventory(GridSize::new(3, 2));
        let placement = inv.find_free_placement(&l_block());
        assert_eq!(placement, Some((GridPosition::ORIGIN, 1)));
    }

    #[test]
    fn stack_count_is_clamped_to_template() {
        let mut inv = inventory(GridSize::new(3, 3));
        let id = inv.add_new(&ammo(), None, None).unwrap().id();
        assert_eq!(inv.set_stack_count(id, 9), Ok(5));
        assert_eq!(inv.set_stack_count(id, 0), Ok(1));
    }

    #[test]
    fn update_instance_mutates_state() {
        let mut inv = inventory(GridSize::new(3, 3));
        let id = inv.add_new(&ammo(), None, None).unwrap().id();
        let consumed = inv
            .update_instance(id, |item, _| {
                item.state_mut().ammo_mut().is_some_and(|ammo| ammo.consume(7))
            })
            .unwrap();
        assert!(consumed);
        assert_eq!(
            inv.get(id).map(|r| r.instance().state().clone()),
            Some(ItemState::Ammo(crate::state::AmmoState { current_ammo: 23 }))
        );
    }

    #[test]
    fn observers_fire_after_commit_only() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let templates: StaticTemplates = [ammo(), l_block()].into_iter().collect();
        let mut inv = Inventory::builder(Arc::new(ShapeLibrary::builtin()), Arc::new(templates))
            .size(GridSize::new(2, 2))
            .observer(move |event| {
                let entry = match event {
                    InventoryEvent::ItemAdded(record) => format!("added {}", record.id()),
                    InventoryEvent::ItemRemoved { id, .. } => format!("removed {id}"),
                    InventoryEvent::DataChanged => "changed".to_string(),
                };
                sink.lock().unwrap().push(entry);
            })
            .build();

        let id = inv.add_new(&ammo(), None, None).unwrap().id();
        assert!(inv.add_new(&l_block(), None, None).is_err());
        inv.remove(id).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["added #1", "changed", "removed #1", "changed"]
        );
    }

    #[test]
    fn kind_filter_rejects_other_kinds() {
        let templates: StaticTemplates = [ammo(), l_block()].into_iter().collect();
        let mut slot = Inventory::builder(Arc::new(ShapeLibrary::builtin()), Arc::new(templates))
            .size(GridSize::new(3, 3))
            .policy(KindFilterPolicy::new(TypeTagSet::UNARMED).single_item())
            .build();

        assert_eq!(
            slot.add_new(&ammo(), None, None).map(|r| r.id()),
            Err(InventoryError::Rejected(RejectReason::TypeNotAccepted(
                TypeTag::Ammo
            )))
        );
        slot.add_new(&l_block(), None, None).unwrap();
        assert_eq!(
            slot.add_new(&l_block(), None, None).map(|r| r.id()),
            Err(InventoryError::Rejected(RejectReason::ContainerFull))
        );
    }

    #[test]
    fn fn_policy_can_pin_items() {
        let templates: StaticTemplates = [ammo()].into_iter().collect();
        let mut inv = Inventory::builder(Arc::new(ShapeLibrary::builtin()), Arc::new(templates))
            .policy(FnPolicy::new().on_remove(|_| false))
            .build();
        let id = inv.add_new(&ammo(), None, None).unwrap().id();
        assert_eq!(
            inv.remove(id).map(|i| i.id()),
            Err(InventoryError::Rejected(RejectReason::RemovalDenied))
        );
        assert_eq!(inv.len(), 1);
    }
}
