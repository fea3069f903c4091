//! Player-facing inventory session.
//!
//! An [`InventorySession`] owns the bag, the pickup overflow and one small
//! inventory per configured equipment slot. It sequences cross-container
//! operations (pickup fallback, transfers, equipping), forwards engine
//! notifications to the [`EventBus`] and saves or restores every container
//! at once.

use std::collections::BTreeMap;
use std::sync::Arc;

use inventory_content::ContentBundle;
use inventory_core::{
    EquipmentSlot, GridPosition, InstanceId, Inventory, InventoryConfig, InventoryError,
    InventoryEvent, ItemInstance, KindFilterPolicy, PlacementRecord, RecordId, ShapeLibrary,
    SingleSlotPolicy, Template, TemplateId, TemplateResolver, TypeTagSet, transfer,
};

use crate::container::ContainerId;
use crate::error::{Result, RuntimeError};
use crate::events::{ContainerChange, ContainerEvent, EventBus, SessionEvent, TransferEvent};
use crate::snapshot::{ContainerSnapshot, SessionSnapshot};

/// Bag, overflow and equipment of one player.
pub struct InventorySession {
    config: InventoryConfig,
    shapes: Arc<ShapeLibrary>,
    resolver: Arc<dyn TemplateResolver>,
    containers: BTreeMap<ContainerId, Inventory>,
    bus: EventBus,
}

impl InventorySession {
    pub fn new(
        config: InventoryConfig,
        shapes: Arc<ShapeLibrary>,
        resolver: Arc<dyn TemplateResolver>,
        bus: EventBus,
    ) -> Self {
        let mut session = Self {
            config,
            shapes,
            resolver,
            containers: BTreeMap::new(),
            bus,
        };
        let mut containers = session.build_containers();
        for (id, inventory) in containers.iter_mut() {
            inventory.subscribe(forward_to(session.bus.clone(), *id));
        }
        session.containers = containers;
        tracing::debug!(
            containers = session.containers.len(),
            bag = %session.config.bag,
            "inventory session created"
        );
        session
    }

    /// Builds a session from loaded content.
    pub fn from_content(content: &ContentBundle, bus: EventBus) -> Self {
        Self::new(
            content.config.clone(),
            Arc::clone(&content.shapes),
            content.templates.clone(),
            bus,
        )
    }

    /// Fresh, empty containers with no observers attached.
    fn build_containers(&self) -> BTreeMap<ContainerId, Inventory> {
        let mut containers = BTreeMap::new();
        containers.insert(ContainerId::Bag, self.build_container(ContainerId::Bag));
        containers.insert(
            ContainerId::Overflow,
            self.build_container(ContainerId::Overflow),
        );
        for slot in &self.config.equipment {
            let id = ContainerId::Equipment(slot.slot);
            containers.insert(id, self.build_container(id));
        }
        containers
    }

    fn build_container(&self, id: ContainerId) -> Inventory {
        let builder = Inventory::builder(Arc::clone(&self.shapes), Arc::clone(&self.resolver));
        match id {
            ContainerId::Bag => builder.size(self.config.bag).build(),
            ContainerId::Overflow => builder
                .size(self.config.overflow)
                .policy(SingleSlotPolicy)
                .build(),
            ContainerId::Equipment(slot) => match self.config.slot(slot) {
                Some(slot) => builder
                    .size(slot.size)
                    .policy(KindFilterPolicy::new(slot.accepts).single_item())
                    .build(),
                None => builder.policy(KindFilterPolicy::new(TypeTagSet::empty())).build(),
            },
        }
    }

    // ===== access =====

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// # Errors
    ///
    /// `UnknownContainer` for an equipment slot missing from the config.
    pub fn container(&self, id: ContainerId) -> Result<&Inventory> {
        self.containers
            .get(&id)
            .ok_or(RuntimeError::UnknownContainer(id))
    }

    fn container_mut(&mut self, id: ContainerId) -> Result<&mut Inventory> {
        self.containers
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownContainer(id))
    }

    pub fn bag(&self) -> Result<&Inventory> {
        self.container(ContainerId::Bag)
    }

    pub fn overflow(&self) -> Result<&Inventory> {
        self.container(ContainerId::Overflow)
    }

    pub fn equipment(&self, slot: EquipmentSlot) -> Option<&Inventory> {
        self.containers.get(&ContainerId::Equipment(slot))
    }

    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &Inventory)> {
        self.containers.iter().map(|(id, inv)| (*id, inv))
    }

    /// Finds where an item instance currently lives.
    pub fn locate(&self, instance: InstanceId) -> Option<(ContainerId, &PlacementRecord)> {
        self.containers
            .iter()
            .find_map(|(id, inv)| inv.find_by_instance(instance).map(|r| (*id, r)))
    }

    /// Items made from `template` across every container.
    pub fn count_of(&self, template: &TemplateId) -> usize {
        self.containers.values().map(|inv| inv.count_of(template)).sum()
    }

    // ===== operations =====

    /// Creates a new item and stores it in the bag, or in the overflow when
    /// the bag has no room or declines it.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound`, or the overflow's error when neither container
    /// takes the item. Nothing is evicted to make room.
    pub fn pickup(&mut self, template_id: &TemplateId) -> Result<(ContainerId, RecordId)> {
        let template = self
            .resolver
            .resolve(template_id)
            .ok_or_else(|| InventoryError::TemplateNotFound(template_id.clone()))?;

        let bag_error = match self.add_anywhere(ContainerId::Bag, &template) {
            Ok(record) => return Ok((ContainerId::Bag, record)),
            Err(error) => error,
        };
        tracing::debug!(template = %template_id, error = %bag_error, "bag declined pickup");

        match self.add_anywhere(ContainerId::Overflow, &template) {
            Ok(record) => Ok((ContainerId::Overflow, record)),
            Err(error) => {
                tracing::warn!(template = %template_id, error = %error, "pickup rejected");
                Err(error)
            }
        }
    }

    fn add_anywhere(&mut self, id: ContainerId, template: &Template) -> Result<RecordId> {
        let inventory = self.container_mut(id)?;
        let placement = inventory.find_free_placement(template);
        let record = inventory
            .add_new(
                template,
                placement.map(|(position, _)| position),
                placement.map(|(_, rotation)| rotation),
            )?
            .id();
        tracing::debug!(container = %id, record = %record, template = %template.id, "item added");
        Ok(record)
    }

    /// Moves a record between containers.
    ///
    /// With an explicit `position` the item keeps its orientation; otherwise
    /// the first free placement in any orientation is used. Moving within one
    /// container relocates the record in place.
    ///
    /// # Errors
    ///
    /// Any engine error from either side; both containers are unchanged when
    /// it fails.
    pub fn transfer(
        &mut self,
        from: ContainerId,
        id: RecordId,
        to: ContainerId,
        position: Option<GridPosition>,
    ) -> Result<RecordId> {
        if from == to {
            if let Some(position) = position {
                self.container_mut(from)?.move_item(id, position)?;
            } else {
                self.container(from)?
                    .get(id)
                    .ok_or(InventoryError::NotFound(id))?;
            }
            return Ok(id);
        }

        // Check the destination exists before taking the source out.
        self.container(to)?;
        let mut source = self
            .containers
            .remove(&from)
            .ok_or(RuntimeError::UnknownContainer(from))?;
        let result = self.transfer_out_of(&mut source, from, id, to, position);
        self.containers.insert(from, source);
        result
    }

    fn transfer_out_of(
        &mut self,
        source: &mut Inventory,
        from: ContainerId,
        id: RecordId,
        to: ContainerId,
        position: Option<GridPosition>,
    ) -> Result<RecordId> {
        let record = source.get(id).ok_or(InventoryError::NotFound(id))?;
        let (template_id, source_instance) =
            (record.instance().template_id().clone(), record.instance().id());

        let destination = self
            .containers
            .get_mut(&to)
            .ok_or(RuntimeError::UnknownContainer(to))?;
        let (position, rotation) = match position {
            Some(position) => (Some(position), None),
            None => match self.resolver.resolve(&template_id) {
                Some(template) => match destination.find_free_placement(&template) {
                    Some((position, rotation)) => (Some(position), Some(rotation)),
                    None => (None, None),
                },
                None => (None, None),
            },
        };

        let added = match transfer(source, id, destination, position, rotation) {
            Ok(added) => added,
            Err(error) => {
                tracing::warn!(
                    from = %from, to = %to, record = %id, error = %error,
                    "transfer rolled back"
                );
                return Err(error.into());
            }
        };
        let destination_instance = destination
            .get(added)
            .map(|r| r.instance().id())
            .ok_or(InventoryError::NotFound(added))?;

        tracing::info!(
            from = %from, to = %to, template = %template_id, record = %added,
            "item transferred"
        );
        self.bus.publish(SessionEvent::Transfer(TransferEvent {
            template: template_id,
            from,
            source_record: id,
            source_instance,
            to,
            destination_record: added,
            destination_instance,
        }));
        Ok(added)
    }

    /// Moves a record into an equipment slot.
    pub fn equip(
        &mut self,
        from: ContainerId,
        id: RecordId,
        slot: EquipmentSlot,
    ) -> Result<RecordId> {
        self.transfer(from, id, ContainerId::Equipment(slot), None)
    }

    /// Moves whatever a slot holds back to the bag, or to the overflow when
    /// the bag is full.
    ///
    /// # Errors
    ///
    /// `EmptySlot` when the slot holds nothing, or the overflow's error when
    /// neither container takes the item.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(ContainerId, RecordId)> {
        let from = ContainerId::Equipment(slot);
        let id = self
            .container(from)?
            .records()
            .next()
            .map(PlacementRecord::id)
            .ok_or(RuntimeError::EmptySlot(slot))?;

        match self.transfer(from, id, ContainerId::Bag, None) {
            Ok(record) => Ok((ContainerId::Bag, record)),
            Err(RuntimeError::Inventory(InventoryError::NoSpace | InventoryError::Rejected(_))) => {
                let record = self.transfer(from, id, ContainerId::Overflow, None)?;
                Ok((ContainerId::Overflow, record))
            }
            Err(error) => Err(error),
        }
    }

    /// Removes an item from the session entirely.
    pub fn discard(&mut self, container: ContainerId, id: RecordId) -> Result<TemplateId> {
        let instance = self.container_mut(container)?.remove(id)?;
        tracing::debug!(container = %container, record = %id, "item discarded");
        Ok(instance.template_id().clone())
    }

    /// Mutates an item's state in place.
    pub fn update_item<R>(
        &mut self,
        container: ContainerId,
        id: RecordId,
        f: impl FnOnce(&mut ItemInstance, &Template) -> R,
    ) -> Result<R> {
        Ok(self.container_mut(container)?.update_instance(id, f)?)
    }

    // ===== persistence =====

    /// Captures every container.
    pub fn save(&self) -> Result<SessionSnapshot> {
        let containers = self
            .containers
            .iter()
            .map(|(id, inventory)| -> Result<ContainerSnapshot> {
                Ok(ContainerSnapshot {
                    container: *id,
                    inventory: inventory.snapshot()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let snapshot = SessionSnapshot {
            format_version: SessionSnapshot::FORMAT_VERSION,
            containers,
        };
        tracing::info!(items = snapshot.item_count(), "session saved");
        Ok(snapshot)
    }

    /// Replaces every container's contents with `snapshot`.
    ///
    /// All containers are rebuilt off to the side and swapped in together,
    /// so a failure leaves the session untouched and publishes nothing.
    /// Containers absent from the snapshot come back empty.
    ///
    /// # Errors
    ///
    /// `UnknownContainer` for a container this session does not configure,
    /// or `CorruptData` from the engine.
    pub fn load(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let mut rebuilt = self.build_containers();
        for entry in &snapshot.containers {
            let inventory = rebuilt
                .get_mut(&entry.container)
                .ok_or(RuntimeError::UnknownContainer(entry.container))?;
            inventory.restore_snapshot(&entry.inventory)?;
        }
        for (id, inventory) in rebuilt.iter_mut() {
            inventory.subscribe(forward_to(self.bus.clone(), *id));
            self.bus.publish(SessionEvent::Inventory(ContainerEvent {
                container: *id,
                change: ContainerChange::DataChanged,
            }));
        }
        self.containers = rebuilt;
        tracing::info!(items = snapshot.item_count(), "session loaded");
        Ok(())
    }
}

impl std::fmt::Debug for InventorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventorySession")
            .field("config", &self.config)
            .field("containers", &self.containers)
            .finish_non_exhaustive()
    }
}

/// Observer that republishes engine notifications as owned bus events.
fn forward_to(
    bus: EventBus,
    container: ContainerId,
) -> impl FnMut(&InventoryEvent<'_>) + Send + 'static {
    move |event| {
        bus.publish(SessionEvent::Inventory(ContainerEvent {
            container,
            change: ContainerChange::from(event),
        }));
    }
}
