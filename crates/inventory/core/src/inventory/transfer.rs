//! Moving an item between two inventories.

use crate::state::{GridPosition, RecordId};

use super::{Inventory, InventoryError, RejectReason};

/// Moves record `id` from `source` into `destination`.
///
/// The destination receives a copy with a fresh instance id, then the
/// original is removed from the source. If removal fails the copy is taken
/// back out of the destination, so on any error both inventories are left as
/// they were. `rotation` defaults to the record's current orientation.
///
/// # Errors
///
/// `NotFound` or `Rejected` from the source, or any error from
/// [`Inventory::add_existing`] on the destination.
pub fn transfer(
    source: &mut Inventory,
    id: RecordId,
    destination: &mut Inventory,
    position: Option<GridPosition>,
    rotation: Option<u8>,
) -> Result<RecordId, InventoryError> {
    let record = source.get(id).ok_or(InventoryError::NotFound(id))?;
    if !source.policy().can_remove(record) {
        return Err(RejectReason::RemovalDenied.into());
    }

    let rotation = rotation.or(Some(record.rotation()));
    let added = destination.add_existing(record, position, rotation)?.id();

    if let Err(error) = source.remove(id) {
        destination.detach(added);
        return Err(error);
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::env::{AmmoRules, ShapeId, ShapeLibrary, StaticTemplates, Template, TemplateRules};
    use crate::inventory::SingleSlotPolicy;
    use crate::state::{AmmoState, GridSize, ItemState};

    fn ammo() -> Template {
        Template::new(
            "ammo",
            ShapeId::SINGLE,
            TemplateRules::Ammo(AmmoRules {
                max_ammo_per_stack: 10,
            }),
        )
    }

    fn pair() -> (Inventory, Inventory) {
        let shapes = Arc::new(ShapeLibrary::builtin());
        let templates: Arc<StaticTemplates> = Arc::new([ammo()].into_iter().collect());
        let bag = Inventory::builder(Arc::clone(&shapes), templates.clone())
            .size(GridSize::new(3, 3))
            .build();
        let slot = Inventory::builder(shapes, templates)
            .size(GridSize::new(1, 1))
            .policy(SingleSlotPolicy)
            .build();
        (bag, slot)
    }

    #[test]
    fn transfer_copies_state_under_a_fresh_id() {
        let (mut bag, mut slot) = pair();
        let id = bag.add_new(&ammo(), None, None).unwrap().id();
        bag.update_instance(id, |item, _| {
            item.state_mut().ammo_mut().map(|a| a.consume(3))
        })
        .unwrap();
        let original = bag.get(id).unwrap().instance().id();

        let moved = transfer(&mut bag, id, &mut slot, None, None).unwrap();

        assert!(bag.is_empty());
        assert!(!slot.contains_instance(original));
        let record = slot.get(moved).unwrap();
        assert_ne!(record.instance().id(), original);
        assert_eq!(
            record.instance().state(),
            &ItemState::Ammo(AmmoState { current_ammo: 7 })
        );
    }

    #[test]
    fn failed_transfer_leaves_both_sides_untouched() {
        let (mut bag, mut slot) = pair();
        let first = bag.add_new(&ammo(), None, None).unwrap().id();
        let second = bag.add_new(&ammo(), None, None).unwrap().id();
        transfer(&mut bag, first, &mut slot, None, None).unwrap();

        let (bag_digest, slot_digest) = (bag.grid().digest(), slot.grid().digest());
        assert_eq!(
            transfer(&mut bag, second, &mut slot, None, None),
            Err(InventoryError::Rejected(RejectReason::ContainerFull))
        );
        assert_eq!(bag.grid().digest(), bag_digest);
        assert_eq!(slot.grid().digest(), slot_digest);
        assert_eq!(
            transfer(&mut bag, RecordId(42), &mut slot, None, None),
            Err(InventoryError::NotFound(RecordId(42)))
        );
    }
}
