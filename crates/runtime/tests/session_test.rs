use std::path::Path;
use std::sync::Arc;

use inventory_content::ContentFactory;
use inventory_core::{
    AmmoRules, DurabilityRules, EquipmentSlot, EquipmentSlotConfig, GridPosition, GridSize,
    InventoryConfig, InventoryError, ItemState, RejectReason, ShapeId, ShapeLibrary,
    StaticTemplates, Template, TemplateId, TemplateRules, TypeTag, TypeTagSet, WeaponRules,
};
use inventory_runtime::{
    ContainerChange, ContainerId, EventBus, FileSessionRepository, InventorySession,
    RuntimeError, SessionEvent, SessionRepository, SessionSnapshot, Topic,
};

fn templates() -> StaticTemplates {
    [
        Template::new(
            "shells",
            ShapeId::SINGLE,
            TemplateRules::Ammo(AmmoRules {
                max_ammo_per_stack: 10,
            }),
        ),
        Template::new(
            "axe",
            ShapeId::L,
            TemplateRules::MeleeWeapon(WeaponRules {
                durability: DurabilityRules::new(50),
                damage_rate: 5,
            }),
        ),
        Template::new("crate", ShapeId::SQUARE_2, TemplateRules::Unarmed { damage: 0 }),
    ]
    .into_iter()
    .collect()
}

fn small_config() -> InventoryConfig {
    InventoryConfig {
        bag: GridSize::new(2, 2),
        overflow: GridSize::new(1, 1),
        equipment: vec![EquipmentSlotConfig::new(
            EquipmentSlot::Melee,
            GridSize::new(3, 2),
            TypeTagSet::MELEE_WEAPON,
        )],
    }
}

fn session(bus: EventBus) -> InventorySession {
    InventorySession::new(
        small_config(),
        Arc::new(ShapeLibrary::builtin()),
        Arc::new(templates()),
        bus,
    )
}

fn id(name: &str) -> TemplateId {
    TemplateId::new(name)
}

#[test]
fn pickup_falls_back_to_overflow_then_rejects() {
    let mut session = session(EventBus::new());

    let (container, _) = session.pickup(&id("crate")).unwrap();
    assert_eq!(container, ContainerId::Bag);

    // The bag is full; the overflow grows to fit the L-shaped axe.
    let (container, record) = session.pickup(&id("axe")).unwrap();
    assert_eq!(container, ContainerId::Overflow);
    let overflow = session.overflow().unwrap();
    assert_eq!(overflow.size(), GridSize::new(2, 3));
    assert_eq!(overflow.get(record).unwrap().position(), GridPosition::ORIGIN);

    let error = session.pickup(&id("shells")).unwrap_err();
    assert!(matches!(
        error.as_inventory(),
        Some(InventoryError::Rejected(RejectReason::ContainerFull))
    ));
    assert_eq!(session.count_of(&id("shells")), 0);

    assert!(matches!(
        session.pickup(&id("grenade")),
        Err(RuntimeError::Inventory(InventoryError::TemplateNotFound(_)))
    ));
}

#[test]
fn equip_keeps_state_under_a_new_identity() {
    let bus = EventBus::new();
    let mut transfers = bus.subscribe(Topic::Transfer);
    let mut session = session(bus);

    // The 2x3 axe does not fit the 2x2 bag in any orientation.
    let (from, axe) = session.pickup(&id("axe")).unwrap();
    assert_eq!(from, ContainerId::Overflow);
    session
        .update_item(from, axe, |item, _| {
            if let Some(durability) = item.state_mut().durability_mut() {
                durability.take_damage(20);
            }
        })
        .unwrap();
    let original = session.overflow().unwrap().get(axe).unwrap().instance().id();

    let equipped = session.equip(from, axe, EquipmentSlot::Melee).unwrap();

    let overflow = session.overflow().unwrap();
    assert!(overflow.is_empty());
    assert_eq!(overflow.size(), GridSize::new(1, 1));
    assert!(session.locate(original).is_none());
    let slot = session.equipment(EquipmentSlot::Melee).unwrap();
    let record = slot.get(equipped).unwrap();
    assert_ne!(record.instance().id(), original);
    assert_eq!(
        record.instance().state().durability().map(|d| d.condition),
        Some(30)
    );
    // The 2x3 axe only fits the 3x2 slot on its side.
    assert_eq!(record.rotation() % 2, 1);

    match transfers.try_recv().unwrap() {
        SessionEvent::Transfer(event) => {
            assert_eq!(event.from, ContainerId::Overflow);
            assert_eq!(event.to, ContainerId::Equipment(EquipmentSlot::Melee));
            assert_eq!(event.source_instance, original);
            assert_eq!(event.destination_record, equipped);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn equipping_the_wrong_kind_changes_nothing() {
    let mut session = session(EventBus::new());
    let (_, shells) = session.pickup(&id("shells")).unwrap();
    let before = session.save().unwrap();

    let error = session
        .equip(ContainerId::Bag, shells, EquipmentSlot::Melee)
        .unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Inventory(InventoryError::Rejected(RejectReason::TypeNotAccepted(
            TypeTag::Ammo
        )))
    ));
    assert_eq!(session.save().unwrap(), before);

    assert!(matches!(
        session.equip(ContainerId::Bag, shells, EquipmentSlot::Body),
        Err(RuntimeError::UnknownContainer(_))
    ));
    assert!(session.bag().unwrap().get(shells).is_some());
}

#[test]
fn unequip_falls_back_to_overflow_when_the_bag_is_full() {
    let mut session = session(EventBus::new());
    let (from, axe) = session.pickup(&id("axe")).unwrap();
    session.equip(from, axe, EquipmentSlot::Melee).unwrap();
    session.pickup(&id("crate")).unwrap();

    let (container, record) = session.unequip(EquipmentSlot::Melee).unwrap();
    assert_eq!(container, ContainerId::Overflow);
    assert!(session.overflow().unwrap().get(record).is_some());
    assert!(session.equipment(EquipmentSlot::Melee).unwrap().is_empty());
    assert!(matches!(
        session.unequip(EquipmentSlot::Melee),
        Err(RuntimeError::EmptySlot(EquipmentSlot::Melee))
    ));
}

#[test]
fn transfer_within_a_container_moves_the_record() {
    let mut session = session(EventBus::new());
    let (_, shells) = session.pickup(&id("shells")).unwrap();

    let moved = session
        .transfer(
            ContainerId::Bag,
            shells,
            ContainerId::Bag,
            Some(GridPosition::new(1, 1)),
        )
        .unwrap();
    assert_eq!(moved, shells);
    assert_eq!(
        session.bag().unwrap().get(shells).unwrap().position(),
        GridPosition::new(1, 1)
    );
}

#[test]
fn engine_notifications_reach_the_bus() {
    let bus = EventBus::new();
    let mut inventory = bus.subscribe(Topic::Inventory);
    let mut session = session(bus);

    let (_, record) = session.pickup(&id("shells")).unwrap();

    let first = inventory.try_recv().unwrap();
    match first {
        SessionEvent::Inventory(event) => {
            assert_eq!(event.container, ContainerId::Bag);
            assert!(matches!(
                event.change,
                ContainerChange::ItemAdded { record: r, .. } if r == record
            ));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        inventory.try_recv().unwrap(),
        SessionEvent::Inventory(event) if event.change == ContainerChange::DataChanged
    ));
}

#[test]
fn save_and_load_round_trip_through_both_formats() {
    let mut original = session(EventBus::new());
    original.pickup(&id("crate")).unwrap();
    let (_, axe) = original.pickup(&id("axe")).unwrap();
    original
        .update_item(ContainerId::Overflow, axe, |item, _| {
            if let Some(durability) = item.state_mut().durability_mut() {
                durability.take_damage(7);
            }
        })
        .unwrap();

    let snapshot = original.save().unwrap();
    assert_eq!(snapshot.item_count(), 2);

    for restored in [
        SessionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap(),
        SessionSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap(),
    ] {
        let mut copy = session(EventBus::new());
        copy.load(&restored).unwrap();
        for (container, inventory) in original.containers() {
            let other = copy.container(container).unwrap();
            assert_eq!(other.grid().digest(), inventory.grid().digest(), "{container}");
        }
    }
}

#[test]
fn corrupt_saves_leave_the_session_untouched() {
    let mut session = session(EventBus::new());
    session.pickup(&id("shells")).unwrap();
    let good = session.save().unwrap();

    let mut unknown_slot = good.clone();
    unknown_slot.containers[0].container = ContainerId::Equipment(EquipmentSlot::Oxygen);
    assert!(matches!(
        session.load(&unknown_slot),
        Err(RuntimeError::UnknownContainer(_))
    ));

    let mut bad_tag = good.clone();
    for container in &mut bad_tag.containers {
        for record in &mut container.inventory.records {
            record.instance.type_tag = "plasma".into();
        }
    }
    assert!(matches!(
        session.load(&bad_tag),
        Err(RuntimeError::Inventory(InventoryError::CorruptData(_)))
    ));

    assert_eq!(session.save().unwrap(), good);
}

#[test]
fn shipped_content_drives_a_session() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let content = ContentFactory::new(data).load_all().unwrap();
    let mut session = InventorySession::from_content(&content, EventBus::new());

    let (_, rifle) = session.pickup(&id("rifle")).unwrap();
    let (_, ammo) = session.pickup(&id("rifle_ammo")).unwrap();
    session
        .equip(ContainerId::Bag, rifle, EquipmentSlot::PrimaryWeapon)
        .unwrap();

    let ammo_state = session
        .bag()
        .unwrap()
        .get(ammo)
        .unwrap()
        .instance()
        .state()
        .clone();
    assert!(matches!(ammo_state, ItemState::Ammo(a) if a.current_ammo == 20));

    let dir = tempfile::tempdir().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    repo.save("slot1", &session.save().unwrap()).unwrap();
    let loaded = repo.load("slot1").unwrap().unwrap();

    let mut copy = InventorySession::from_content(&content, EventBus::new());
    copy.load(&loaded).unwrap();
    assert_eq!(copy.count_of(&id("rifle")), 1);
    assert!(
        copy.equipment(EquipmentSlot::PrimaryWeapon)
            .unwrap()
            .records()
            .next()
            .is_some()
    );
}
