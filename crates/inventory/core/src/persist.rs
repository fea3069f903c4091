//! Persistence boundary for item instances and whole inventories.
//!
//! An [`InstanceRecord`] stores an instance's state as an opaque bincode
//! payload next to a textual type tag, so the outer save format stays stable
//! when one kind's state grows a field. Restoring re-checks the tag against
//! the template and pulls every quantity back inside the template's bounds.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::env::{ShapeId, TemplateId, TemplateResolver, TypeTag};
use crate::inventory::InventoryError;
use crate::state::{
    AmmoState, BowState, ConsumableState, Durability, EnergySourceState, GridPosition, GridSize,
    InstanceId, ItemInstance, ItemState, OxygenTankState, PlacementRecord, RangedWeaponState,
    RecordId, ToolState,
};

/// Serialized form of one [`ItemInstance`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub instance_id: InstanceId,
    pub template_id: TemplateId,
    /// `snake_case` name of the [`TypeTag`].
    pub type_tag: String,
    /// bincode encoding of the variant's state; empty for stateless kinds.
    #[serde(with = "payload_bytes")]
    pub payload: Vec<u8>,
}

impl InstanceRecord {
    /// Captures `instance` without altering it.
    ///
    /// # Errors
    ///
    /// `CorruptData` if the state cannot be encoded.
    pub fn capture(instance: &ItemInstance) -> Result<Self, InventoryError> {
        let payload = match instance.state() {
            ItemState::Consumable(state) => encode(state)?,
            ItemState::RangedWeapon(state) => encode(state)?,
            ItemState::Ammo(state) => encode(state)?,
            ItemState::Clothing(state) | ItemState::MeleeWeapon(state) => encode(state)?,
            ItemState::Tool(state) => encode(state)?,
            ItemState::Bow(state) => encode(state)?,
            ItemState::OxygenTank(state) => encode(state)?,
            ItemState::ToolEnergySource(state) => encode(state)?,
            ItemState::Throwable | ItemState::KeyItem | ItemState::Unarmed => Vec::new(),
        };
        Ok(Self {
            instance_id: instance.id(),
            template_id: instance.template_id().clone(),
            type_tag: instance.type_tag().to_string(),
            payload,
        })
    }

    /// Rebuilds the instance, keeping its original id.
    ///
    /// # Errors
    ///
    /// `CorruptData` when the tag is unknown, the template is missing or of
    /// a different kind, or the payload does not decode.
    pub fn restore(&self, resolver: &dyn TemplateResolver) -> Result<ItemInstance, InventoryError> {
        let tag: TypeTag = self
            .type_tag
            .parse()
            .map_err(|_| InventoryError::corrupt(format!("unknown type tag '{}'", self.type_tag)))?;
        let template = resolver.resolve(&self.template_id).ok_or_else(|| {
            InventoryError::corrupt(format!("template '{}' is not defined", self.template_id))
        })?;
        if template.type_tag() != tag {
            return Err(InventoryError::corrupt(format!(
                "template '{}' is {}, record says {tag}",
                self.template_id,
                template.type_tag()
            )));
        }

        let mut state = self.decode_state(tag)?;
        state.clamp_to(&template.rules);
        Ok(ItemInstance::from_parts(
            self.instance_id,
            self.template_id.clone(),
            state,
        ))
    }

    fn decode_state(&self, tag: TypeTag) -> Result<ItemState, InventoryError> {
        let bytes = self.payload.as_slice();
        let state = match tag {
            TypeTag::Consumable => ItemState::Consumable(decode::<ConsumableState>(bytes)?),
            TypeTag::RangedWeapon => ItemState::RangedWeapon(decode::<RangedWeaponState>(bytes)?),
            TypeTag::Ammo => ItemState::Ammo(decode::<AmmoState>(bytes)?),
            TypeTag::Clothing => ItemState::Clothing(decode::<Durability>(bytes)?),
            TypeTag::MeleeWeapon => ItemState::MeleeWeapon(decode::<Durability>(bytes)?),
            TypeTag::Tool => ItemState::Tool(decode::<ToolState>(bytes)?),
            TypeTag::Bow => ItemState::Bow(decode::<BowState>(bytes)?),
            TypeTag::OxygenTank => ItemState::OxygenTank(decode::<OxygenTankState>(bytes)?),
            TypeTag::ToolEnergySource => {
                ItemState::ToolEnergySource(decode::<EnergySourceState>(bytes)?)
            }
            TypeTag::Throwable | TypeTag::KeyItem | TypeTag::Unarmed => {
                if !bytes.is_empty() {
                    return Err(InventoryError::corrupt(format!(
                        "{tag} carries no state but payload has {} bytes",
                        bytes.len()
                    )));
                }
                match tag {
                    TypeTag::Throwable => ItemState::Throwable,
                    TypeTag::KeyItem => ItemState::KeyItem,
                    _ => ItemState::Unarmed,
                }
            }
        };
        Ok(state)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, InventoryError> {
    bincode::serialize(value).map_err(|e| InventoryError::corrupt(format!("encode: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, InventoryError> {
    bincode::deserialize(bytes).map_err(|e| InventoryError::corrupt(format!("payload: {e}")))
}

/// Byte buffers go out as a plain sequence so text formats stay readable.
mod payload_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(deserializer)
    }
}

/// One placed item inside an [`InventorySnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSnapshot {
    pub id: RecordId,
    pub instance: InstanceRecord,
    pub shape: ShapeId,
    pub position: GridPosition,
    pub rotation: u8,
    pub stack_count: u16,
}

impl PlacementSnapshot {
    /// # Errors
    ///
    /// `CorruptData` if the instance state cannot be encoded.
    pub fn capture(record: &PlacementRecord) -> Result<Self, InventoryError> {
        Ok(Self {
            id: record.id(),
            instance: InstanceRecord::capture(record.instance())?,
            shape: record.shape(),
            position: record.position(),
            rotation: record.rotation(),
            stack_count: record.stack_count(),
        })
    }
}

/// Complete, self-describing state of one inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub size: GridSize,
    pub next_record_id: RecordId,
    pub records: Vec<PlacementSnapshot>,
}
