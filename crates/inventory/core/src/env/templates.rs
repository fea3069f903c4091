//! Item templates: immutable, shared definitions of an item kind.

use std::fmt;

use bitflags::bitflags;

use super::ShapeId;

/// Unique name of a template.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TemplateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Read-only template lookup, injected into the engine.
///
/// Must be deterministic for a given identifier during a session. The engine
/// treats `None` as `TemplateNotFound` and never loads templates itself.
pub trait TemplateResolver: Send + Sync {
    fn resolve(&self, id: &TemplateId) -> Option<Template>;
}

impl<R: TemplateResolver + ?Sized> TemplateResolver for std::sync::Arc<R> {
    fn resolve(&self, id: &TemplateId) -> Option<Template> {
        (**self).resolve(id)
    }
}

impl<R: TemplateResolver + ?Sized> TemplateResolver for &R {
    fn resolve(&self, id: &TemplateId) -> Option<Template> {
        (**self).resolve(id)
    }
}

/// Kind of item; selects which per-instance state variant an item carries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TypeTag {
    Consumable,
    RangedWeapon,
    Ammo,
    Clothing,
    MeleeWeapon,
    Tool,
    Throwable,
    Bow,
    KeyItem,
    OxygenTank,
    ToolEnergySource,
    Unarmed,
}

bitflags! {
    /// Set of [`TypeTag`]s, used by inventories that only accept some kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TypeTagSet: u16 {
        const CONSUMABLE         = 1 << 0;
        const RANGED_WEAPON      = 1 << 1;
        const AMMO               = 1 << 2;
        const CLOTHING           = 1 << 3;
        const MELEE_WEAPON       = 1 << 4;
        const TOOL               = 1 << 5;
        const THROWABLE          = 1 << 6;
        const BOW                = 1 << 7;
        const KEY_ITEM           = 1 << 8;
        const OXYGEN_TANK        = 1 << 9;
        const TOOL_ENERGY_SOURCE = 1 << 10;
        const UNARMED            = 1 << 11;
    }
}

impl TypeTagSet {
    pub const fn from_tag(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Consumable => Self::CONSUMABLE,
            TypeTag::RangedWeapon => Self::RANGED_WEAPON,
            TypeTag::Ammo => Self::AMMO,
            TypeTag::Clothing => Self::CLOTHING,
            TypeTag::MeleeWeapon => Self::MELEE_WEAPON,
            TypeTag::Tool => Self::TOOL,
            TypeTag::Throwable => Self::THROWABLE,
            TypeTag::Bow => Self::BOW,
            TypeTag::KeyItem => Self::KEY_ITEM,
            TypeTag::OxygenTank => Self::OXYGEN_TANK,
            TypeTag::ToolEnergySource => Self::TOOL_ENERGY_SOURCE,
            TypeTag::Unarmed => Self::UNARMED,
        }
    }

    pub const fn contains_tag(&self, tag: TypeTag) -> bool {
        self.contains(Self::from_tag(tag))
    }
}

impl From<TypeTag> for TypeTagSet {
    fn from(tag: TypeTag) -> Self {
        Self::from_tag(tag)
    }
}

/// Template definition with common fields and type-specific rules.
///
/// # Design: Base + Kind Pattern
///
/// - Base struct holds common fields (id, shape, max_stack)
/// - `rules` enum holds the type-specific immutable data; its variant *is*
///   the type tag, so a template can never disagree with itself
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub id: TemplateId,
    pub shape: ShapeId,
    pub rules: TemplateRules,
    /// Visual stack limit of a placement (1 = never stacks).
    #[cfg_attr(feature = "serde", serde(default = "default_max_stack"))]
    pub max_stack: u16,
}

#[cfg(feature = "serde")]
fn default_max_stack() -> u16 {
    1
}

impl Template {
    pub fn new(id: impl Into<TemplateId>, shape: ShapeId, rules: TemplateRules) -> Self {
        Self {
            id: id.into(),
            shape,
            rules,
            max_stack: 1,
        }
    }

    pub fn with_max_stack(mut self, max_stack: u16) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    pub fn type_tag(&self) -> TypeTag {
        self.rules.type_tag()
    }
}

/// Type-specific immutable rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateRules {
    Consumable(ConsumableRules),
    RangedWeapon(RangedWeaponRules),
    Ammo(AmmoRules),
    Clothing(DurabilityRules),
    MeleeWeapon(WeaponRules),
    Tool(ToolRules),
    Throwable { damage: u32 },
    Bow(BowRules),
    KeyItem(KeyItemRules),
    OxygenTank(OxygenTankRules),
    ToolEnergySource(EnergySourceRules),
    Unarmed { damage: u32 },
}

impl TemplateRules {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Consumable(_) => TypeTag::Consumable,
            Self::RangedWeapon(_) => TypeTag::RangedWeapon,
            Self::Ammo(_) => TypeTag::Ammo,
            Self::Clothing(_) => TypeTag::Clothing,
            Self::MeleeWeapon(_) => TypeTag::MeleeWeapon,
            Self::Tool(_) => TypeTag::Tool,
            Self::Throwable { .. } => TypeTag::Throwable,
            Self::Bow(_) => TypeTag::Bow,
            Self::KeyItem(_) => TypeTag::KeyItem,
            Self::OxygenTank(_) => TypeTag::OxygenTank,
            Self::ToolEnergySource(_) => TypeTag::ToolEnergySource,
            Self::Unarmed { .. } => TypeTag::Unarmed,
        }
    }

    /// Durability bounds, for kinds that wear out.
    pub fn durability(&self) -> Option<&DurabilityRules> {
        match self {
            Self::RangedWeapon(rules) => Some(&rules.durability),
            Self::Clothing(rules) => Some(rules),
            Self::MeleeWeapon(rules) => Some(&rules.durability),
            Self::Tool(rules) => Some(&rules.durability),
            Self::Bow(rules) => Some(&rules.durability),
            _ => None,
        }
    }
}

/// Condition bounds shared by everything that wears out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurabilityRules {
    pub max_condition: u32,
    /// Floor a repair restores to when the caller does not supply one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub minimum_repair_condition: u32,
}

impl DurabilityRules {
    pub const fn new(max_condition: u32) -> Self {
        Self {
            max_condition,
            minimum_repair_condition: 0,
        }
    }

    pub const fn with_minimum_repair(mut self, minimum: u32) -> Self {
        self.minimum_repair_condition = minimum;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableRules {
    pub max_uses: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedWeaponRules {
    pub durability: DurabilityRules,
    pub magazine_size: u32,
    /// Template of the ammunition this weapon loads.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo: Option<TemplateId>,
    /// Condition lost per shot fired.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wear_per_shot: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoRules {
    pub max_ammo_per_stack: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponRules {
    pub durability: DurabilityRules,
    /// Condition lost per hit.
    pub damage_rate: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolRules {
    pub durability: DurabilityRules,
    /// Whether the tool draws from an attached energy source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_energy: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowRules {
    pub durability: DurabilityRules,
    pub draw_damage: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyItemRules {
    pub unlocks: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OxygenTankRules {
    pub max_oxygen: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergySourceRules {
    pub max_energy_capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_tag_has_a_distinct_flag() {
        let mut seen = TypeTagSet::empty();
        for tag in TypeTag::iter() {
            let flag = TypeTagSet::from_tag(tag);
            assert!(!seen.intersects(flag), "{tag} shares a bit");
            seen |= flag;
        }
        assert_eq!(seen, TypeTagSet::all());
    }

    #[test]
    fn tag_names_round_trip_through_strings() {
        for tag in TypeTag::iter() {
            let parsed: TypeTag = tag.as_ref().parse().unwrap();
            assert_eq!(parsed, tag);
        }
        assert_eq!(TypeTag::ToolEnergySource.to_string(), "tool_energy_source");
        assert!("laser_sword".parse::<TypeTag>().is_err());
    }

    #[test]
    fn rules_determine_type_tag() {
        let template = Template::new(
            "rifle",
            ShapeId::BAR_4,
            TemplateRules::RangedWeapon(RangedWeaponRules {
                durability: DurabilityRules::new(100),
                magazine_size: 10,
                ammo: Some(TemplateId::new("rifle_ammo")),
                wear_per_shot: 1,
            }),
        );
        assert_eq!(template.type_tag(), TypeTag::RangedWeapon);
        assert_eq!(template.rules.durability().map(|d| d.max_condition), Some(100));
        assert_eq!(template.max_stack, 1);
    }
}
