//! Per-instance mutable state.
//!
//! [`ItemState`] is a sum type: an instance carries exactly the payload its
//! template's type tag calls for and nothing else. Every bounded quantity
//! clamps instead of wrapping or failing; mutators report whether they did
//! anything so callers can decide on feedback.

use crate::env::{
    AmmoRules, DurabilityRules, EnergySourceRules, OxygenTankRules, RangedWeaponRules,
    TemplateRules, TypeTag,
};

use super::InstanceId;

/// `current / max`, or 0 when `max` is zero.
#[inline]
pub(crate) fn ratio(current: u32, max: u32) -> f32 {
    if max == 0 {
        0.0
    } else {
        current as f32 / max as f32
    }
}

/// Mutable payload selected by the template's [`TypeTag`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemState {
    Consumable(ConsumableState),
    RangedWeapon(RangedWeaponState),
    Ammo(AmmoState),
    Clothing(Durability),
    MeleeWeapon(Durability),
    Tool(ToolState),
    Throwable,
    Bow(BowState),
    KeyItem,
    OxygenTank(OxygenTankState),
    ToolEnergySource(EnergySourceState),
    Unarmed,
}

impl ItemState {
    /// Fresh state seeded from template defaults.
    pub fn initial(rules: &TemplateRules) -> Self {
        match rules {
            TemplateRules::Consumable(rules) => Self::Consumable(ConsumableState {
                uses_left: rules.max_uses,
            }),
            TemplateRules::RangedWeapon(rules) => Self::RangedWeapon(RangedWeaponState {
                durability: Durability::full(&rules.durability),
                loaded: 0,
            }),
            TemplateRules::Ammo(rules) => Self::Ammo(AmmoState {
                current_ammo: rules.max_ammo_per_stack,
            }),
            TemplateRules::Clothing(rules) => Self::Clothing(Durability::full(rules)),
            TemplateRules::MeleeWeapon(rules) => {
                Self::MeleeWeapon(Durability::full(&rules.durability))
            }
            TemplateRules::Tool(rules) => Self::Tool(ToolState {
                durability: Durability::full(&rules.durability),
                energy_source: None,
            }),
            TemplateRules::Throwable { .. } => Self::Throwable,
            TemplateRules::Bow(rules) => Self::Bow(BowState {
                durability: Durability::full(&rules.durability),
                arrow_nocked: false,
            }),
            TemplateRules::KeyItem(_) => Self::KeyItem,
            TemplateRules::OxygenTank(rules) => Self::OxygenTank(OxygenTankState {
                oxygen: rules.max_oxygen,
            }),
            TemplateRules::ToolEnergySource(rules) => {
                Self::ToolEnergySource(EnergySourceState {
                    energy: rules.max_energy_capacity,
                })
            }
            TemplateRules::Unarmed { .. } => Self::Unarmed,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Consumable(_) => TypeTag::Consumable,
            Self::RangedWeapon(_) => TypeTag::RangedWeapon,
            Self::Ammo(_) => TypeTag::Ammo,
            Self::Clothing(_) => TypeTag::Clothing,
            Self::MeleeWeapon(_) => TypeTag::MeleeWeapon,
            Self::Tool(_) => TypeTag::Tool,
            Self::Throwable => TypeTag::Throwable,
            Self::Bow(_) => TypeTag::Bow,
            Self::KeyItem => TypeTag::KeyItem,
            Self::OxygenTank(_) => TypeTag::OxygenTank,
            Self::ToolEnergySource(_) => TypeTag::ToolEnergySource,
            Self::Unarmed => TypeTag::Unarmed,
        }
    }

    /// Pulls every quantity back inside the template's bounds.
    ///
    /// Returns false, without touching anything, when `rules` belong to a
    /// different type tag.
    pub fn clamp_to(&mut self, rules: &TemplateRules) -> bool {
        if self.type_tag() != rules.type_tag() {
            return false;
        }
        match (self, rules) {
            (Self::Consumable(state), TemplateRules::Consumable(rules)) => {
                state.uses_left = state.uses_left.min(rules.max_uses);
            }
            (Self::RangedWeapon(state), TemplateRules::RangedWeapon(rules)) => {
                state.durability.clamp_to(&rules.durability);
                state.loaded = state.loaded.min(rules.magazine_size);
            }
            (Self::Ammo(state), TemplateRules::Ammo(rules)) => {
                state.current_ammo = state.current_ammo.min(rules.max_ammo_per_stack);
            }
            (Self::Clothing(state), TemplateRules::Clothing(rules)) => state.clamp_to(rules),
            (Self::MeleeWeapon(state), TemplateRules::MeleeWeapon(rules)) => {
                state.clamp_to(&rules.durability)
            }
            (Self::Tool(state), TemplateRules::Tool(rules)) => {
                state.durability.clamp_to(&rules.durability)
            }
            (Self::Bow(state), TemplateRules::Bow(rules)) => {
                state.durability.clamp_to(&rules.durability)
            }
            (Self::OxygenTank(state), TemplateRules::OxygenTank(rules)) => {
                state.oxygen = state.oxygen.min(rules.max_oxygen);
            }
            (Self::ToolEnergySource(state), TemplateRules::ToolEnergySource(rules)) => {
                state.energy = state.energy.min(rules.max_energy_capacity);
            }
            _ => {}
        }
        true
    }

    /// Condition of kinds that wear out.
    pub fn durability(&self) -> Option<&Durability> {
        match self {
            Self::RangedWeapon(state) => Some(&state.durability),
            Self::Clothing(state) | Self::MeleeWeapon(state) => Some(state),
            Self::Tool(state) => Some(&state.durability),
            Self::Bow(state) => Some(&state.durability),
            _ => None,
        }
    }

    pub fn durability_mut(&mut self) -> Option<&mut Durability> {
        match self {
            Self::RangedWeapon(state) => Some(&mut state.durability),
            Self::Clothing(state) | Self::MeleeWeapon(state) => Some(state),
            Self::Tool(state) => Some(&mut state.durability),
            Self::Bow(state) => Some(&mut state.durability),
            _ => None,
        }
    }

    pub fn ammo(&self) -> Option<&AmmoState> {
        match self {
            Self::Ammo(state) => Some(state),
            _ => None,
        }
    }

    pub fn ammo_mut(&mut self) -> Option<&mut AmmoState> {
        match self {
            Self::Ammo(state) => Some(state),
            _ => None,
        }
    }
}

/// Remaining uses of a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableState {
    pub uses_left: u16,
}

impl ConsumableState {
    /// Spends one use. Returns false when already used up.
    pub fn use_once(&mut self) -> bool {
        if self.uses_left == 0 {
            return false;
        }
        self.uses_left -= 1;
        true
    }

    pub fn is_spent(&self) -> bool {
        self.uses_left == 0
    }
}

/// Rounds held by an ammunition stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoState {
    pub current_ammo: u32,
}

impl AmmoState {
    /// Removes `amount` rounds. Returns false, changing nothing, if the stack
    /// holds fewer.
    pub fn consume(&mut self, amount: u32) -> bool {
        if self.current_ammo < amount {
            return false;
        }
        self.current_ammo -= amount;
        true
    }

    /// Adds up to `amount` rounds; returns how many fit.
    pub fn refill(&mut self, amount: u32, rules: &AmmoRules) -> u32 {
        let room = rules.max_ammo_per_stack.saturating_sub(self.current_ammo);
        let accepted = amount.min(room);
        self.current_ammo += accepted;
        accepted
    }

    pub fn percent(&self, rules: &AmmoRules) -> f32 {
        ratio(self.current_ammo, rules.max_ammo_per_stack)
    }
}

/// Condition of anything that wears out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Durability {
    pub condition: u32,
}

impl Durability {
    pub fn full(rules: &DurabilityRules) -> Self {
        Self {
            condition: rules.max_condition,
        }
    }

    /// Loses `amount` condition, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.condition = self.condition.saturating_sub(amount);
    }

    /// Restores `amount` condition.
    ///
    /// The result is clamped to `[minimum, max_condition]`, where `minimum`
    /// falls back to the template's `minimum_repair_condition`. Returns
    /// whether the condition actually changed.
    pub fn repair(&mut self, amount: u32, rules: &DurabilityRules, minimum: Option<u32>) -> bool {
        let floor = minimum
            .unwrap_or(rules.minimum_repair_condition)
            .min(rules.max_condition);
        let repaired = self
            .condition
            .saturating_add(amount)
            .clamp(floor, rules.max_condition);
        let changed = repaired != self.condition;
        self.condition = repaired;
        changed
    }

    pub fn is_broken(&self) -> bool {
        self.condition == 0
    }

    pub fn percent(&self, rules: &DurabilityRules) -> f32 {
        ratio(self.condition, rules.max_condition)
    }

    fn clamp_to(&mut self, rules: &DurabilityRules) {
        self.condition = self.condition.min(rules.max_condition);
    }
}

/// Firearm condition and loaded rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedWeaponState {
    pub durability: Durability,
    pub loaded: u32,
}

impl RangedWeaponState {
    /// Loads up to `amount` rounds; returns how many fit in the magazine.
    pub fn load(&mut self, amount: u32, rules: &RangedWeaponRules) -> u32 {
        let room = rules.magazine_size.saturating_sub(self.loaded);
        let accepted = amount.min(room);
        self.loaded += accepted;
        accepted
    }

    /// Fires one round, wearing the weapon. Returns false when empty or broken.
    pub fn fire(&mut self, rules: &RangedWeaponRules) -> bool {
        if self.loaded == 0 || self.durability.is_broken() {
            return false;
        }
        self.loaded -= 1;
        self.durability.take_damage(rules.wear_per_shot);
        true
    }

    /// Empties the magazine, returning the rounds removed.
    pub fn unload(&mut self) -> u32 {
        std::mem::take(&mut self.loaded)
    }
}

/// Energy source currently attached to a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyLink {
    pub source: InstanceId,
    pub energy: u32,
}

/// Tool condition and its attached energy source, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolState {
    pub durability: Durability,
    pub energy_source: Option<EnergyLink>,
}

impl ToolState {
    /// Attaches a source, returning the one it replaced.
    pub fn attach_energy_source(&mut self, link: EnergyLink) -> Option<EnergyLink> {
        self.energy_source.replace(link)
    }

    pub fn detach_energy_source(&mut self) -> Option<EnergyLink> {
        self.energy_source.take()
    }

    /// Draws `amount` from the attached source. Returns false, changing
    /// nothing, without a source or with too little energy left.
    pub fn draw_energy(&mut self, amount: u32) -> bool {
        match &mut self.energy_source {
            Some(link) if link.energy >= amount => {
                link.energy -= amount;
                true
            }
            _ => false,
        }
    }
}

/// Bow condition and whether an arrow is nocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowState {
    pub durability: Durability,
    pub arrow_nocked: bool,
}

impl BowState {
    /// Returns false if an arrow is already nocked.
    pub fn nock(&mut self) -> bool {
        !std::mem::replace(&mut self.arrow_nocked, true)
    }

    /// Releases the nocked arrow. Returns false if none was nocked.
    pub fn loose(&mut self) -> bool {
        std::mem::replace(&mut self.arrow_nocked, false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OxygenTankState {
    pub oxygen: u32,
}

impl OxygenTankState {
    /// Breathes up to `amount`; returns what was actually available.
    pub fn consume(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.oxygen);
        self.oxygen -= taken;
        taken
    }

    pub fn refill(&mut self, amount: u32, rules: &OxygenTankRules) -> u32 {
        let room = rules.max_oxygen.saturating_sub(self.oxygen);
        let accepted = amount.min(room);
        self.oxygen += accepted;
        accepted
    }

    pub fn percent(&self, rules: &OxygenTankRules) -> f32 {
        ratio(self.oxygen, rules.max_oxygen)
    }
}

/// Charge left in a battery-like item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergySourceState {
    pub energy: u32,
}

impl EnergySourceState {
    /// Drains up to `amount`; returns what was actually drained.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.energy);
        self.energy -= taken;
        taken
    }

    pub fn recharge(&mut self, amount: u32, rules: &EnergySourceRules) -> u32 {
        let room = rules.max_energy_capacity.saturating_sub(self.energy);
        let accepted = amount.min(room);
        self.energy += accepted;
        accepted
    }

    pub fn percent(&self, rules: &EnergySourceRules) -> f32 {
        ratio(self.energy, rules.max_energy_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BowRules, ConsumableRules, WeaponRules};

    #[test]
    fn initial_state_follows_template_defaults() {
        let ammo = ItemState::initial(&TemplateRules::Ammo(AmmoRules {
            max_ammo_per_stack: 30,
        }));
        assert_eq!(ammo, ItemState::Ammo(AmmoState { current_ammo: 30 }));

        let bow = ItemState::initial(&TemplateRules::Bow(BowRules {
            durability: DurabilityRules::new(50),
            draw_damage: 12,
        }));
        assert!(matches!(
            bow,
            ItemState::Bow(BowState {
                arrow_nocked: false,
                durability: Durability { condition: 50 }
            })
        ));

        let battery = ItemState::initial(&TemplateRules::ToolEnergySource(EnergySourceRules {
            max_energy_capacity: 80,
        }));
        assert_eq!(
            battery,
            ItemState::ToolEnergySource(EnergySourceState { energy: 80 })
        );
    }

    #[test]
    fn state_tag_matches_rules_tag() {
        let rules = TemplateRules::MeleeWeapon(WeaponRules {
            durability: DurabilityRules::new(10),
            damage_rate: 1,
        });
        assert_eq!(ItemState::initial(&rules).type_tag(), rules.type_tag());
        assert_eq!(
            ItemState::initial(&TemplateRules::Unarmed { damage: 2 }).type_tag(),
            TypeTag::Unarmed
        );
    }

    #[test]
    fn consume_ammo_refuses_when_insufficient() {
        let mut ammo = AmmoState { current_ammo: 3 };
        assert!(!ammo.consume(4));
        assert_eq!(ammo.current_ammo, 3);
        assert!(ammo.consume(3));
        assert_eq!(ammo.current_ammo, 0);
    }

    #[test]
    fn refill_clamps_to_stack_size() {
        let rules = AmmoRules {
            max_ammo_per_stack: 10,
        };
        let mut ammo = AmmoState { current_ammo: 8 };
        assert_eq!(ammo.refill(5, &rules), 2);
        assert_eq!(ammo.current_ammo, 10);
        assert_eq!(ammo.percent(&rules), 1.0);
    }

    #[test]
    fn damage_never_goes_negative() {
        let mut durability = Durability { condition: 5 };
        durability.take_damage(50);
        assert_eq!(durability.condition, 0);
        assert!(durability.is_broken());
    }

    #[test]
    fn repair_clamps_between_minimum_and_max() {
        let rules = DurabilityRules::new(100).with_minimum_repair(40);
        let mut durability = Durability { condition: 10 };

        // Template floor applies when no minimum is given.
        assert!(durability.repair(5, &rules, None));
        assert_eq!(durability.condition, 40);

        assert!(durability.repair(500, &rules, None));
        assert_eq!(durability.condition, 100);

        // Already full: nothing changes.
        assert!(!durability.repair(10, &rules, None));

        let mut worn = Durability { condition: 0 };
        assert!(worn.repair(0, &rules, Some(70)));
        assert_eq!(worn.condition, 70);
    }

    #[test]
    fn percent_is_zero_for_zero_max() {
        let durability = Durability { condition: 7 };
        assert_eq!(durability.percent(&DurabilityRules::new(0)), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn bow_nock_and_loose() {
        let mut bow = BowState {
            durability: Durability { condition: 1 },
            arrow_nocked: false,
        };
        assert!(!bow.loose());
        assert!(bow.nock());
        assert!(!bow.nock());
        assert!(bow.loose());
        assert!(!bow.arrow_nocked);
    }

    #[test]
    fn ranged_weapon_loads_and_fires() {
        let rules = RangedWeaponRules {
            durability: DurabilityRules::new(3),
            magazine_size: 2,
            ammo: None,
            wear_per_shot: 1,
        };
        let mut gun = RangedWeaponState {
            durability: Durability::full(&rules.durability),
            loaded: 0,
        };
        assert!(!gun.fire(&rules));
        assert_eq!(gun.load(5, &rules), 2);
        assert!(gun.fire(&rules));
        assert_eq!(gun.durability.condition, 2);
        assert_eq!(gun.unload(), 1);
        assert_eq!(gun.loaded, 0);
    }

    #[test]
    fn tool_draws_from_attached_source() {
        let mut tool = ToolState {
            durability: Durability { condition: 10 },
            energy_source: None,
        };
        assert!(!tool.draw_energy(1));

        let source = InstanceId::new();
        assert!(
            tool.attach_energy_source(EnergyLink { source, energy: 5 })
                .is_none()
        );
        assert!(tool.draw_energy(4));
        assert!(!tool.draw_energy(4));
        assert_eq!(tool.detach_energy_source().map(|l| l.energy), Some(1));
    }

    #[test]
    fn oxygen_and_energy_clamp_at_bounds() {
        let mut tank = OxygenTankState { oxygen: 3 };
        assert_eq!(tank.consume(10), 3);
        assert_eq!(tank.refill(100, &OxygenTankRules { max_oxygen: 60 }), 60);

        let mut battery = EnergySourceState { energy: 2 };
        assert_eq!(battery.drain(5), 2);
        assert_eq!(
            battery.recharge(
                9,
                &EnergySourceRules {
                    max_energy_capacity: 4
                }
            ),
            4
        );
    }

    #[test]
    fn clamp_to_refuses_foreign_rules() {
        let mut state = ItemState::Consumable(ConsumableState { uses_left: 9 });
        assert!(!state.clamp_to(&TemplateRules::Unarmed { damage: 1 }));
        assert!(state.clamp_to(&TemplateRules::Consumable(ConsumableRules { max_uses: 3 })));
        assert_eq!(state, ItemState::Consumable(ConsumableState { uses_left: 3 }));
    }
}
