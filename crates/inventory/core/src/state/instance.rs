//! Concrete items.

use std::fmt;

use uuid::Uuid;

use crate::env::{Template, TemplateId, TypeTag};

use super::ItemState;

/// Globally unique identifier of an item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Allocates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One physical item: identity, template back-reference and mutable state.
///
/// The template is referenced by id and resolved lazily; an instance never
/// owns template data. `Clone` produces a view of the *same* item (same id),
/// which is what snapshots and events need. Use [`ItemInstance::duplicate`]
/// to create a new item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    id: InstanceId,
    template: TemplateId,
    state: ItemState,
}

impl ItemInstance {
    /// Creates a new item with state seeded from the template's defaults.
    pub fn create(template: &Template) -> Self {
        Self {
            id: InstanceId::new(),
            template: template.id.clone(),
            state: ItemState::initial(&template.rules),
        }
    }

    /// Deep copy under a fresh identifier.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: InstanceId::new(),
            template: self.template.clone(),
            state: self.state.clone(),
        }
    }

    /// Reassembles an instance from persisted parts.
    ///
    /// Callers are responsible for checking that `state` matches the
    /// template's type tag.
    pub(crate) fn from_parts(id: InstanceId, template: TemplateId, state: ItemState) -> Self {
        Self {
            id,
            template,
            state,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template
    }

    pub fn type_tag(&self) -> TypeTag {
        self.state.type_tag()
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    /// Mutable access to the payload. The variant itself must not change.
    pub fn state_mut(&mut self) -> StateMut<'_> {
        let tag = self.state.type_tag();
        StateMut {
            state: &mut self.state,
            tag,
        }
    }
}

/// Mutable handle to an instance's state.
///
/// Edits the populated variant in place. Swapping in a different variant
/// breaks the template/state pairing and trips a debug assertion on drop.
#[derive(Debug)]
pub struct StateMut<'a> {
    state: &'a mut ItemState,
    tag: TypeTag,
}

impl core::ops::Deref for StateMut<'_> {
    type Target = ItemState;

    fn deref(&self) -> &ItemState {
        self.state
    }
}

impl core::ops::DerefMut for StateMut<'_> {
    fn deref_mut(&mut self) -> &mut ItemState {
        self.state
    }
}

impl Drop for StateMut<'_> {
    fn drop(&mut self) {
        debug_assert_eq!(
            self.state.type_tag(),
            self.tag,
            "item state variant replaced"
        );
    }
}
