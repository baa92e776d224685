//! Visibility Store
//!
//! Single owner of per-layer visibility and the active board side. Every
//! transition is a named operation; nothing else writes the map.
//!
//! Side selector state machine:
//! - Initial state `Top`
//! - `switch_side` from either state re-enters with a full reset: common
//!   layers plus the new side's group are shown, everything else hidden
//! - No terminal state

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layers::{GroupKind, Layer, LayerGroups, Side};

/// Value of a group checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    All,
    None,
    /// Drives an indeterminate checkbox
    Mixed,
}

impl CheckState {
    /// Marker used by the text control panel
    pub fn marker(&self) -> &'static str {
        match self {
            CheckState::All => "[x]",
            CheckState::None => "[ ]",
            CheckState::Mixed => "[-]",
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckState::All => "all",
            CheckState::None => "none",
            CheckState::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Per-layer visibility plus the active side
///
/// The key set of `visible_by_id` is always exactly the ids of the layer
/// list the store was seeded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityStore {
    /// Layer ids in engine order
    order: Vec<String>,
    visible_by_id: HashMap<String, bool>,
    active_side: Side,
    groups: LayerGroups,
}

impl VisibilityStore {
    /// Seed visibility for a fresh layer list with the top side active.
    pub fn seed(layers: &[Layer], groups: &LayerGroups) -> Self {
        Self::seed_for_side(layers, groups, Side::default())
    }

    /// Seed visibility with `side` active: common layers and that side's
    /// group are shown, everything else is hidden.
    pub fn seed_for_side(layers: &[Layer], groups: &LayerGroups, side: Side) -> Self {
        let mut store = Self {
            order: layers.iter().map(|l| l.id.clone()).collect(),
            visible_by_id: HashMap::with_capacity(layers.len()),
            active_side: side,
            groups: groups.clone(),
        };
        store.reset_to_side_defaults();
        store
    }

    /// Make `side` active and reset visibility to that side's defaults.
    ///
    /// Manual per-layer changes made before the switch are discarded.
    pub fn switch_side(&mut self, side: Side) {
        tracing::debug!(from = %self.active_side, to = %side, "switching board side");
        self.active_side = side;
        self.reset_to_side_defaults();
    }

    fn reset_to_side_defaults(&mut self) {
        for id in &self.order {
            self.visible_by_id.insert(id.clone(), false);
        }
        for layer in self.groups.default_visible(self.active_side) {
            if let Some(visible) = self.visible_by_id.get_mut(&layer.id) {
                *visible = true;
            }
        }
    }

    /// Flip one layer. Unknown ids are ignored.
    ///
    /// # Returns
    /// The layer's new visibility, or `None` if the id is unknown
    pub fn toggle_layer(&mut self, id: &str) -> Option<bool> {
        match self.visible_by_id.get_mut(id) {
            Some(visible) => {
                *visible = !*visible;
                tracing::debug!(layer = id, visible = *visible, "toggled layer");
                Some(*visible)
            }
            None => {
                tracing::debug!(layer = id, "ignoring toggle for unknown layer");
                None
            }
        }
    }

    /// Toggle a whole group: hide all if every known member is visible,
    /// otherwise show all. Unknown ids take no part in the decision. Decided once from the state before the toggle, so a mixed
    /// group always becomes fully visible.
    ///
    /// # Returns
    /// The visibility applied to the group's known members
    pub fn toggle_group(&mut self, group: &[Layer]) -> bool {
        let next = !self.all_visible(group);
        for layer in group {
            if let Some(visible) = self.visible_by_id.get_mut(&layer.id) {
                *visible = next;
            }
        }
        tracing::debug!(members = group.len(), visible = next, "toggled group");
        next
    }

    /// Toggle one of the store's own display groups
    pub fn toggle_group_kind(&mut self, kind: GroupKind) -> bool {
        let group = self.groups.get(kind).to_vec();
        self.toggle_group(&group)
    }

    /// Tri-state checkbox value for `group`. Members with unknown ids are
    /// ignored; a group with no known members reports `None`.
    pub fn group_checkbox_state(&self, group: &[Layer]) -> CheckState {
        let known: Vec<bool> = self.known_members(group).collect();
        if known.is_empty() {
            return CheckState::None;
        }
        let visible = known.iter().filter(|v| **v).count();
        if visible == known.len() {
            CheckState::All
        } else if visible == 0 {
            CheckState::None
        } else {
            CheckState::Mixed
        }
    }

    /// Checkbox value for one of the store's own display groups
    pub fn group_state(&self, kind: GroupKind) -> CheckState {
        self.group_checkbox_state(self.groups.get(kind))
    }

    /// `true` only for known layers that are currently shown
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible_by_id.get(id).copied().unwrap_or(false)
    }

    /// Visibility of the members of `group` this store knows about
    fn known_members<'a>(&'a self, group: &'a [Layer]) -> impl Iterator<Item = bool> + 'a {
        group
            .iter()
            .filter_map(|l| self.visible_by_id.get(&l.id).copied())
    }

    fn all_visible(&self, group: &[Layer]) -> bool {
        self.known_members(group).all(|visible| visible)
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn groups(&self) -> &LayerGroups {
        &self.groups
    }

    pub fn visible_by_id(&self) -> &HashMap<String, bool> {
        &self.visible_by_id
    }

    /// Ids of visible layers in engine order
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(|id| self.is_visible(id))
            .map(String::as_str)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_by_id.values().filter(|v| **v).count()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::classify;
    use pretty_assertions::assert_eq;

    fn reference_layers() -> Vec<Layer> {
        vec![
            Layer::new("a", "outline", None),
            Layer::new("b", "copper", Some(Side::Top)),
            Layer::new("c", "copper", Some(Side::Bottom)),
            Layer::new("d", "copper", None),
        ]
    }

    fn reference_store() -> VisibilityStore {
        let layers = reference_layers();
        let groups = classify(&layers);
        VisibilityStore::seed(&layers, &groups)
    }

    fn snapshot(store: &VisibilityStore) -> Vec<(&str, bool)> {
        let mut entries: Vec<_> = store
            .visible_by_id()
            .iter()
            .map(|(id, v)| (id.as_str(), *v))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_seed_defaults() {
        let store = reference_store();
        assert_eq!(store.active_side(), Side::Top);
        assert_eq!(
            snapshot(&store),
            vec![("a", true), ("b", true), ("c", false), ("d", false)]
        );
    }

    #[test]
    fn test_switch_side_resets() {
        let mut store = reference_store();
        store.switch_side(Side::Bottom);
        assert_eq!(store.active_side(), Side::Bottom);
        assert_eq!(
            snapshot(&store),
            vec![("a", true), ("b", false), ("c", true), ("d", false)]
        );
    }

    #[test]
    fn test_switch_side_discards_manual_toggles() {
        let mut store = reference_store();
        store.toggle_layer("d");
        store.toggle_layer("a");
        store.switch_side(Side::Bottom);
        store.switch_side(Side::Top);
        assert_eq!(
            snapshot(&store),
            vec![("a", true), ("b", true), ("c", false), ("d", false)]
        );
    }

    #[test]
    fn test_toggle_layer_flips_only_one() {
        let mut store = reference_store();
        assert_eq!(store.toggle_layer("c"), Some(true));
        assert_eq!(
            snapshot(&store),
            vec![("a", true), ("b", true), ("c", true), ("d", false)]
        );
        assert_eq!(store.toggle_layer("c"), Some(false));
        assert!(!store.is_visible("c"));
    }

    #[test]
    fn test_toggle_unknown_layer_is_noop() {
        let mut store = reference_store();
        let before = store.clone();
        assert_eq!(store.toggle_layer("zz"), None);
        assert_eq!(store, before);
        assert!(!store.visible_by_id().contains_key("zz"));
    }

    #[test]
    fn test_toggle_group_then_layer() {
        let mut store = reference_store();
        let top = store.groups().top.clone();

        assert!(!store.toggle_group(&top));
        assert!(!store.is_visible("b"));
        assert_eq!(store.group_checkbox_state(&top), CheckState::None);

        store.toggle_layer("b");
        assert!(store.is_visible("b"));
        assert_eq!(store.group_checkbox_state(&top), CheckState::All);
    }

    #[test]
    fn test_toggle_group_mixed_shows_all() {
        let layers = vec![
            Layer::new("t1", "copper", Some(Side::Top)),
            Layer::new("t2", "silkscreen", Some(Side::Top)),
            Layer::new("t3", "soldermask", Some(Side::Top)),
        ];
        let groups = classify(&layers);
        let mut store = VisibilityStore::seed(&layers, &groups);
        store.toggle_layer("t2");
        assert_eq!(store.group_state(GroupKind::Top), CheckState::Mixed);

        assert!(store.toggle_group_kind(GroupKind::Top));
        assert_eq!(store.group_state(GroupKind::Top), CheckState::All);

        assert!(!store.toggle_group_kind(GroupKind::Top));
        assert_eq!(store.group_state(GroupKind::Top), CheckState::None);
    }

    #[test]
    fn test_toggle_group_from_none_cycles() {
        let mut store = reference_store();
        assert_eq!(store.group_state(GroupKind::Bottom), CheckState::None);
        store.toggle_group_kind(GroupKind::Bottom);
        assert_eq!(store.group_state(GroupKind::Bottom), CheckState::All);
        store.toggle_group_kind(GroupKind::Bottom);
        assert_eq!(store.group_state(GroupKind::Bottom), CheckState::None);
    }

    #[test]
    fn test_toggle_group_ignores_foreign_layers() {
        let mut store = reference_store();
        let foreign = vec![Layer::new("zz", "copper", Some(Side::Top))];
        store.toggle_group(&foreign);
        assert_eq!(store.len(), 4);
        assert!(!store.visible_by_id().contains_key("zz"));
    }

    #[test]
    fn test_toggle_group_with_unknown_member_can_hide() {
        let layers = vec![Layer::new("b", "copper", Some(Side::Top))];
        let groups = classify(&layers);
        let mut store = VisibilityStore::seed(&layers, &groups);
        let group = vec![
            Layer::new("b", "copper", Some(Side::Top)),
            Layer::new("zz", "copper", Some(Side::Top)),
        ];
        assert_eq!(store.group_checkbox_state(&group), CheckState::All);

        assert!(!store.toggle_group(&group));
        assert!(!store.is_visible("b"));
        assert_eq!(store.group_checkbox_state(&group), CheckState::None);

        assert!(store.toggle_group(&group));
        assert_eq!(store.group_checkbox_state(&group), CheckState::All);
    }

    #[test]
    fn test_group_of_only_unknown_ids_reports_none() {
        let store = reference_store();
        let foreign = vec![Layer::new("zz", "copper", Some(Side::Top))];
        assert_eq!(store.group_checkbox_state(&foreign), CheckState::None);
    }

    #[test]
    fn test_empty_group_state_is_none() {
        let store = reference_store();
        assert_eq!(store.group_checkbox_state(&[]), CheckState::None);
    }

    #[test]
    fn test_switch_side_checkbox_states() {
        let mut store = reference_store();
        for side in [Side::Bottom, Side::Top, Side::Bottom] {
            store.switch_side(side);
            assert_eq!(store.group_state(GroupKind::for_side(side)), CheckState::All);
            assert_eq!(
                store.group_state(GroupKind::for_side(side.opposite())),
                CheckState::None
            );
            assert_eq!(store.group_state(GroupKind::Common), CheckState::All);
        }
    }

    #[test]
    fn test_empty_layer_list() {
        let groups = classify(&[]);
        let mut store = VisibilityStore::seed(&[], &groups);
        assert!(store.is_empty());
        store.switch_side(Side::Bottom);
        assert_eq!(store.visible_count(), 0);
        assert!(!store.toggle_group_kind(GroupKind::Top));
    }

    #[test]
    fn test_visible_ids_follow_engine_order() {
        let store = reference_store();
        let ids: Vec<_> = store.visible_ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
