//! Layer Classifier
//!
//! Partitions an engine layer list into the four display groups. The
//! partition is a total function of `(type, side)`: every layer lands in
//! exactly one group and relative input order is kept inside each group.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layer::{Layer, LayerType, Side};

/// Display group a layer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Board-wide layers plus anything no other rule claims
    Common,
    Top,
    Bottom,
    /// Copper layers without a side
    Inner,
}

impl GroupKind {
    /// Groups in control panel order
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Top,
        GroupKind::Bottom,
        GroupKind::Inner,
        GroupKind::Common,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GroupKind::Common => "Common",
            GroupKind::Top => "Top Side",
            GroupKind::Bottom => "Bottom Side",
            GroupKind::Inner => "Inner Layers",
        }
    }

    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Top => GroupKind::Top,
            Side::Bottom => GroupKind::Bottom,
        }
    }

    /// Classify a single layer
    pub fn of(layer: &Layer) -> Self {
        if layer.layer_type.as_ref().is_some_and(LayerType::is_board_wide) {
            return GroupKind::Common;
        }
        match layer.side {
            Some(Side::Top) => GroupKind::Top,
            Some(Side::Bottom) => GroupKind::Bottom,
            None if layer.is_type(&LayerType::Copper) => GroupKind::Inner,
            None => GroupKind::Common,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::Common => "common",
            GroupKind::Top => "top",
            GroupKind::Bottom => "bottom",
            GroupKind::Inner => "inner",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for GroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Ok(GroupKind::Common),
            "top" => Ok(GroupKind::Top),
            "bottom" => Ok(GroupKind::Bottom),
            "inner" => Ok(GroupKind::Inner),
            other => Err(format!(
                "unknown group '{}' (expected top, bottom, inner or common)",
                other
            )),
        }
    }
}

/// Layers partitioned by display group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerGroups {
    pub common: Vec<Layer>,
    pub top: Vec<Layer>,
    pub bottom: Vec<Layer>,
    pub inner: Vec<Layer>,
}

impl LayerGroups {
    pub fn get(&self, kind: GroupKind) -> &[Layer] {
        match kind {
            GroupKind::Common => &self.common,
            GroupKind::Top => &self.top,
            GroupKind::Bottom => &self.bottom,
            GroupKind::Inner => &self.inner,
        }
    }

    /// Layers visible by default when `side` is active
    pub fn default_visible(&self, side: Side) -> impl Iterator<Item = &Layer> {
        self.common
            .iter()
            .chain(self.get(GroupKind::for_side(side)).iter())
    }

    /// Total number of classified layers
    pub fn len(&self) -> usize {
        self.common.len() + self.top.len() + self.bottom.len() + self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `layers` into display groups.
///
/// Never fails; an empty list yields four empty groups.
pub fn classify(layers: &[Layer]) -> LayerGroups {
    let mut groups = LayerGroups::default();
    for layer in layers {
        let bucket = match GroupKind::of(layer) {
            GroupKind::Common => &mut groups.common,
            GroupKind::Top => &mut groups.top,
            GroupKind::Bottom => &mut groups.bottom,
            GroupKind::Inner => &mut groups.inner,
        };
        bucket.push(layer.clone());
    }
    tracing::debug!(
        common = groups.common.len(),
        top = groups.top.len(),
        bottom = groups.bottom.len(),
        inner = groups.inner.len(),
        "classified layers"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ids(layers: &[Layer]) -> Vec<&str> {
        layers.iter().map(|l| l.id.as_str()).collect()
    }

    #[test_case("outline", None, GroupKind::Common ; "outline is board wide")]
    #[test_case("drill", None, GroupKind::Common ; "drill is board wide")]
    #[test_case("drill", Some(Side::Top), GroupKind::Common ; "sided drill stays common")]
    #[test_case("copper", Some(Side::Top), GroupKind::Top ; "top copper")]
    #[test_case("silkscreen", Some(Side::Bottom), GroupKind::Bottom ; "bottom silkscreen")]
    #[test_case("copper", None, GroupKind::Inner ; "sideless copper is inner")]
    #[test_case("soldermask", None, GroupKind::Common ; "sideless mask falls back to common")]
    #[test_case("drawing", None, GroupKind::Common ; "unknown type falls back to common")]
    #[test_case("drawing", Some(Side::Bottom), GroupKind::Bottom ; "unknown type keeps its side")]
    fn test_group_of(layer_type: &str, side: Option<Side>, expected: GroupKind) {
        let layer = Layer::new("x", layer_type, side);
        assert_eq!(GroupKind::of(&layer), expected);
    }

    #[test]
    fn test_untyped_layer_is_common() {
        let mut layer = Layer::new("x", "copper", None);
        layer.layer_type = None;
        assert_eq!(GroupKind::of(&layer), GroupKind::Common);
    }

    #[test]
    fn test_classify_reference_board() {
        let layers = vec![
            Layer::new("a", "outline", None),
            Layer::new("b", "copper", Some(Side::Top)),
            Layer::new("c", "copper", Some(Side::Bottom)),
            Layer::new("d", "copper", None),
        ];
        let groups = classify(&layers);
        assert_eq!(ids(&groups.common), vec!["a"]);
        assert_eq!(ids(&groups.top), vec!["b"]);
        assert_eq!(ids(&groups.bottom), vec!["c"]);
        assert_eq!(ids(&groups.inner), vec!["d"]);
    }

    #[test]
    fn test_classify_preserves_order_within_group() {
        let layers = vec![
            Layer::new("t-mask", "soldermask", Some(Side::Top)),
            Layer::new("drill", "drill", None),
            Layer::new("t-cu", "copper", Some(Side::Top)),
            Layer::new("outline", "outline", None),
            Layer::new("t-silk", "silkscreen", Some(Side::Top)),
        ];
        let groups = classify(&layers);
        assert_eq!(ids(&groups.top), vec!["t-mask", "t-cu", "t-silk"]);
        assert_eq!(ids(&groups.common), vec!["drill", "outline"]);
    }

    #[test]
    fn test_classify_is_a_partition() {
        let layers = vec![
            Layer::new("1", "copper", Some(Side::Top)),
            Layer::new("2", "copper", None),
            Layer::new("3", "copper", None),
            Layer::new("4", "solderpaste", Some(Side::Bottom)),
            Layer::new("5", "outline", Some(Side::Bottom)),
            Layer::new("6", "mystery", None),
        ];
        let groups = classify(&layers);
        assert_eq!(groups.len(), layers.len());

        let mut seen: Vec<&str> = GroupKind::ALL
            .iter()
            .flat_map(|kind| ids(groups.get(*kind)))
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_classify_empty() {
        let groups = classify(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups, LayerGroups::default());
    }

    #[test]
    fn test_default_visible() {
        let layers = vec![
            Layer::new("a", "outline", None),
            Layer::new("b", "copper", Some(Side::Top)),
            Layer::new("c", "copper", Some(Side::Bottom)),
        ];
        let groups = classify(&layers);
        let top: Vec<_> = groups.default_visible(Side::Top).map(|l| l.id.as_str()).collect();
        let bottom: Vec<_> = groups
            .default_visible(Side::Bottom)
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(top, vec!["a", "b"]);
        assert_eq!(bottom, vec!["a", "c"]);
    }

    #[test]
    fn test_group_kind_parse() {
        assert_eq!("Inner".parse::<GroupKind>(), Ok(GroupKind::Inner));
        assert!("middle".parse::<GroupKind>().is_err());
        assert_eq!(GroupKind::for_side(Side::Bottom), GroupKind::Bottom);
    }
}
