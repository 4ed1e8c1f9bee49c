//! Feature trees.
//!
//! A model is a [`FeatureMap`] from feature name to [`Feature`]. Each feature owns
//! an ordered list of child [`Group`]s, and each group lists its member features
//! by name. The reverse link, from a feature to the group it sits in, is kept in
//! [`Feature::parent`] as a [`ParentGroup`] (owning feature name plus group index).
//! A feature without a parent link is a root.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

/// Marks a feature that is not selectable on its own.
pub const ABSTRACT_ATTRIBUTE: &str = "abstract";
/// Marks a feature that should not be shown to end users.
pub const HIDDEN_ATTRIBUTE: &str = "hidden";
/// Provenance marker for features synthesized during import.
pub const ARTIFICIAL_MODEL_ATTRIBUTE: &str = "ARTIFICIAL_MODEL_NAME";
/// Value of [`ARTIFICIAL_MODEL_ATTRIBUTE`] on synthesized features.
pub const ARTIFICIAL_MODEL_NAME: &str = "__artificial_model__";

pub type FeatureMap = BTreeMap<String, Feature>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            AttributeValue::String(value) => value.parse().ok(),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(value) => write!(f, "{}", value),
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Float(value) => write!(f, "{}", value),
            AttributeValue::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GroupKind {
    Mandatory,
    Optional,
    /// Exactly one member is selected.
    Alternative,
    /// At least one member is selected.
    Or,
    /// Between `min` and `max` members are selected; `max == None` is unbounded.
    Cardinality { min: usize, max: Option<usize> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub kind: GroupKind,
    pub features: Vec<String>,
}

impl Group {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            features: Vec::new(),
        }
    }
}

/// Back-reference from a feature to the group containing it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ParentGroup {
    /// Name of the feature owning the group.
    pub feature: String,
    /// Index of the group in the owner's [`Feature::groups`].
    pub group: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub groups: Vec<Group>,
    pub parent: Option<ParentGroup>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            parent: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The group this feature sits in, resolved through `features`.
    pub fn parent_group<'a>(&self, features: &'a FeatureMap) -> Option<&'a Group> {
        let link = self.parent.as_ref()?;
        features.get(&link.feature)?.groups.get(link.group)
    }
}

/// Appends a new group of `kind` under `parent` containing `children`, and points
/// each child's parent link at it. Children missing from the map are created.
///
/// A child that already had a parent is moved: it is removed from its previous
/// group first, so the group partition stays consistent.
///
/// Returns the index of the new group, or `None` if `parent` is unknown.
pub fn insert_group<S: AsRef<str>>(
    features: &mut FeatureMap,
    parent: &str,
    kind: GroupKind,
    children: &[S],
) -> Option<usize> {
    let index = features.get(parent)?.groups.len();
    let mut group = Group::new(kind);

    for child in children {
        let child = child.as_ref();
        let previous = features
            .entry(child.to_string())
            .or_insert_with(|| Feature::new(child))
            .parent
            .replace(ParentGroup {
                feature: parent.to_string(),
                group: index,
            });
        if let Some(previous) = previous {
            if let Some(old) = features
                .get_mut(&previous.feature)
                .and_then(|owner| owner.groups.get_mut(previous.group))
            {
                old.features.retain(|name| name != child);
            }
        }
        group.features.push(child.to_string());
    }

    features.get_mut(parent)?.groups.push(group);
    Some(index)
}

/// All features directly below `name`, across all of its groups.
pub fn children<'a>(features: &'a FeatureMap, name: &str) -> Vec<&'a Feature> {
    features
        .get(name)
        .map(|feature| {
            feature
                .groups
                .iter()
                .flat_map(|group| group.features.iter())
                .filter_map(|child| features.get(child))
                .collect()
        })
        .unwrap_or_default()
}

/// The feature owning the group that `name` sits in.
pub fn parent_of<'a>(features: &'a FeatureMap, name: &str) -> Option<&'a Feature> {
    let link = features.get(name)?.parent.as_ref()?;
    features.get(&link.feature)
}

/// Whether `ancestor` lies on the path from `child` up to its root.
///
/// Unknown names yield `false`. A feature is not its own ancestor.
pub fn is_parent_feature_of(features: &FeatureMap, child: &str, ancestor: &str) -> bool {
    if !features.contains_key(child) || !features.contains_key(ancestor) {
        return false;
    }
    // Guard against malformed parent links forming a cycle.
    let mut seen = BTreeSet::new();
    let mut current = parent_of(features, child);
    while let Some(feature) = current {
        if feature.name == ancestor {
            return true;
        }
        if !seen.insert(feature.name.as_str()) {
            return false;
        }
        current = parent_of(features, &feature.name);
    }
    false
}

/// Whether the feature carries a true [`ABSTRACT_ATTRIBUTE`].
pub fn is_abstract(feature: &Feature) -> bool {
    attribute_value(feature, ABSTRACT_ATTRIBUTE)
        .and_then(AttributeValue::as_bool)
        .unwrap_or(false)
}

pub fn attribute_value<'a>(feature: &'a Feature, name: &str) -> Option<&'a AttributeValue> {
    feature.attributes.get(name)
}

/// Whether the group containing `name` is of the given kind; roots have no group.
pub fn check_group_type(features: &FeatureMap, name: &str, kind: GroupKind) -> bool {
    features
        .get(name)
        .and_then(|feature| feature.parent_group(features))
        .map_or(false, |group| group.kind == kind)
}

/// Whether the feature has an alternative or or-group, i.e. its children
/// enumerate choices.
pub fn is_enumeration_type(feature: &Feature) -> bool {
    feature
        .groups
        .iter()
        .any(|group| matches!(group.kind, GroupKind::Alternative | GroupKind::Or))
}
