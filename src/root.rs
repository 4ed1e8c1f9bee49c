//! Root unification for imported feature trees.
//!
//! Some source formats allow several top-level features. Target formats and the
//! constraint layer expect a single tree, so [`derive_root`] hangs all top-level
//! features below one synthesized, abstract and hidden root when needed.

use log::{debug, info};

use crate::error::Error;
use crate::model::{
    insert_group, Feature, FeatureMap, GroupKind, ABSTRACT_ATTRIBUTE, ARTIFICIAL_MODEL_ATTRIBUTE,
    ARTIFICIAL_MODEL_NAME, HIDDEN_ATTRIBUTE,
};

/// Returned by [`derive_root`] when no feature lacks a parent. The feature map is
/// handed back untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("feature model has no root feature")]
pub struct NoRoot {
    features: FeatureMap,
}

impl NoRoot {
    pub fn into_features(self) -> FeatureMap {
        self.features
    }
}

impl From<NoRoot> for Error {
    fn from(_: NoRoot) -> Self {
        Error::ModelHasNoRoot
    }
}

/// Names of all features without a parent group, in map order.
pub fn find_roots(features: &FeatureMap) -> Vec<&str> {
    features
        .values()
        .filter(|feature| feature.is_root())
        .map(|feature| feature.name.as_str())
        .collect()
}

/// Ensures the model has exactly one root and returns it along with the model.
///
/// - No roots: fails with [`NoRoot`], giving the map back unchanged.
/// - One root: returns its name; the map is not modified.
/// - Several roots: inserts a feature named `root_name`, marked abstract, hidden
///   and artificial, with a single mandatory group holding all former roots, and
///   returns `root_name`.
///
/// `root_name` must not already name a feature in the map; this is not checked.
pub fn derive_root(mut features: FeatureMap, root_name: &str) -> Result<(FeatureMap, String), NoRoot> {
    let roots: Vec<String> = find_roots(&features).into_iter().map(String::from).collect();
    debug!("derive_root: found {} root(s)", roots.len());

    match roots.as_slice() {
        [] => Err(NoRoot { features }),
        [root] => {
            let root = root.clone();
            Ok((features, root))
        }
        _ => {
            info!("Uniting {} roots under artificial root '{}'", roots.len(), root_name);
            let root = Feature::new(root_name)
                .with_attribute(ABSTRACT_ATTRIBUTE, true)
                .with_attribute(HIDDEN_ATTRIBUTE, true)
                .with_attribute(ARTIFICIAL_MODEL_ATTRIBUTE, ARTIFICIAL_MODEL_NAME);
            features.insert(root_name.to_string(), root);
            insert_group(&mut features, root_name, GroupKind::Mandatory, roots.as_slice());
            Ok((features, root_name.to_string()))
        }
    }
}
