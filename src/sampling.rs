//! Aggregation of configuration samples.
//!
//! A sample is a map from configurable elements to their selection state, as
//! produced by a configuration sampler. These helpers reduce samples to the names
//! of the selected elements.

use std::collections::{BTreeSet, HashMap};

/// Anything that can appear in a configuration sample.
pub trait Configurable {
    fn name(&self) -> &str;
}

impl Configurable for String {
    fn name(&self) -> &str {
        self
    }
}

impl Configurable for &str {
    fn name(&self) -> &str {
        self
    }
}

pub type Sample<C> = HashMap<C, bool>;

/// Names of the elements selected in `sample`.
pub fn selected_names<C: Configurable>(sample: &Sample<C>) -> BTreeSet<String> {
    sample
        .iter()
        .filter(|&(_, &selected)| selected)
        .map(|(element, _)| element.name().to_string())
        .collect()
}

/// The distinct selections over all samples.
pub fn configuration_name_set<'a, C, I>(samples: I) -> BTreeSet<BTreeSet<String>>
where
    C: Configurable + 'a,
    I: IntoIterator<Item = &'a Sample<C>>,
{
    samples.into_iter().map(selected_names).collect()
}

/// Names selected in every sample. Empty when there are no samples.
pub fn common_configuration_names<'a, C, I>(samples: I) -> BTreeSet<String>
where
    C: Configurable + 'a,
    I: IntoIterator<Item = &'a Sample<C>>,
{
    let mut configurations = configuration_name_set(samples).into_iter();
    let Some(first) = configurations.next() else {
        return BTreeSet::new();
    };
    configurations.fold(first, |common, names| common.intersection(&names).cloned().collect())
}
