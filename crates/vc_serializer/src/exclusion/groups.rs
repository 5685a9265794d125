use alloc::collections::BTreeSet;
use alloc::string::String;

use super::ExclusionStrategy;
use crate::Context;
use crate::info::{ObjectInfo, PropertyMetadata};

/// Skips properties that share no group with the configured set.
///
/// An empty set filters nothing. Properties without declared groups belong
/// to [`DEFAULT_GROUP`](crate::info::DEFAULT_GROUP).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupExclusion {
    groups: BTreeSet<String>,
}

impl GroupExclusion {
    #[inline]
    pub fn new(groups: BTreeSet<String>) -> Self {
        Self { groups }
    }

    #[inline]
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    #[inline]
    pub(crate) fn groups_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.groups
    }
}

impl ExclusionStrategy for GroupExclusion {
    #[inline]
    fn should_skip(&self, _: &ObjectInfo, property: &PropertyMetadata, _: &dyn Context) -> bool {
        !property.in_groups(&self.groups)
    }
}

impl<S: Into<String>> FromIterator<S> for GroupExclusion {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
