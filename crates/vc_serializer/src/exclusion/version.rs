use super::ExclusionStrategy;
use crate::info::{ObjectInfo, PropertyMetadata};
use crate::{Context, Version};

/// Skips properties whose `[since, until]` window excludes the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionExclusion {
    version: Version,
}

impl VersionExclusion {
    #[inline]
    pub const fn new(version: Version) -> Self {
        Self { version }
    }

    #[inline]
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl ExclusionStrategy for VersionExclusion {
    #[inline]
    fn should_skip(&self, _: &ObjectInfo, property: &PropertyMetadata, _: &dyn Context) -> bool {
        !property.in_window(&self.version)
    }
}
