use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::ExclusionStrategy;
use crate::Context;
use crate::info::{ObjectInfo, PropertyMetadata};

/// Skips a property if any member strategy does.
///
/// Members are asked in insertion order and evaluation stops at the first
/// skip. An empty disjunct skips nothing.
#[derive(Default)]
pub struct Disjunct {
    members: Vec<Box<dyn ExclusionStrategy>>,
}

impl Disjunct {
    #[inline]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    #[inline]
    pub fn with(mut self, strategy: impl ExclusionStrategy + 'static) -> Self {
        self.push(strategy);
        self
    }

    #[inline]
    pub fn push(&mut self, strategy: impl ExclusionStrategy + 'static) {
        self.members.push(Box::new(strategy));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn ExclusionStrategy> {
        self.members
            .iter()
            .map(|member| &**member as &dyn ExclusionStrategy)
    }
}

impl fmt::Debug for Disjunct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disjunct")
            .field("members", &self.members.len())
            .finish()
    }
}

impl ExclusionStrategy for Disjunct {
    fn should_skip(
        &self,
        owner: &ObjectInfo,
        property: &PropertyMetadata,
        context: &dyn Context,
    ) -> bool {
        self.members
            .iter()
            .any(|member| member.should_skip(owner, property, context))
    }
}

// -----------------------------------------------------------------------------
// Tests
