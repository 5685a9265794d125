//! Per-property visibility rules.
//!
//! An [`ExclusionStrategy`] decides, for one property of one type under
//! one context, whether the property is skipped. Strategies compose by
//! logical OR: the property is skipped if any strategy says so.
//!
//! Contexts derive their effective list from their own configuration:
//!
//! - a [`VersionExclusion`] when a version is set,
//! - a [`GroupExclusion`] when groups are set,
//! - every strategy registered with `with_strategy`.
//!
//! Skipping is never an error, the property is just left out.
//!
//! ```
//! use vc_serializer::SerializationContext;
//! use vc_serializer::exclusion::from_fn;
//!
//! let ctx = SerializationContext::new()
//!     .with_strategy(from_fn(|_, property, _| property.name().starts_with('_')));
//! # let _ = ctx;
//! ```

// -----------------------------------------------------------------------------
// Modules

mod disjunct;
mod groups;
mod version;

// -----------------------------------------------------------------------------
// Exports

pub use disjunct::Disjunct;
pub use groups::GroupExclusion;
pub use version::VersionExclusion;

use crate::Context;
use crate::info::{ObjectInfo, PropertyMetadata};

// -----------------------------------------------------------------------------
// ExclusionStrategy

/// Decides whether a property is skipped for the current operation.
pub trait ExclusionStrategy {
    fn should_skip(
        &self,
        owner: &ObjectInfo,
        property: &PropertyMetadata,
        context: &dyn Context,
    ) -> bool;
}

impl<F> ExclusionStrategy for F
where
    F: Fn(&ObjectInfo, &PropertyMetadata, &dyn Context) -> bool,
{
    #[inline]
    fn should_skip(
        &self,
        owner: &ObjectInfo,
        property: &PropertyMetadata,
        context: &dyn Context,
    ) -> bool {
        self(owner, property, context)
    }
}

/// Turns a closure into a strategy.
///
/// Only needed to drive closure signature inference, any matching `Fn` is
/// already a strategy.
#[inline]
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&ObjectInfo, &PropertyMetadata, &dyn Context) -> bool,
{
    f
}
