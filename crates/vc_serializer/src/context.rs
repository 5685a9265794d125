use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use vc_value::Value;

use crate::Version;
use crate::exclusion::{ExclusionStrategy, GroupExclusion, VersionExclusion};
use crate::info::{ObjectInfo, PropertyMetadata};

// -----------------------------------------------------------------------------
// Context

/// Which way a walk is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serialization,
    Deserialization,
}

/// The read-only view of a context that exclusion strategies receive.
pub trait Context {
    fn direction(&self) -> Direction;

    /// Active groups. Empty means no group filtering.
    fn groups(&self) -> &BTreeSet<String>;

    fn version(&self) -> Option<&Version>;
}

// -----------------------------------------------------------------------------
// Filters

/// Group, version and custom filters, shared by both contexts.
#[derive(Default)]
struct Filters {
    groups: GroupExclusion,
    version: Option<VersionExclusion>,
    custom: Vec<Box<dyn ExclusionStrategy>>,
}

impl Filters {
    fn strategies(&self) -> impl Iterator<Item = &dyn ExclusionStrategy> {
        let version = self
            .version
            .as_ref()
            .map(|v| v as &dyn ExclusionStrategy);
        let groups = (!self.groups.groups().is_empty())
            .then_some(&self.groups as &dyn ExclusionStrategy);
        version
            .into_iter()
            .chain(groups)
            .chain(self.custom.iter().map(|s| &**s as &dyn ExclusionStrategy))
    }

    fn should_skip(&self, owner: &ObjectInfo, property: &PropertyMetadata, context: &dyn Context) -> bool {
        self.strategies()
            .any(|strategy| strategy.should_skip(owner, property, context))
    }
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filters")
            .field("groups", self.groups.groups())
            .field("version", &self.version.as_ref().map(VersionExclusion::version))
            .field("custom", &self.custom.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Shared builder methods

macro_rules! impl_filter_methods {
    ($ty:ty) => {
        impl $ty {
            /// Replaces the active groups.
            pub fn with_groups<I>(mut self, groups: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<String>,
            {
                self.set_groups(groups);
                self
            }

            /// Adds one active group.
            #[inline]
            pub fn with_group(mut self, group: impl Into<String>) -> Self {
                self.filters.groups.groups_mut().insert(group.into());
                self
            }

            #[inline]
            pub fn with_version(mut self, version: Version) -> Self {
                self.set_version(Some(version));
                self
            }

            /// Registers a custom strategy, evaluated after the version and
            /// group filters.
            #[inline]
            pub fn with_strategy(mut self, strategy: impl ExclusionStrategy + 'static) -> Self {
                self.add_strategy(strategy);
                self
            }

            pub fn set_groups<I>(&mut self, groups: I)
            where
                I: IntoIterator,
                I::Item: Into<String>,
            {
                *self.filters.groups.groups_mut() = groups.into_iter().map(Into::into).collect();
            }

            #[inline]
            pub fn set_version(&mut self, version: Option<Version>) {
                self.filters.version = version.map(VersionExclusion::new);
            }

            #[inline]
            pub fn add_strategy(&mut self, strategy: impl ExclusionStrategy + 'static) {
                self.filters.custom.push(Box::new(strategy));
            }

            #[inline]
            pub fn groups(&self) -> &BTreeSet<String> {
                self.filters.groups.groups()
            }

            #[inline]
            pub fn version(&self) -> Option<&Version> {
                self.filters.version.as_ref().map(VersionExclusion::version)
            }

            /// The effective strategy list: version filter if a version is
            /// set, group filter if groups are set, then custom strategies.
            #[inline]
            pub fn strategies(&self) -> impl Iterator<Item = &dyn ExclusionStrategy> {
                self.filters.strategies()
            }

            /// Returns `true` if any effective strategy skips `property`.
            #[inline]
            pub fn should_skip(&self, owner: &ObjectInfo, property: &PropertyMetadata) -> bool {
                self.filters.should_skip(owner, property, self)
            }
        }

        impl Context for $ty {
            #[inline]
            fn direction(&self) -> Direction {
                Self::DIRECTION
            }

            #[inline]
            fn groups(&self) -> &BTreeSet<String> {
                self.filters.groups.groups()
            }

            #[inline]
            fn version(&self) -> Option<&Version> {
                self.filters.version.as_ref().map(VersionExclusion::version)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// SerializationContext

/// Configuration for one serialization call.
///
/// # Examples
///
/// ```
/// use vc_serializer::{SerializationContext, Version};
///
/// let ctx = SerializationContext::new()
///     .with_groups(["details"])
///     .with_version(Version::new(2, 1, 0))
///     .with_emit_null(false);
///
/// assert!(ctx.groups().contains("details"));
/// assert_eq!(ctx.strategies().count(), 2);
/// ```
#[derive(Debug)]
pub struct SerializationContext {
    filters: Filters,
    emit_null: bool,
}

impl SerializationContext {
    const DIRECTION: Direction = Direction::Serialization;

    /// No filtering, nulls are emitted.
    #[inline]
    pub fn new() -> Self {
        Self {
            filters: Filters::default(),
            emit_null: true,
        }
    }

    /// Whether properties whose visited value is null are written.
    #[inline]
    pub fn with_emit_null(mut self, emit_null: bool) -> Self {
        self.emit_null = emit_null;
        self
    }

    #[inline]
    pub fn set_emit_null(&mut self, emit_null: bool) {
        self.emit_null = emit_null;
    }

    #[inline]
    pub fn emit_null(&self) -> bool {
        self.emit_null
    }
}

impl Default for SerializationContext {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl_filter_methods!(SerializationContext);

// -----------------------------------------------------------------------------
// DeserializationContext

/// Configuration for one deserialization call.
///
/// Hints are opaque to the engine and read by visitors, e.g.
/// [`YAML_COERCE_SCALARS`](crate::visitor::YAML_COERCE_SCALARS).
#[derive(Debug, Default)]
pub struct DeserializationContext {
    filters: Filters,
    hints: BTreeMap<String, Value>,
}

impl DeserializationContext {
    const DIRECTION: Direction = Direction::Deserialization;

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_hint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_hint(key, value);
        self
    }

    #[inline]
    pub fn set_hint(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.hints.insert(key.into(), value.into());
    }

    #[inline]
    pub fn hint(&self, key: &str) -> Option<&Value> {
        self.hints.get(key)
    }

    #[inline]
    pub fn hints(&self) -> &BTreeMap<String, Value> {
        &self.hints
    }
}

impl_filter_methods!(DeserializationContext);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Context, DeserializationContext, Direction, SerializationContext};
    use crate::Version;
    use crate::exclusion::from_fn;
    use crate::info::{ObjectInfo, PropertyMetadata};

    fn info() -> ObjectInfo {
        ObjectInfo::builder("t::Person")
            .property(PropertyMetadata::new("id"))
            .property(PropertyMetadata::new("name").group("details"))
            .property(PropertyMetadata::new("email").since(Version::new(2, 0, 0)))
            .property(PropertyMetadata::new("_internal"))
            .build()
            .unwrap()
    }

    fn visible(info: &ObjectInfo, ctx: &SerializationContext) -> alloc::vec::Vec<&'static str> {
        ["id", "name", "email", "_internal"]
            .into_iter()
            .filter(|name| !ctx.should_skip(info, info.property(name).unwrap()))
            .collect()
    }

    #[test]
    fn empty_context_filters_nothing() {
        let info = info();
        let ctx = SerializationContext::new();
        assert_eq!(ctx.strategies().count(), 0);
        assert_eq!(visible(&info, &ctx), ["id", "name", "email", "_internal"]);
        assert!(ctx.emit_null());
        assert_eq!(ctx.direction(), Direction::Serialization);
    }

    #[test]
    fn groups_and_version_compose() {
        let info = info();

        let ctx = SerializationContext::new().with_group("default");
        assert_eq!(visible(&info, &ctx), ["id", "email", "_internal"]);

        let ctx = SerializationContext::new().with_groups(["details"]);
        assert_eq!(visible(&info, &ctx), ["name"]);

        let ctx = SerializationContext::new()
            .with_groups(["default", "details"])
            .with_version(Version::new(1, 5, 0))
            .with_strategy(from_fn(|_, p, _| p.name().starts_with('_')));
        assert_eq!(visible(&info, &ctx), ["id", "name"]);

        let ctx = SerializationContext::new().with_version(Version::new(2, 1, 0));
        assert_eq!(visible(&info, &ctx), ["id", "name", "email", "_internal"]);
    }

    #[test]
    fn strategies_see_the_context() {
        let info = info();
        let ctx = DeserializationContext::new()
            .with_hint("k", true)
            .with_strategy(from_fn(|_, p, ctx| {
                ctx.direction() == Direction::Deserialization && p.name() == "id"
            }));
        assert!(ctx.should_skip(&info, info.property("id").unwrap()));
        assert!(!ctx.should_skip(&info, info.property("name").unwrap()));
        assert_eq!(ctx.hint("k").and_then(|v| v.as_bool().ok()), Some(true));
        assert_eq!(ctx.hint("missing"), None);
    }
}
