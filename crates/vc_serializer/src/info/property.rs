use alloc::borrow::Cow;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use vc_value::ValuePath;

use crate::Version;

/// The group of properties that declare none.
pub const DEFAULT_GROUP: &str = "default";

static DEFAULT_GROUPS: &[Cow<'static, str>] = &[Cow::Borrowed(DEFAULT_GROUP)];

// -----------------------------------------------------------------------------
// PropertyMetadata

/// Describes one logical property of a type.
///
/// Built once per type, usually by the derive macro, and never mutated once
/// its [`ObjectInfo`](crate::info::ObjectInfo) is built.
///
/// Two metadata records are equal if they share the same internal `name`.
///
/// # Examples
///
/// ```
/// use vc_serializer::{PropertyMetadata, Version};
///
/// let meta = PropertyMetadata::new("a_prop")
///     .alias("old_name")
///     .group("details")
///     .since(Version::new(2, 0, 0));
///
/// assert_eq!(meta.external_name(), "a_prop");
/// assert!(!meta.in_window(&Version::new(1, 5, 0)));
/// assert!(meta.in_window(&Version::new(2, 1, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct PropertyMetadata {
    name: Cow<'static, str>,
    external_name: Cow<'static, str>,
    renamed: bool,
    aliases: Vec<Cow<'static, str>>,
    groups: Vec<Cow<'static, str>>,
    since: Option<Version>,
    until: Option<Version>,
    skip_when_empty: bool,
    path: Option<ValuePath>,
    serialize: bool,
    deserialize: bool,
    slot: usize,
}

impl PropertyMetadata {
    /// Creates a property whose wire name equals `name`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self {
            external_name: name.clone(),
            name,
            renamed: false,
            aliases: Vec::new(),
            groups: Vec::new(),
            since: None,
            until: None,
            skip_when_empty: false,
            path: None,
            serialize: true,
            deserialize: true,
            slot: 0,
        }
    }

    /// Sets the wire name. The owning type's naming strategy no longer applies.
    #[inline]
    pub fn rename(mut self, external_name: impl Into<Cow<'static, str>>) -> Self {
        self.external_name = external_name.into();
        self.renamed = true;
        self
    }

    /// Adds an alternate wire name, tried during deserialization.
    #[inline]
    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I>(mut self, aliases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Adds the property to a group. Once any group is added the property
    /// leaves the implicit [`DEFAULT_GROUP`].
    #[inline]
    pub fn group(mut self, group: impl Into<Cow<'static, str>>) -> Self {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
        self
    }

    pub fn groups<I>(self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        groups.into_iter().fold(self, Self::group)
    }

    /// Inclusive lower bound of the version window.
    #[inline]
    pub fn since(mut self, version: Version) -> Self {
        self.since = Some(version);
        self
    }

    /// Inclusive upper bound of the version window.
    #[inline]
    pub fn until(mut self, version: Version) -> Self {
        self.until = Some(version);
        self
    }

    /// Omits the property from serialized output when its value is empty.
    #[inline]
    pub fn skip_when_empty(mut self) -> Self {
        self.skip_when_empty = true;
        self
    }

    /// Looks the property up at `path`, relative to the owning object,
    /// before trying aliases and the wire name.
    #[inline]
    pub fn path(mut self, path: ValuePath) -> Self {
        self.path = Some(path);
        self
    }

    #[inline]
    pub fn skip_serializing(mut self) -> Self {
        self.serialize = false;
        self
    }

    #[inline]
    pub fn skip_deserializing(mut self) -> Self {
        self.deserialize = false;
        self
    }

    // -------------------------------------------------------------------------
    // Crate-internal, driven by `ObjectInfoBuilder`.

    #[inline]
    pub(crate) fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }

    #[inline]
    pub(crate) fn apply_naming(&mut self, naming: crate::NamingStrategy) {
        if !self.renamed {
            self.external_name = Cow::Owned(naming.apply(&self.name));
        }
    }

    // -------------------------------------------------------------------------
    // Accessors

    /// The internal identifier, usually the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }

    /// The wire key.
    #[inline]
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    #[inline]
    pub fn alias_names(&self) -> &[Cow<'static, str>] {
        &self.aliases
    }

    /// The declared groups, or `["default"]` if none were declared.
    #[inline]
    pub fn group_names(&self) -> &[Cow<'static, str>] {
        if self.groups.is_empty() {
            DEFAULT_GROUPS
        } else {
            &self.groups
        }
    }

    #[inline]
    pub fn since_version(&self) -> Option<&Version> {
        self.since.as_ref()
    }

    #[inline]
    pub fn until_version(&self) -> Option<&Version> {
        self.until.as_ref()
    }

    #[inline]
    pub fn skips_when_empty(&self) -> bool {
        self.skip_when_empty
    }

    #[inline]
    pub fn lookup_path(&self) -> Option<&ValuePath> {
        self.path.as_ref()
    }

    #[inline]
    pub fn serializes(&self) -> bool {
        self.serialize
    }

    #[inline]
    pub fn deserializes(&self) -> bool {
        self.deserialize
    }

    /// Declaration index inside the owning [`ObjectInfo`](crate::info::ObjectInfo).
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    // -------------------------------------------------------------------------
    // Filters

    /// Returns `true` if `version` lies inside the inclusive window
    /// `[since, until]`. Missing bounds are open.
    pub fn in_window(&self, version: &Version) -> bool {
        let after_lower = self
            .since
            .as_ref()
            .is_none_or(|since| version.cmp_precedence(since).is_ge());
        let before_upper = self
            .until
            .as_ref()
            .is_none_or(|until| version.cmp_precedence(until).is_le());
        after_lower && before_upper
    }

    /// Returns `true` if `groups` is empty or shares a group with this property.
    pub fn in_groups(&self, groups: &BTreeSet<String>) -> bool {
        groups.is_empty()
            || self
                .group_names()
                .iter()
                .any(|group| groups.contains(&**group))
    }
}

impl PartialEq for PropertyMetadata {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PropertyMetadata {}

// -----------------------------------------------------------------------------
// Tests
