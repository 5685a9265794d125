use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::CustomOrderError;
use crate::info::{NamingStrategy, PropertyMetadata};

// -----------------------------------------------------------------------------
// PropertyOrder

/// The order in which serialized properties are emitted.
///
/// Resolved once, when the [`ObjectInfo`] is built.
///
/// `#[derive(Serializable)]` checks custom orders at compile time. Leaving
/// out a property is rejected:
///
/// ```compile_fail
/// use vc_serializer::Serializable;
///
/// #[derive(Serializable)]
/// #[serial(order = ["a"])]
/// struct Incomplete {
///     a: u8,
///     b: u8,
/// }
/// ```
///
/// and so is naming a field that is never serialized:
///
/// ```compile_fail
/// use vc_serializer::Serializable;
///
/// #[derive(Serializable)]
/// #[serial(order = ["a", "b"])]
/// struct Hidden {
///     a: u8,
///     #[serial(skip_serializing)]
///     b: u8,
/// }
/// ```
///
/// ```
/// use vc_serializer::Serializable;
///
/// #[derive(Serializable)]
/// #[serial(order = ["a"])]
/// struct Hidden {
///     a: u8,
///     #[serial(skip_serializing)]
///     b: u8,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyOrder {
    /// Declaration order.
    #[default]
    Declaration,
    /// Sorted by wire name.
    Alphabetical,
    /// Explicit list of internal names. Must contain every serializable
    /// property exactly once.
    Custom(Vec<Cow<'static, str>>),
}

impl PropertyOrder {
    pub fn custom<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        Self::Custom(names.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// The static description of a serializable type.
///
/// Holds the properties in declaration order, each tagged with its slot,
/// and the serialization order resolved from a [`PropertyOrder`].
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    type_path: &'static str,
    properties: Box<[PropertyMetadata]>,
    // Slots of serializable properties, in emission order.
    serialization_order: Box<[usize]>,
    order: PropertyOrder,
    naming: NamingStrategy,
}

impl ObjectInfo {
    #[inline]
    pub fn builder(type_path: &'static str) -> ObjectInfoBuilder {
        ObjectInfoBuilder {
            type_path,
            properties: Vec::new(),
            order: PropertyOrder::Declaration,
            naming: NamingStrategy::Identity,
        }
    }

    /// Same as [`builder`](ObjectInfo::builder), using [`core::any::type_name`].
    #[inline]
    pub fn builder_of<T: ?Sized>() -> ObjectInfoBuilder {
        Self::builder(core::any::type_name::<T>())
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn order(&self) -> &PropertyOrder {
        &self.order
    }

    #[inline]
    pub fn naming(&self) -> NamingStrategy {
        self.naming
    }

    /// Returns the number of declared properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the property with the given internal `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[inline]
    pub fn property_at(&self, slot: usize) -> Option<&PropertyMetadata> {
        self.properties.get(slot)
    }

    /// All properties in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyMetadata] {
        &self.properties
    }

    /// Serializable properties in resolved order.
    pub fn serialization_properties(&self) -> impl ExactSizeIterator<Item = &PropertyMetadata> {
        self.serialization_order
            .iter()
            .map(|&slot| &self.properties[slot])
    }

    /// Deserializable properties in declaration order.
    pub fn deserialization_properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter().filter(|p| p.deserializes())
    }
}

// -----------------------------------------------------------------------------
// Builder

/// Builder for [`ObjectInfo`], see [`ObjectInfo::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ObjectInfoBuilder {
    type_path: &'static str,
    properties: Vec<PropertyMetadata>,
    order: PropertyOrder,
    naming: NamingStrategy,
}

impl ObjectInfoBuilder {
    /// Appends a property. Its slot is its position in declaration order.
    pub fn property(mut self, mut property: PropertyMetadata) -> Self {
        property.set_slot(self.properties.len());
        self.properties.push(property);
        self
    }

    #[inline]
    pub fn order(mut self, order: PropertyOrder) -> Self {
        self.order = order;
        self
    }

    #[inline]
    pub fn naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Applies the naming strategy and resolves the serialization order.
    pub fn build(self) -> Result<ObjectInfo, CustomOrderError> {
        let Self {
            type_path,
            mut properties,
            order,
            naming,
        } = self;

        for property in &mut properties {
            property.apply_naming(naming);
        }

        let serializable = || properties.iter().filter(|p| p.serializes());

        let serialization_order = match &order {
            PropertyOrder::Declaration => serializable().map(PropertyMetadata::slot).collect(),
            PropertyOrder::Alphabetical => {
                let mut slots: Vec<usize> = serializable().map(PropertyMetadata::slot).collect();
                slots.sort_by(|&a, &b| {
                    properties[a]
                        .external_name()
                        .cmp(properties[b].external_name())
                });
                slots
            }
            PropertyOrder::Custom(names) => {
                let mut slots = Vec::with_capacity(names.len());
                for name in names {
                    let Some(property) = serializable().find(|p| p.name() == name) else {
                        return Err(CustomOrderError::UnknownProperty {
                            type_path,
                            name: name.clone(),
                        });
                    };
                    if slots.contains(&property.slot()) {
                        return Err(CustomOrderError::DuplicateProperty {
                            type_path,
                            name: name.clone(),
                        });
                    }
                    slots.push(property.slot());
                }
                if let Some(missing) = serializable().find(|p| !slots.contains(&p.slot())) {
                    return Err(CustomOrderError::MissingProperty {
                        type_path,
                        name: missing.name_cow().clone(),
                    });
                }
                slots
            }
        };

        Ok(ObjectInfo {
            type_path,
            properties: properties.into_boxed_slice(),
            serialization_order: serialization_order.into_boxed_slice(),
            order,
            naming,
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{ObjectInfo, PropertyOrder};
    use crate::error::CustomOrderError;
    use crate::info::{NamingStrategy, PropertyMetadata};

    fn builder() -> super::ObjectInfoBuilder {
        ObjectInfo::builder("test::Thing")
            .property(PropertyMetadata::new("zeta"))
            .property(PropertyMetadata::new("alpha_beta"))
            .property(PropertyMetadata::new("write_only").skip_serializing())
            .property(PropertyMetadata::new("mid").rename("b_mid"))
    }

    fn order(info: &ObjectInfo) -> Vec<&str> {
        info.serialization_properties().map(|p| p.name()).collect()
    }

    #[test]
    fn declaration_and_slots() {
        let info = builder().build().unwrap();
        assert_eq!(order(&info), ["zeta", "alpha_beta", "mid"]);
        assert_eq!(info.property("mid").unwrap().slot(), 3);
        assert_eq!(info.property_at(2).unwrap().name(), "write_only");
        assert_eq!(info.deserialization_properties().count(), 4);
    }

    #[test]
    fn alphabetical_uses_wire_names() {
        let info = builder()
            .naming(NamingStrategy::CamelCase)
            .order(PropertyOrder::Alphabetical)
            .build()
            .unwrap();
        assert_eq!(order(&info), ["alpha_beta", "mid", "zeta"]);
        assert_eq!(info.property("alpha_beta").unwrap().external_name(), "alphaBeta");
        // explicit renames are untouched
        assert_eq!(info.property("mid").unwrap().external_name(), "b_mid");
    }

    #[test]
    fn custom_order() {
        let info = builder()
            .order(PropertyOrder::custom(["mid", "zeta", "alpha_beta"]))
            .build()
            .unwrap();
        assert_eq!(order(&info), ["mid", "zeta", "alpha_beta"]);

        let err = builder()
            .order(PropertyOrder::custom(["mid", "zeta"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CustomOrderError::MissingProperty { ref name, .. } if name == "alpha_beta"));

        let err = builder()
            .order(PropertyOrder::custom(["mid", "zeta", "alpha_beta", "write_only"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CustomOrderError::UnknownProperty { .. }));

        let err = builder()
            .order(PropertyOrder::custom(["mid", "mid", "zeta", "alpha_beta"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CustomOrderError::DuplicateProperty { .. }));
    }
}
