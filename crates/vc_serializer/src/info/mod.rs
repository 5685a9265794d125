//! Static per-type descriptors.
//!
//! The engine never reflects over types. Each serializable type describes
//! its properties once, through an [`ObjectInfo`], and the navigators walk
//! that description.
//!
//! - [`PropertyMetadata`]: one logical property, its wire names, groups,
//!   version window and lookup path.
//! - [`ObjectInfo`]: the ordered property list of a type plus the resolved
//!   serialization order.
//! - [`ObjectInfoCell`]: lazily built static storage for an [`ObjectInfo`].
//!
//! `#[derive(Serializable)]` emits all of this. Hand-written descriptors
//! use the builders directly:
//!
//! ```
//! use vc_serializer::info::{ObjectInfo, ObjectInfoCell, PropertyMetadata, PropertyOrder};
//!
//! fn info() -> &'static ObjectInfo {
//!     static CELL: ObjectInfoCell = ObjectInfoCell::new();
//!     CELL.get_or_build(|| {
//!         ObjectInfo::builder("app::Point")
//!             .property(PropertyMetadata::new("x"))
//!             .property(PropertyMetadata::new("y").alias("ordinate"))
//!             .order(PropertyOrder::custom(["y", "x"]))
//!             .build()
//!     })
//! }
//!
//! let names: Vec<_> = info().serialization_properties().map(|p| p.name()).collect();
//! assert_eq!(names, ["y", "x"]);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod naming;
mod object;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use cell::ObjectInfoCell;
pub use naming::NamingStrategy;
pub use object::{ObjectInfo, ObjectInfoBuilder, PropertyOrder};
pub use property::{DEFAULT_GROUP, PropertyMetadata};
