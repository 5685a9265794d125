use alloc::boxed::Box;

use once_cell::race::OnceBox;

use crate::error::CustomOrderError;
use crate::info::ObjectInfo;

/// Static storage for a type's [`ObjectInfo`].
///
/// The first caller builds the info, later callers read it. Building races
/// are resolved by keeping the first stored value, so the initializer must
/// be free of side effects.
///
/// ```
/// use vc_serializer::info::{ObjectInfo, ObjectInfoCell, PropertyMetadata};
///
/// fn info() -> &'static ObjectInfo {
///     static CELL: ObjectInfoCell = ObjectInfoCell::new();
///     CELL.get_or_build(|| {
///         ObjectInfo::builder("app::Tag")
///             .property(PropertyMetadata::new("label"))
///             .build()
///     })
/// }
///
/// assert!(core::ptr::eq(info(), info()));
/// ```
#[derive(Debug, Default)]
pub struct ObjectInfoCell(OnceBox<ObjectInfo>);

impl ObjectInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceBox::new())
    }

    #[inline]
    pub fn get(&self) -> Option<&ObjectInfo> {
        self.0.get()
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> ObjectInfo) -> &ObjectInfo {
        self.0.get_or_init(|| Box::new(f()))
    }

    /// Like [`get_or_init`](Self::get_or_init) for a fallible builder.
    ///
    /// # Panics
    ///
    /// If `f` fails: an invalid static descriptor is a configuration error.
    #[inline]
    pub fn get_or_build(
        &self,
        f: impl FnOnce() -> Result<ObjectInfo, CustomOrderError>,
    ) -> &ObjectInfo {
        self.0
            .get_or_init(|| Box::new(f().unwrap_or_else(|err| err.handle_error())))
    }
}
