//! Data objects and their schemas.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ModelError, Result};
use crate::property::Property;

/// Ordered list of property names of one data type.
///
/// The schema is the single source of truth for property names and their
/// emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    type_name: String,
    properties: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(type_name: impl Into<String>, properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let type_name = type_name.into();
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        for property in properties {
            let property = property.into();
            if property.is_empty() {
                return Err(ModelError::EmptyPropertyName { type_name });
            }
            if !seen.insert(property.clone()) {
                return Err(ModelError::DuplicateProperty {
                    type_name,
                    property,
                });
            }
            names.push(property);
        }
        Ok(Self {
            type_name,
            properties: names,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|property| property == name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ {} }}", self.type_name, self.properties.join(", "))
    }
}

/// An application-defined aggregate subject to partial transformation.
///
/// Implement it with [`data_object!`](crate::data_object) for plain structs
/// whose fields are all [`Property`] slots.
pub trait DataObject: Any + fmt::Debug + 'static {
    fn schema(&self) -> &Schema;

    fn property(&self, name: &str) -> Option<&Property>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn DataObject {
    /// Declared properties in schema order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.schema()
            .names()
            .filter_map(move |name| self.property(name).map(|property| (name, property)))
    }

    pub fn type_name(&self) -> &str {
        self.schema().type_name()
    }

    pub fn downcast_ref<T: DataObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Implement [`DataObject`] for a struct whose listed fields are
/// [`Property`] slots. Fields are emitted in the listed order.
///
/// ```
/// use partials_model::{Lazy, Property, data_object};
///
/// #[derive(Debug)]
/// struct Song {
///     name: Property,
///     artist: Property,
/// }
///
/// data_object!(Song { name, artist });
///
/// let song = Song {
///     name: Lazy::create(|| "Never gonna give you up").into(),
///     artist: "Rick Astley".into(),
/// };
/// # let _ = song;
/// ```
#[macro_export]
macro_rules! data_object {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::DataObject for $ty {
            fn schema(&self) -> &$crate::Schema {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema> = ::std::sync::OnceLock::new();
                const NAMES: &[&str] = &[$(stringify!($field)),*];
                SCHEMA.get_or_init(|| {
                    $crate::Schema::new(stringify!($ty), NAMES.iter().copied())
                        .unwrap_or_else(|error| panic!("invalid data object schema: {error}"))
                })
            }

            #[allow(clippy::match_single_binding)]
            fn property(&self, name: &str) -> Option<&$crate::Property> {
                match name {
                    $(stringify!($field) => Some(&self.$field),)*
                    _ => None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}
