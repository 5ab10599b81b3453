//! Property slots of a data object.

use serde_json::Value;

use crate::collection::DataCollection;
use crate::data::DataObject;
use crate::error::LazyError;
use crate::lazy::Lazy;

/// A resolved property value.
#[derive(Debug)]
pub enum Field {
    /// A plain value: scalar, plain list or plain map. Never scoped into.
    Value(Value),
    /// A nested data object.
    Data(Box<dyn DataObject>),
    /// A homogeneous collection of data objects.
    Collection(DataCollection),
    /// An optional property holding no value. Always omitted from output.
    Absent,
}

impl Field {
    pub fn data(value: impl DataObject) -> Self {
        Self::Data(Box::new(value))
    }

    pub fn collection(value: impl Into<DataCollection>) -> Self {
        Self::Collection(value.into())
    }

    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn as_object(&self) -> Option<&dyn DataObject> {
        match self {
            Self::Data(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    /// Downcast a nested data object to its concrete type.
    pub fn as_data<T: DataObject>(&self) -> Option<&T> {
        self.as_object().and_then(|data| data.downcast_ref::<T>())
    }

    pub fn as_collection(&self) -> Option<&DataCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

macro_rules! field_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }

            impl From<$ty> for Property {
                fn from(value: $ty) -> Self {
                    Self::Eager(Field::from(value))
                }
            }
        )*
    };
}

field_from_value!(&str, String, bool, i32, i64, u32, u64, f64, Value);

impl<T> From<Option<T>> for Field
where
    T: Into<Field>,
{
    /// `None` is a nullable value and is emitted as `null`; use
    /// [`Field::Absent`] for a value that was never provided.
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Field::null, Into::into)
    }
}

impl From<DataCollection> for Field {
    fn from(value: DataCollection) -> Self {
        Self::Collection(value)
    }
}

/// One property slot of a data object: either an eager field or a lazy
/// value producing one.
#[derive(Debug)]
pub enum Property {
    Eager(Field),
    Lazy(Lazy),
}

impl Property {
    /// An optional property that was not provided.
    pub fn absent() -> Self {
        Self::Eager(Field::Absent)
    }

    pub fn data(value: impl DataObject) -> Self {
        Self::Eager(Field::data(value))
    }

    pub fn collection(value: impl Into<DataCollection>) -> Self {
        Self::Eager(Field::collection(value))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    pub fn as_lazy(&self) -> Option<&Lazy> {
        match self {
            Self::Lazy(lazy) => Some(lazy),
            Self::Eager(_) => None,
        }
    }

    /// Read the value like a regular property: lazy values are forced
    /// whatever their inclusion policy.
    pub fn get(&self) -> Result<&Field, LazyError> {
        match self {
            Self::Eager(field) => Ok(field),
            Self::Lazy(lazy) => lazy.resolve(),
        }
    }
}

impl From<Field> for Property {
    fn from(value: Field) -> Self {
        Self::Eager(value)
    }
}

impl From<Lazy> for Property {
    fn from(value: Lazy) -> Self {
        Self::Lazy(value)
    }
}

impl From<DataCollection> for Property {
    fn from(value: DataCollection) -> Self {
        Self::Eager(Field::Collection(value))
    }
}
