//! Data types shared by the integration tests.
#![allow(dead_code)]

use std::collections::BTreeSet;

use partials_model::{
    DataCollection, Field, Lazy, LoadedRelations, PageMeta, Property, data_object,
};

pub fn text(property: &Property) -> Option<&str> {
    property.get().ok().and_then(Field::as_str)
}

// =============================================================================
// SIMPLE SHAPES
// =============================================================================

#[derive(Debug)]
pub struct SimpleData {
    pub string: Property,
}

data_object!(SimpleData { string });

impl SimpleData {
    pub fn new(string: &str) -> Self {
        Self {
            string: string.into(),
        }
    }
}

#[derive(Debug)]
pub struct LazyData {
    pub name: Property,
}

data_object!(LazyData { name });

impl LazyData {
    pub fn new(name: impl Into<Property>) -> Self {
        Self { name: name.into() }
    }

    pub fn lazy(name: &str) -> Self {
        let name = name.to_string();
        Self::new(Lazy::create(move || name))
    }
}

#[derive(Debug)]
pub struct DefaultLazyData {
    pub name: Property,
}

data_object!(DefaultLazyData { name });

impl DefaultLazyData {
    pub fn lazy(name: &str) -> Self {
        let name = name.to_string();
        Self {
            name: Lazy::create(move || name).default_included().into(),
        }
    }
}

#[derive(Debug)]
pub struct MultiData {
    pub first: Property,
    pub second: Property,
}

data_object!(MultiData { first, second });

impl MultiData {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

#[derive(Debug)]
pub struct NestedLazyData {
    pub simple: Property,
}

data_object!(NestedLazyData { simple });

impl NestedLazyData {
    pub fn new(simple: impl Into<Property>) -> Self {
        Self {
            simple: simple.into(),
        }
    }

    pub fn lazy(string: &str) -> Self {
        let string = string.to_string();
        Self::new(Lazy::create(move || Field::data(SimpleData::new(&string))))
    }
}

#[derive(Debug)]
pub struct OnlyData {
    pub first_name: Property,
    pub last_name: Property,
}

data_object!(OnlyData {
    first_name,
    last_name
});

impl OnlyData {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

// =============================================================================
// SONGS
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct DummyDto {
    pub artist: &'static str,
    pub name: &'static str,
    pub year: i64,
}

impl DummyDto {
    pub fn rick() -> Self {
        Self {
            artist: "Rick Astley",
            name: "Never gonna give you up",
            year: 1987,
        }
    }

    pub fn bon() -> Self {
        Self {
            artist: "Bon Jovi",
            name: "Living on a prayer",
            year: 1986,
        }
    }
}

#[derive(Debug)]
pub struct MultiLazyData {
    pub artist: Property,
    pub name: Property,
    pub year: Property,
}

data_object!(MultiLazyData { artist, name, year });

impl MultiLazyData {
    pub fn new(
        artist: impl Into<Property>,
        name: impl Into<Property>,
        year: impl Into<Property>,
    ) -> Self {
        Self {
            artist: artist.into(),
            name: name.into(),
            year: year.into(),
        }
    }

    pub fn from_dto(dto: DummyDto) -> Self {
        Self::new(
            Lazy::create(move || dto.artist),
            Lazy::create(move || dto.name),
            Lazy::create(move || dto.year),
        )
    }
}

// =============================================================================
// CLASS DEFAULTS
// =============================================================================

#[derive(Debug)]
pub struct PartialClassConditionalData {
    pub enabled: Property,
    pub string: Property,
    pub nested: Property,
}

data_object!(PartialClassConditionalData {
    enabled,
    string,
    nested
});

impl PartialClassConditionalData {
    pub fn create(enabled: bool) -> Self {
        Self {
            enabled: enabled.into(),
            string: "Hello World".into(),
            nested: Property::data(SimpleData::new("Hello World")),
        }
    }

    pub fn create_lazy(enabled: bool) -> Self {
        Self {
            enabled: enabled.into(),
            string: Lazy::create(|| "Hello World").into(),
            nested: Lazy::create(|| Field::data(SimpleData::new("Hello World"))).into(),
        }
    }

    pub fn create_default_included(enabled: bool) -> Self {
        Self {
            enabled: enabled.into(),
            string: Lazy::create(|| "Hello World").default_included().into(),
            nested: Lazy::create(|| Field::data(SimpleData::new("Hello World")))
                .default_included()
                .into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
            .get()
            .ok()
            .and_then(Field::as_bool)
            .unwrap_or(false)
    }
}

// =============================================================================
// RELATIONS
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeNestedModel {
    pub fake_model: Option<String>,
    pub loaded: BTreeSet<String>,
}

impl FakeNestedModel {
    pub fn load(mut self, relation: &str) -> Self {
        self.loaded.insert(relation.to_string());
        self
    }
}

impl LoadedRelations for FakeNestedModel {
    fn relation_loaded(&self, relation: &str) -> bool {
        self.loaded.contains(relation)
    }
}

#[derive(Debug)]
pub struct FakeModelData {
    pub string: Property,
}

data_object!(FakeModelData { string });

#[derive(Debug)]
pub struct FakeNestedModelData {
    pub fake_model: Property,
}

data_object!(FakeNestedModelData { fake_model });

impl FakeNestedModelData {
    pub fn create_with_lazy_when_loaded(model: &FakeNestedModel) -> Self {
        let related = model.fake_model.clone();
        Self {
            fake_model: Lazy::when_loaded("fake_model", model, move || match related {
                Some(string) => Field::data(FakeModelData {
                    string: string.into(),
                }),
                None => Field::null(),
            })
            .into(),
        }
    }
}

// =============================================================================
// COLLECTIONS
// =============================================================================

pub fn lazy_data_collection(names: &[&str]) -> DataCollection {
    names.iter().map(|name| LazyData::lazy(name)).collect()
}

pub fn default_lazy_data_collection(names: &[&str]) -> DataCollection {
    names.iter().map(|name| DefaultLazyData::lazy(name)).collect()
}

pub fn paginate<T: partials_model::DataObject>(items: Vec<T>) -> DataCollection {
    let total = items.len() as u64;
    let meta = PageMeta::new(total, 15, 1).expect("valid page");
    DataCollection::paginated(items, meta)
}
