//! Homogeneous collections of data objects.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::data::DataObject;
use crate::error::{ModelError, Result};

/// Page metadata of a paginated collection.
///
/// Never subject to partial directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    total: u64,
    per_page: u64,
    current_page: u64,
}

impl PageMeta {
    pub fn new(total: u64, per_page: u64, current_page: u64) -> Result<Self> {
        if per_page == 0 {
            return Err(ModelError::InvalidPageSize);
        }
        if current_page == 0 {
            return Err(ModelError::InvalidPage(current_page));
        }
        Ok(Self {
            total,
            per_page,
            current_page,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// 1-based position of the first item on this page, if any.
    pub fn first_item(&self) -> Option<u64> {
        let first = (self.current_page - 1)
            .checked_mul(self.per_page)?
            .checked_add(1)?;
        (first <= self.total).then_some(first)
    }

    /// 1-based position of the last item on this page, if any.
    pub fn last_item(&self) -> Option<u64> {
        self.first_item()
            .map(|first| first.saturating_add(self.per_page - 1).min(self.total))
    }
}

impl Serialize for PageMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PageMeta", 6)?;
        state.serialize_field("current_page", &self.current_page)?;
        state.serialize_field("per_page", &self.per_page)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("last_page", &self.last_page())?;
        state.serialize_field("from", &self.first_item())?;
        state.serialize_field("to", &self.last_item())?;
        state.end()
    }
}

/// An ordered, homogeneous sequence of data objects, optionally paginated.
#[derive(Debug, Default)]
pub struct DataCollection {
    items: Vec<Box<dyn DataObject>>,
    page: Option<PageMeta>,
}

impl DataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paginated page: `items` is the slice shown on `page`.
    pub fn paginated<I, T>(items: I, page: PageMeta) -> Self
    where
        I: IntoIterator<Item = T>,
        T: DataObject,
    {
        let mut collection: Self = items.into_iter().collect();
        collection.page = Some(page);
        collection
    }

    pub fn from_boxed(items: Vec<Box<dyn DataObject>>) -> Self {
        Self { items, page: None }
    }

    pub fn push(&mut self, item: impl DataObject) {
        self.items.push(Box::new(item));
    }

    pub fn push_boxed(&mut self, item: Box<dyn DataObject>) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn DataObject> {
        self.items.get(index).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DataObject> {
        self.items.iter().map(AsRef::as_ref)
    }

    pub fn page(&self) -> Option<&PageMeta> {
        self.page.as_ref()
    }

    pub fn is_paginated(&self) -> bool {
        self.page.is_some()
    }
}

impl<T: DataObject> FromIterator<T> for DataCollection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|item| Box::new(item) as Box<dyn DataObject>)
                .collect(),
            page: None,
        }
    }
}

impl<T: DataObject> From<Vec<T>> for DataCollection {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}
