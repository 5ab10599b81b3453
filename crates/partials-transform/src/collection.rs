//! Collection adapter.

use partials_model::{DataCollection, Transformed, TransformedPage};
use tracing::debug;

use crate::directives::DirectiveSet;
use crate::engine::Transformer;
use crate::error::Result;
use crate::path::PropertyPath;

impl Transformer<'_> {
    /// Transform every element in order with the same directives. Page
    /// metadata of a paginated collection is emitted untouched.
    pub(crate) fn transform_each(
        &self,
        collection: &DataCollection,
        directives: &DirectiveSet,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<Transformed> {
        debug!(
            path = %path,
            items = collection.len(),
            paginated = collection.is_paginated(),
            "transforming collection"
        );

        let data = collection
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.transform_object(item, directives.clone(), &path.index(index), depth)
                    .map(Transformed::Object)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(match collection.page() {
            Some(meta) => Transformed::Page(TransformedPage { data, meta: *meta }),
            None => Transformed::List(data),
        })
    }
}
