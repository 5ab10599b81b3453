//! Per-type conditional default directives.
//!
//! A type may register, per directive kind, a selector together with a
//! predicate over the instance being transformed. Whenever an instance of
//! that type is transformed, every selector whose predicate holds is added
//! to the directives of that scope, before its properties are visited.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use partials_model::DataObject;
use tracing::trace;

use crate::directives::{DirectiveKind, Directives};
use crate::error::SelectorError;
use crate::selector::Selector;

type Predicate = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

#[derive(Clone)]
struct Definition {
    kind: DirectiveKind,
    selector: Selector,
    predicate: Predicate,
}

/// Conditional default directives of one type.
///
/// A predicate sees the instance at the level being transformed, not the
/// root object, so nested instances decide for their own scope.
#[derive(Clone, Default)]
pub struct ConditionalDefaults {
    definitions: Vec<Definition>,
}

impl ConditionalDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` under `kind`, active for instances where `predicate`
    /// holds. Instances of any other type than `T` never match.
    pub fn define<T, F>(
        mut self,
        kind: DirectiveKind,
        path: &str,
        predicate: F,
    ) -> Result<Self, SelectorError>
    where
        T: DataObject,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let selector = Selector::parse(path)?;
        let predicate: Predicate = Arc::new(move |instance: &dyn Any| {
            instance.downcast_ref::<T>().is_some_and(&predicate)
        });
        self.definitions.push(Definition {
            kind,
            selector,
            predicate,
        });
        Ok(self)
    }

    pub fn include<T, F>(self, path: &str, predicate: F) -> Result<Self, SelectorError>
    where
        T: DataObject,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.define(DirectiveKind::Include, path, predicate)
    }

    pub fn exclude<T, F>(self, path: &str, predicate: F) -> Result<Self, SelectorError>
    where
        T: DataObject,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.define(DirectiveKind::Exclude, path, predicate)
    }

    pub fn only<T, F>(self, path: &str, predicate: F) -> Result<Self, SelectorError>
    where
        T: DataObject,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.define(DirectiveKind::Only, path, predicate)
    }

    pub fn except<T, F>(self, path: &str, predicate: F) -> Result<Self, SelectorError>
    where
        T: DataObject,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.define(DirectiveKind::Except, path, predicate)
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Evaluate every predicate against `instance` and add the selectors
    /// that hold to `directives`.
    pub fn fold_into(&self, directives: &mut Directives, instance: &dyn DataObject) {
        for definition in &self.definitions {
            let holds = (definition.predicate)(instance.as_any());
            trace!(
                type_name = instance.type_name(),
                kind = %definition.kind,
                selector = %definition.selector,
                holds,
                "evaluated conditional default"
            );
            if holds {
                directives.add(definition.kind, &definition.selector);
            }
        }
    }
}

impl fmt::Debug for ConditionalDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.definitions
                    .iter()
                    .map(|definition| format!("{} {}", definition.kind, definition.selector)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use partials_model::{Property, data_object};

    use super::*;

    #[derive(Debug)]
    struct Toggle {
        enabled: bool,
        string: Property,
    }

    data_object!(Toggle { string });

    #[derive(Debug)]
    struct Other {
        string: Property,
    }

    data_object!(Other { string });

    #[test]
    fn folds_only_holding_predicates() {
        let defaults = ConditionalDefaults::new()
            .include("string", |toggle: &Toggle| toggle.enabled)
            .unwrap()
            .exclude("nested.string", |toggle: &Toggle| !toggle.enabled)
            .unwrap();
        assert_eq!(defaults.len(), 2);

        let enabled = Toggle {
            enabled: true,
            string: "Hello World".into(),
        };
        let mut directives = Directives::new();
        defaults.fold_into(&mut directives, &enabled);

        assert!(directives.tree(DirectiveKind::Include).is_terminal("string"));
        assert!(directives.tree(DirectiveKind::Exclude).is_empty());
    }

    #[test]
    fn other_types_never_match() {
        let defaults = ConditionalDefaults::new()
            .only("string", |_: &Toggle| true)
            .unwrap();
        let other = Other {
            string: "Hello".into(),
        };

        let mut directives = Directives::new();
        defaults.fold_into(&mut directives, &other);
        assert!(directives.is_empty());
    }

    #[test]
    fn rejects_malformed_paths() {
        let result = ConditionalDefaults::new().include("nested.", |_: &Toggle| true);
        assert!(result.is_err());
    }
}
