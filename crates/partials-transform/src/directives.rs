//! Include, exclude, only and except directives.
//!
//! A [`Directives`] value holds one [`SelectorTree`] per kind. A
//! [`DirectiveSet`] pairs the directives supplied in code with those bound
//! from a request; only the latter are subject to per-type allowlists.

use std::fmt;
use std::str::FromStr;

use partials_model::{DataObject, LazyPolicy, Property};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TypeConfig;
use crate::error::SelectorError;
use crate::selector::Selector;
use crate::tree::SelectorTree;

/// The four directive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Include,
    Exclude,
    Only,
    Except,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 4] = [
        DirectiveKind::Include,
        DirectiveKind::Exclude,
        DirectiveKind::Only,
        DirectiveKind::Except,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Only => "only",
            Self::Except => "except",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Include => 0,
            Self::Exclude => 1,
            Self::Only => 2,
            Self::Except => 3,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirectiveKind(pub String);

impl fmt::Display for UnknownDirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown directive '{}', expected include, exclude, only or except",
            self.0
        )
    }
}

impl std::error::Error for UnknownDirectiveKind {}

impl FromStr for DirectiveKind {
    type Err = UnknownDirectiveKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DirectiveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDirectiveKind(s.to_string()))
    }
}

/// One selector tree per directive kind, at one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    trees: [SelectorTree; 4],
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self, kind: DirectiveKind) -> &SelectorTree {
        &self.trees[kind.index()]
    }

    pub fn tree_mut(&mut self, kind: DirectiveKind) -> &mut SelectorTree {
        &mut self.trees[kind.index()]
    }

    pub fn add(&mut self, kind: DirectiveKind, selector: &Selector) {
        self.tree_mut(kind).insert(selector);
    }

    pub fn merge(&mut self, other: &Directives) {
        for kind in DirectiveKind::ALL {
            self.tree_mut(kind).merge(other.tree(kind));
        }
    }

    /// Directives applying inside the property `name`.
    pub fn scope_into(&self, name: &str) -> Directives {
        let mut scoped = Directives::new();
        for kind in DirectiveKind::ALL {
            *scoped.tree_mut(kind) = self.tree(kind).scope(name);
        }
        scoped
    }

    pub fn is_empty(&self) -> bool {
        self.trees.iter().all(SelectorTree::is_empty)
    }

    pub fn clear(&mut self) {
        for tree in &mut self.trees {
            tree.clear();
        }
    }

    /// Decide whether the property `name` is emitted at this scope.
    ///
    /// Checked in order:
    /// 1. absent values and conditionals whose predicate fails are hidden
    /// 2. a non-empty only set keeps the names it lists and drops names it
    ///    does not reach; names reached only through `*` go on to the
    ///    default rules below
    /// 3. an except entry ending at `name` hides it
    /// 4. lazies omitted by default need an include entry
    /// 5. conditionals whose predicate holds are shown
    /// 6. everything else is shown unless an exclude entry ends at `name`
    pub fn is_property_visible(&self, name: &str, property: &Property) -> bool {
        let policy = match property {
            Property::Eager(field) if field.is_absent() => return false,
            Property::Eager(_) => None,
            Property::Lazy(lazy) => Some(lazy.policy()),
        };

        if let Some(LazyPolicy::Conditional(condition)) = policy
            && !condition.holds()
        {
            return false;
        }

        let only = self.tree(DirectiveKind::Only);
        if !only.is_empty() {
            if only.names(name) {
                return true;
            }
            if !only.contains(name) {
                return false;
            }
        }
        if self.tree(DirectiveKind::Except).is_terminal(name) {
            return false;
        }

        match policy {
            Some(LazyPolicy::OmittedByDefault) => self.tree(DirectiveKind::Include).contains(name),
            Some(LazyPolicy::Conditional(_)) => true,
            Some(LazyPolicy::DefaultIncluded | LazyPolicy::Deferred(_)) | None => {
                !self.tree(DirectiveKind::Exclude).is_terminal(name)
            }
        }
    }
}

/// Directives for one transformation: those supplied in code and those
/// bound from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    manual: Directives,
    requested: Directives,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every selector first, then apply them all. A malformed
    /// selector leaves the set untouched.
    pub fn add<I, S>(&mut self, kind: DirectiveKind, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_all(selectors)?;
        for selector in &parsed {
            self.manual.add(kind, selector);
        }
        Ok(())
    }

    pub fn add_include<I, S>(&mut self, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(DirectiveKind::Include, selectors)
    }

    pub fn add_exclude<I, S>(&mut self, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(DirectiveKind::Exclude, selectors)
    }

    pub fn add_only<I, S>(&mut self, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(DirectiveKind::Only, selectors)
    }

    pub fn add_except<I, S>(&mut self, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(DirectiveKind::Except, selectors)
    }

    /// Add directives bound from a request. These are filtered against the
    /// allowlist of every type they reach.
    pub fn add_requested<I, S>(&mut self, kind: DirectiveKind, selectors: I) -> Result<(), SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_all(selectors)?;
        for selector in &parsed {
            self.requested.add(kind, selector);
        }
        Ok(())
    }

    /// Add `path` only when `condition` holds. The path is validated either
    /// way.
    pub fn merge_conditional(
        &mut self,
        kind: DirectiveKind,
        path: &str,
        condition: bool,
    ) -> Result<(), SelectorError> {
        let selector = Selector::parse(path)?;
        if condition {
            self.manual.add(kind, &selector);
        }
        Ok(())
    }

    /// The directives applying inside the property `name`, for both sources.
    pub fn scope_into(&self, name: &str) -> DirectiveSet {
        DirectiveSet {
            manual: self.manual.scope_into(name),
            requested: self.requested.scope_into(name),
        }
    }

    pub fn is_property_visible(&self, name: &str, property: &Property) -> bool {
        self.combined().is_property_visible(name, property)
    }

    /// Clear both sources.
    pub fn reset(&mut self) {
        self.manual.clear();
        self.requested.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.requested.is_empty()
    }

    pub fn manual(&self) -> &Directives {
        &self.manual
    }

    pub fn requested(&self) -> &Directives {
        &self.requested
    }

    /// Bring this scope in line with the configuration of `object`'s type:
    /// requested directives are filtered by its allowlists and its
    /// conditional defaults are evaluated against `object` and added.
    pub(crate) fn apply_type_config(&mut self, config: Option<&TypeConfig>, object: &dyn DataObject) {
        match config {
            Some(config) => {
                config.allowed().filter(&mut self.requested, object.type_name());
                config.defaults().fold_into(&mut self.manual, object);
            }
            None => {
                if !self.requested.is_empty() {
                    debug!(
                        type_name = object.type_name(),
                        "type has no configuration, dropping requested directives"
                    );
                }
                self.requested.clear();
            }
        }
    }

    pub(crate) fn combined(&self) -> Directives {
        let mut combined = self.manual.clone();
        combined.merge(&self.requested);
        combined
    }
}

fn parse_all<I, S>(selectors: I) -> Result<Vec<Selector>, SelectorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    selectors
        .into_iter()
        .map(|selector| Selector::parse(selector.as_ref()))
        .collect()
}
