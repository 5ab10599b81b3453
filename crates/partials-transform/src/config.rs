//! Per-type transformation configuration.
//!
//! Every data type may carry conditional default directives and allowlists
//! restricting which request-bound directives reach it. The configuration
//! is an explicit value handed to the transformer; tests build their own.

use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use partials_model::DataObject;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::ConditionalDefaults;
use crate::directives::{DirectiveKind, Directives};
use crate::tree::SelectorTree;

// =============================================================================
// ALLOWLISTS
// =============================================================================

/// Property names a request-bound directive may target on one type.
///
/// Serialized as `true` for [`Allowlist::Unrestricted`], or as a list of
/// names. `false` and `[]` both deny every name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AllowlistRepr", into = "AllowlistRepr")]
pub enum Allowlist {
    /// Every property may be targeted.
    Unrestricted,
    /// Only the listed properties may be targeted. `*` admits wildcard
    /// selectors.
    Only(BTreeSet<String>),
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::none()
    }
}

impl Allowlist {
    pub fn unrestricted() -> Self {
        Self::Unrestricted
    }

    pub fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, name: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Only(names) => names.contains(name),
        }
    }

    /// Drop the top-level entries of `tree` this list does not admit.
    fn retain(&self, tree: &mut SelectorTree, type_name: &str, kind: DirectiveKind) {
        let Self::Only(names) = self else {
            return;
        };
        let dropped = tree.retain_fields(|name| names.contains(name));
        for name in &dropped {
            debug!(type_name, %kind, property = %name, "dropped disallowed request directive");
        }
        if !names.contains("*") && tree.clear_wildcard() {
            debug!(type_name, %kind, "dropped disallowed request wildcard");
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AllowlistRepr {
    Flag(bool),
    Names(Vec<String>),
}

impl From<AllowlistRepr> for Allowlist {
    fn from(value: AllowlistRepr) -> Self {
        match value {
            AllowlistRepr::Flag(true) => Self::Unrestricted,
            AllowlistRepr::Flag(false) => Self::none(),
            AllowlistRepr::Names(names) => Self::names(names),
        }
    }
}

impl From<Allowlist> for AllowlistRepr {
    fn from(value: Allowlist) -> Self {
        match value {
            Allowlist::Unrestricted => Self::Flag(true),
            Allowlist::Only(names) => Self::Names(names.into_iter().collect()),
        }
    }
}

/// Allowlists for the four directive kinds of one type.
///
/// The default denies every request-bound directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllowedDirectives {
    /// Names request `include` directives may target.
    pub include: Allowlist,

    /// Names request `exclude` directives may target.
    pub exclude: Allowlist,

    /// Names request `only` directives may target.
    pub only: Allowlist,

    /// Names request `except` directives may target.
    pub except: Allowlist,
}

impl AllowedDirectives {
    pub fn unrestricted() -> Self {
        Self {
            include: Allowlist::Unrestricted,
            exclude: Allowlist::Unrestricted,
            only: Allowlist::Unrestricted,
            except: Allowlist::Unrestricted,
        }
    }

    #[must_use]
    pub fn with(mut self, kind: DirectiveKind, allowlist: Allowlist) -> Self {
        *self.get_mut(kind) = allowlist;
        self
    }

    pub fn get(&self, kind: DirectiveKind) -> &Allowlist {
        match kind {
            DirectiveKind::Include => &self.include,
            DirectiveKind::Exclude => &self.exclude,
            DirectiveKind::Only => &self.only,
            DirectiveKind::Except => &self.except,
        }
    }

    fn get_mut(&mut self, kind: DirectiveKind) -> &mut Allowlist {
        match kind {
            DirectiveKind::Include => &mut self.include,
            DirectiveKind::Exclude => &mut self.exclude,
            DirectiveKind::Only => &mut self.only,
            DirectiveKind::Except => &mut self.except,
        }
    }

    /// Filter request-bound directives at one scope.
    pub fn filter(&self, requested: &mut Directives, type_name: &str) {
        for kind in DirectiveKind::ALL {
            self.get(kind)
                .retain(requested.tree_mut(kind), type_name, kind);
        }
    }
}

// =============================================================================
// TYPE CONFIGURATION
// =============================================================================

/// Configuration of one data type.
#[derive(Debug, Clone, Default)]
pub struct TypeConfig {
    defaults: ConditionalDefaults,
    allowed: AllowedDirectives,
}

impl TypeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: ConditionalDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_allowed(mut self, allowed: AllowedDirectives) -> Self {
        self.allowed = allowed;
        self
    }

    #[must_use]
    pub fn allow(mut self, kind: DirectiveKind, allowlist: Allowlist) -> Self {
        self.allowed = self.allowed.with(kind, allowlist);
        self
    }

    pub fn defaults(&self) -> &ConditionalDefaults {
        &self.defaults
    }

    pub fn allowed(&self) -> &AllowedDirectives {
        &self.allowed
    }
}

/// Registry of [`TypeConfig`]s keyed by data type.
///
/// Types without an entry have no conditional defaults and accept no
/// request-bound directives.
#[derive(Debug, Clone, Default)]
pub struct PartialsConfig {
    types: HashMap<TypeId, TypeConfig>,
}

impl PartialsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared configuration with no entries.
    pub fn empty() -> &'static PartialsConfig {
        static EMPTY: OnceLock<PartialsConfig> = OnceLock::new();
        EMPTY.get_or_init(PartialsConfig::new)
    }

    /// Register the configuration of `T`, replacing any earlier one.
    #[must_use]
    pub fn register<T: DataObject>(mut self, config: TypeConfig) -> Self {
        self.insert::<T>(config);
        self
    }

    pub fn insert<T: DataObject>(&mut self, config: TypeConfig) -> Option<TypeConfig> {
        self.types.insert(TypeId::of::<T>(), config)
    }

    pub fn get<T: DataObject>(&self) -> Option<&TypeConfig> {
        self.types.get(&TypeId::of::<T>())
    }

    /// Configuration of the concrete type behind `object`.
    pub fn for_object(&self, object: &dyn DataObject) -> Option<&TypeConfig> {
        self.types.get(&Any::type_id(object.as_any()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    fn requested(selectors: &[&str]) -> Directives {
        let mut directives = Directives::new();
        for selector in selectors {
            directives.add(DirectiveKind::Include, &Selector::parse(selector).unwrap());
        }
        directives
    }

    #[test]
    fn default_denies_everything() {
        let mut directives = requested(&["name", "*"]);
        AllowedDirectives::default().filter(&mut directives, "LazyData");
        assert!(directives.is_empty());
    }

    #[test]
    fn listed_names_pass() {
        let mut directives = requested(&["name", "email", "nested.name"]);
        AllowedDirectives::default()
            .with(DirectiveKind::Include, Allowlist::names(["name", "nested"]))
            .filter(&mut directives, "LazyData");
        assert_eq!(
            directives.tree(DirectiveKind::Include).to_selectors(),
            vec!["name", "nested.name"]
        );
    }

    #[test]
    fn unrestricted_keeps_wildcards() {
        let mut directives = requested(&["*"]);
        AllowedDirectives::unrestricted().filter(&mut directives, "LazyData");
        assert_eq!(
            directives.tree(DirectiveKind::Include).to_selectors(),
            vec!["*"]
        );
    }

    #[test]
    fn deserializes_from_toml() {
        let allowed: AllowedDirectives = toml::from_str(
            r#"
            include = ["name"]
            exclude = true
            only = false
            "#,
        )
        .unwrap();

        assert_eq!(allowed.include, Allowlist::names(["name"]));
        assert_eq!(allowed.exclude, Allowlist::Unrestricted);
        assert_eq!(allowed.only, Allowlist::none());
        assert_eq!(allowed.except, Allowlist::none());
    }

    #[test]
    fn registering_twice_replaces() {
        #[derive(Debug)]
        struct Empty;
        partials_model::data_object!(Empty {});

        let config = PartialsConfig::new()
            .register::<Empty>(
                TypeConfig::new().allow(DirectiveKind::Include, Allowlist::unrestricted()),
            )
            .register::<Empty>(TypeConfig::new());

        assert_eq!(config.len(), 1);
        let registered = config.get::<Empty>().unwrap();
        assert_eq!(registered.allowed().include, Allowlist::none());
        assert!(config.for_object(&Empty).is_some());
    }
}
