//! Directives bound from a request's query string.
//!
//! Each of `include`, `exclude`, `only` and `except` takes a comma list of
//! selectors and may be repeated, with or without a `[]` suffix:
//!
//! ```text
//! ?include=songs.{name,artist},year&exclude[]=secret&exclude[]=token
//! ```
//!
//! Commas inside a brace group belong to the group. Other parameters are
//! ignored.

use http::{Request, Uri};
use partials_transform::{DirectiveKind, DirectiveSet, Partial, Selector, split_list};
use tracing::{debug, trace};

use crate::error::{RequestError, Result};

/// Selectors bound from a request, one list per directive kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDirectives {
    include: Vec<String>,
    exclude: Vec<String>,
    only: Vec<String>,
    except: Vec<String>,
}

impl RequestDirectives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind directives from a raw query string (without the leading `?`).
    ///
    /// Every selector is validated here so that a malformed one is reported
    /// before anything is applied.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut directives = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let Some(kind) = directive_key(&key) else {
                trace!(key = %key, "ignoring query parameter");
                continue;
            };
            for selector in split_list(&value) {
                Selector::parse(selector)
                    .map_err(|source| RequestError::Selector { kind, source })?;
                directives.list_mut(kind).push(selector.to_string());
            }
        }
        debug!(
            include = directives.include.len(),
            exclude = directives.exclude.len(),
            only = directives.only.len(),
            except = directives.except.len(),
            "bound request directives"
        );
        Ok(directives)
    }

    pub fn from_uri(uri: &Uri) -> Result<Self> {
        uri.query().map_or_else(|| Ok(Self::new()), Self::from_query)
    }

    pub fn from_request<B>(request: &Request<B>) -> Result<Self> {
        Self::from_uri(request.uri())
    }

    pub fn get(&self, kind: DirectiveKind) -> &[String] {
        match kind {
            DirectiveKind::Include => &self.include,
            DirectiveKind::Exclude => &self.exclude,
            DirectiveKind::Only => &self.only,
            DirectiveKind::Except => &self.except,
        }
    }

    fn list_mut(&mut self, kind: DirectiveKind) -> &mut Vec<String> {
        match kind {
            DirectiveKind::Include => &mut self.include,
            DirectiveKind::Exclude => &mut self.exclude,
            DirectiveKind::Only => &mut self.only,
            DirectiveKind::Except => &mut self.except,
        }
    }

    pub fn is_empty(&self) -> bool {
        DirectiveKind::ALL
            .into_iter()
            .all(|kind| self.get(kind).is_empty())
    }

    /// Add the bound selectors to `set` as requested directives.
    pub fn apply(&self, set: &mut DirectiveSet) -> Result<()> {
        for kind in DirectiveKind::ALL {
            set.add_requested(kind, self.get(kind))
                .map_err(|source| RequestError::Selector { kind, source })?;
        }
        Ok(())
    }

    /// Add the bound selectors to the directives of `partial`.
    pub fn apply_to<T: ?Sized>(&self, partial: &mut Partial<'_, T>) -> Result<()> {
        self.apply(partial.directives_mut())
    }
}

/// `include` and `include[]` both name the include list.
fn directive_key(key: &str) -> Option<DirectiveKind> {
    let name = key.strip_suffix("[]").unwrap_or(key);
    DirectiveKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == name)
}
