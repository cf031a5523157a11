//! Taxonomy resolution: which categories, departments, and subcategories are
//! valid, and which priority a selection carries.
//!
//! Options come from an [`OptionSource`]. The [`TaxonomyResolver`] reads the
//! configured store first and falls back to [`BuiltinOptions`] when the store
//! fails, reporting which of the two answered through [`OptionOrigin`].
//! Intake validation uses [`TaxonomyResolver::store_list`], which never falls
//! back.

pub mod builtin;
mod priority;

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::model::{OptionKind, Priority, TaxonomyOption};

pub use builtin::BuiltinOptions;
pub use priority::derive_priority;

/// Read capability over a set of taxonomy options.
pub trait OptionSource: Send + Sync {
    /// Options of `kind`. `parent` filters subcategories by their parent
    /// category, case-insensitively, and is ignored for other kinds.
    fn list(&self, kind: OptionKind, parent: Option<&str>) -> Result<Vec<TaxonomyOption>>;

    /// Every option: categories, then departments, then subcategories.
    fn list_all(&self) -> Result<Vec<TaxonomyOption>> {
        let mut all = self.list(OptionKind::Category, None)?;
        all.extend(self.list(OptionKind::Department, None)?);
        all.extend(self.list(OptionKind::SubCategory, None)?);
        Ok(all)
    }
}

/// Keeps options of `kind`, and for subcategories only those under `parent`.
/// Input order is preserved.
pub(crate) fn filter_options(
    options: Vec<TaxonomyOption>,
    kind: OptionKind,
    parent: Option<&str>,
) -> Vec<TaxonomyOption> {
    options
        .into_iter()
        .filter(|opt| opt.kind == kind)
        .filter(|opt| match (kind, parent) {
            (OptionKind::SubCategory, Some(parent)) => opt.belongs_to(parent),
            _ => true,
        })
        .collect()
}

/// Where a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionOrigin {
    Store,
    Builtin,
}

impl OptionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionOrigin::Store => "store",
            OptionOrigin::Builtin => "builtin",
        }
    }
}

/// A listing together with its origin, so an empty store answer can be told
/// apart from a failed lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub options: Vec<TaxonomyOption>,
    pub origin: OptionOrigin,
}

impl Resolved {
    pub fn is_fallback(&self) -> bool {
        self.origin == OptionOrigin::Builtin
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }
}

#[derive(Clone)]
pub struct TaxonomyResolver {
    store: Arc<dyn OptionSource>,
    fallback: BuiltinOptions,
}

impl TaxonomyResolver {
    pub fn new(store: Arc<dyn OptionSource>) -> Self {
        Self {
            store,
            fallback: BuiltinOptions,
        }
    }

    pub fn list_categories(&self) -> Resolved {
        self.list(OptionKind::Category, None)
    }

    pub fn list_departments(&self) -> Resolved {
        self.list(OptionKind::Department, None)
    }

    pub fn list_subcategories(&self, category: &str) -> Resolved {
        self.list(OptionKind::SubCategory, Some(category))
    }

    /// Lists options from the store, or from the built-in tables if the store
    /// fails.
    pub fn list(&self, kind: OptionKind, parent: Option<&str>) -> Resolved {
        match self.store.list(kind, parent) {
            Ok(options) => Resolved {
                options,
                origin: OptionOrigin::Store,
            },
            Err(e) => {
                tracing::warn!(
                    kind = %kind,
                    parent = parent.unwrap_or_default(),
                    error = %e,
                    "Option store unavailable, serving built-in taxonomy"
                );
                Resolved {
                    options: self.fallback.list(kind, parent).unwrap_or_default(),
                    origin: OptionOrigin::Builtin,
                }
            }
        }
    }

    pub fn list_all(&self) -> Resolved {
        match self.store.list_all() {
            Ok(options) => Resolved {
                options,
                origin: OptionOrigin::Store,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Option store unavailable, serving built-in taxonomy");
                Resolved {
                    options: self.fallback.list_all().unwrap_or_default(),
                    origin: OptionOrigin::Builtin,
                }
            }
        }
    }

    /// Lists options from the store only. Errors are returned to the caller.
    pub fn store_list(
        &self,
        kind: OptionKind,
        parent: Option<&str>,
    ) -> Result<Vec<TaxonomyOption>> {
        self.store.list(kind, parent)
    }

    pub fn derive_priority(&self, category: &str, sub_category: &str) -> Priority {
        derive_priority(category, sub_category)
    }
}
