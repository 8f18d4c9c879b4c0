//! Candidate catalog and its builder.
//!
//! The catalog is an ordered set of unique names. Insertion order is the order
//! candidates are scored in, and the tie-break order for equal scores.

use crate::error::CatalogError;
use crate::types::{
    Action, CandidateKind, CandidateName, CommandBinding, ENUM_ICON, STRUCT_ICON, SYMBOL_ICON,
};
use indexmap::IndexMap;
use tracing::debug;

/// Immutable name -> binding mapping backing one search session.
#[derive(Debug, Clone, Default)]
pub struct CandidateCatalog {
    entries: IndexMap<CandidateName, CommandBinding>,
}

impl CandidateCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &CandidateName> + '_ {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&CandidateName, &CommandBinding)> + '_ {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CommandBinding> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

/// Collects `(name, binding)` pairs before a session starts.
///
/// Colliding names keep their first position and take the latest binding.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: IndexMap<CandidateName, CommandBinding>,
}

/// Generic insertion.
impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        binding: CommandBinding,
    ) -> Result<&mut Self, CatalogError> {
        let name = CandidateName::try_new(name.into())?;
        if let Some(previous) = self.entries.insert(name, binding) {
            debug!(kind = ?previous.kind(), "catalog name collision, replacing binding");
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> CandidateCatalog {
        debug!(candidates = self.entries.len(), "catalog built");
        CandidateCatalog {
            entries: self.entries,
        }
    }
}

/// Host entity helpers.
impl CatalogBuilder {
    /// Adds a registered UI action. `~` accelerator markers are stripped from
    /// the label ("~A~bort" becomes "Abort").
    pub fn add_action(
        &mut self,
        label: &str,
        binding: CommandBinding,
    ) -> Result<&mut Self, CatalogError> {
        let label = label.replace('~', "");
        self.insert(label, binding.with_kind(CandidateKind::Action))
    }

    /// Adds a named address, preferring the demangled form when there is one.
    pub fn add_symbol(
        &mut self,
        raw_name: &str,
        demangled: Option<&str>,
        action: Action,
    ) -> Result<&mut Self, CatalogError> {
        let name = demangled.filter(|d| !d.is_empty()).unwrap_or(raw_name);
        let binding = CommandBinding::from_action(action)
            .with_description(format!("Jump to {name}"))
            .with_icon(SYMBOL_ICON)
            .with_kind(CandidateKind::Symbol);
        self.insert(name, binding)
    }

    pub fn add_struct(&mut self, name: &str, action: Action) -> Result<&mut Self, CatalogError> {
        let binding = CommandBinding::from_action(action)
            .with_description(format!("Jump to Structure definition of {name}"))
            .with_icon(STRUCT_ICON)
            .with_kind(CandidateKind::Struct);
        self.insert(name, binding)
    }

    /// `full_name` is the qualified member name, e.g. `"stat.st_size"`.
    pub fn add_struct_member(
        &mut self,
        full_name: &str,
        action: Action,
    ) -> Result<&mut Self, CatalogError> {
        let binding = CommandBinding::from_action(action)
            .with_description(format!("Jump to Structure member definition of {full_name}"))
            .with_icon(STRUCT_ICON)
            .with_kind(CandidateKind::StructMember);
        self.insert(full_name, binding)
    }

    pub fn add_enum(&mut self, name: &str, action: Action) -> Result<&mut Self, CatalogError> {
        let binding = CommandBinding::from_action(action)
            .with_description(format!("Jump to Enum definition of {name}"))
            .with_icon(ENUM_ICON)
            .with_kind(CandidateKind::Enum);
        self.insert(name, binding)
    }

    /// Members are keyed as `"{enum_name}.{member}"`.
    pub fn add_enum_member(
        &mut self,
        enum_name: &str,
        member: &str,
        action: Action,
    ) -> Result<&mut Self, CatalogError> {
        let name = format!("{enum_name}.{member}");
        let binding = CommandBinding::from_action(action)
            .with_description(format!("Jump to Enum member definition of {name}"))
            .with_icon(ENUM_ICON)
            .with_kind(CandidateKind::EnumMember);
        self.insert(name, binding)
    }
}

impl FromIterator<(CandidateName, CommandBinding)> for CandidateCatalog {
    fn from_iter<I: IntoIterator<Item = (CandidateName, CommandBinding)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
