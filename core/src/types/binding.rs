use std::fmt;
use std::sync::Arc;

/// Icon shown next to symbol candidates.
pub const SYMBOL_ICON: i32 = 124;
/// Icon shown next to structure and structure member candidates.
pub const STRUCT_ICON: i32 = 52;
/// Icon shown next to enum and enum member candidates.
pub const ENUM_ICON: i32 = 1110;

/// Host side effect run when a candidate is selected.
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// What kind of host entity a candidate was collected from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Action,
    Symbol,
    Struct,
    StructMember,
    Enum,
    EnumMember,
    #[default]
    Custom,
}

/// Opaque action handle stored per catalog entry.
///
/// Cloning shares the underlying action.
#[derive(Clone)]
pub struct CommandBinding {
    action: Action,
    description: Option<String>,
    icon_id: Option<i32>,
    kind: CandidateKind,
}

impl CommandBinding {
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self::from_action(Arc::new(action))
    }

    pub fn from_action(action: Action) -> Self {
        Self {
            action,
            description: None,
            icon_id: None,
            kind: CandidateKind::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon_id: i32) -> Self {
        self.icon_id = Some(icon_id);
        self
    }

    pub fn with_kind(mut self, kind: CandidateKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the icon id, or `0` when none was assigned.
    pub fn icon(&self) -> i32 {
        self.icon_id.unwrap_or(0)
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Runs the bound action on the calling thread.
    pub fn execute(&self) {
        (self.action)();
    }
}

impl fmt::Debug for CommandBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBinding")
            .field("description", &self.description)
            .field("icon_id", &self.icon())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
