//! Outbound invocations and inbound completion messages.
//!
//! Every request leaving the core carries the `ContextId` of the context
//! that issued it. The matching `Completion` echoes that id back so the app
//! can drop results for contexts that have since closed.

use std::fmt;

use uuid::Uuid;

use crate::model::{CategoryId, DataSnapshot, DuplicateGroup, FilterId, GroupId, TransactionId};
use crate::picker::Patch;

/// Identity of one live context instance.
///
/// A fresh id is minted every time a context is constructed, so a reopened
/// picker never matches completions addressed to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to correlate log lines.
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

/// A structured call into a business collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    LoadSnapshot,
    SetCategory {
        transaction: TransactionId,
        category: CategoryId,
    },
    PersistTagPatch {
        transaction: TransactionId,
        patch: Patch,
    },
    CreateCategory {
        name: String,
    },
    RenameCategory {
        category: CategoryId,
        name: String,
    },
    DeleteCategory {
        category: CategoryId,
    },
    RunDedupScan,
    /// `keep: None` keeps every member of the group.
    ResolveDuplicate {
        group: GroupId,
        keep: Option<TransactionId>,
    },
    SuggestCategories {
        transaction: TransactionId,
    },
    ApplySavedFilter {
        filter: FilterId,
    },
    ResetData,
}

impl Invocation {
    pub fn kind(&self) -> InvocationKind {
        match self {
            Self::LoadSnapshot => InvocationKind::LoadSnapshot,
            Self::SetCategory { .. } => InvocationKind::SetCategory,
            Self::PersistTagPatch { .. } => InvocationKind::PersistTagPatch,
            Self::CreateCategory { .. } => InvocationKind::CreateCategory,
            Self::RenameCategory { .. } => InvocationKind::RenameCategory,
            Self::DeleteCategory { .. } => InvocationKind::DeleteCategory,
            Self::RunDedupScan => InvocationKind::RunDedupScan,
            Self::ResolveDuplicate { .. } => InvocationKind::ResolveDuplicate,
            Self::SuggestCategories { .. } => InvocationKind::SuggestCategories,
            Self::ApplySavedFilter { .. } => InvocationKind::ApplySavedFilter,
            Self::ResetData => InvocationKind::ResetData,
        }
    }
}

/// Payload-free tag of an `Invocation`, echoed in its `Completion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationKind {
    LoadSnapshot,
    SetCategory,
    PersistTagPatch,
    CreateCategory,
    RenameCategory,
    DeleteCategory,
    RunDedupScan,
    ResolveDuplicate,
    SuggestCategories,
    ApplySavedFilter,
    ResetData,
}

impl InvocationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::LoadSnapshot => "load_snapshot",
            Self::SetCategory => "set_category",
            Self::PersistTagPatch => "persist_tag_patch",
            Self::CreateCategory => "create_category",
            Self::RenameCategory => "rename_category",
            Self::DeleteCategory => "delete_category",
            Self::RunDedupScan => "run_dedup_scan",
            Self::ResolveDuplicate => "resolve_duplicate",
            Self::SuggestCategories => "suggest_categories",
            Self::ApplySavedFilter => "apply_saved_filter",
            Self::ResetData => "reset_data",
        }
    }

    /// Status text shown when the collaborator reports success without a
    /// message of its own. `None` means the success is silent.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Self::LoadSnapshot | Self::SuggestCategories => None,
            Self::SetCategory => Some("Category applied"),
            Self::PersistTagPatch => Some("Tags updated"),
            Self::CreateCategory => Some("Category created"),
            Self::RenameCategory => Some("Category renamed"),
            Self::DeleteCategory => Some("Category deleted"),
            Self::RunDedupScan => Some("Duplicate scan finished"),
            Self::ResolveDuplicate => Some("Duplicate group resolved"),
            Self::ApplySavedFilter => Some("Filter applied"),
            Self::ResetData => Some("Data reset"),
        }
    }

    /// Short verb phrase used in failure messages ("Failed to ...").
    pub fn describe(self) -> &'static str {
        match self {
            Self::LoadSnapshot => "load data",
            Self::SetCategory => "apply category",
            Self::PersistTagPatch => "update tags",
            Self::CreateCategory => "create category",
            Self::RenameCategory => "rename category",
            Self::DeleteCategory => "delete category",
            Self::RunDedupScan => "scan for duplicates",
            Self::ResolveDuplicate => "resolve duplicates",
            Self::SuggestCategories => "fetch suggestions",
            Self::ApplySavedFilter => "apply filter",
            Self::ResetData => "reset data",
        }
    }
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An invocation addressed from a specific context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub context: ContextId,
    pub invocation: Invocation,
}

impl Request {
    pub fn new(context: ContextId, invocation: Invocation) -> Self {
        Self {
            context,
            invocation,
        }
    }
}

/// Successful result data carried by a `Completion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Snapshot(DataSnapshot),
    Suggestions(Vec<CategoryId>),
    Duplicates(Vec<DuplicateGroup>),
    Done(String),
}

/// The result of one `Request`, re-entering the event queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: ContextId,
    pub kind: InvocationKind,
    pub result: Result<Payload, String>,
}

impl Completion {
    pub fn ok(request: &Request, payload: Payload) -> Self {
        Self {
            context: request.context,
            kind: request.invocation.kind(),
            result: Ok(payload),
        }
    }

    pub fn failed(request: &Request, error: impl Into<String>) -> Self {
        Self {
            context: request.context,
            kind: request.invocation.kind(),
            result: Err(error.into()),
        }
    }
}
