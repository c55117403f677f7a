// File: ./src/model/item.rs
use crate::model::source::ReminderOffset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use strum::{Display, EnumString};

pub const DEFAULT_NAMESPACE_TITLE: &str = "Migrated from TickTick";

/// Kind of link between two tasks. Only parent links are produced by the importer.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RelationKind {
    ParentTask,
}

/// A relation target that only knows the source identifier. The persistence
/// layer swaps it for a real task once ids have been assigned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskStub {
    pub id: i64,
}

pub type RelatedTaskMap = BTreeMap<RelationKind, Vec<TaskStub>>;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub title: String,
}

impl Label {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier from the source system, kept so parent stubs can be resolved.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub labels: Vec<Label>,
    /// Opaque sort key, never renumbered.
    pub position: i64,
    pub done: bool,
    pub done_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_tasks: Option<RelatedTaskMap>,
}

impl Task {
    pub fn parent_id(&self) -> Option<i64> {
        self.related_tasks
            .as_ref()?
            .get(&RelationKind::ParentTask)?
            .first()
            .map(|stub| stub.id)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub title: String,
    pub tasks: Vec<Task>,
}

impl List {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tasks: Vec::new(),
        }
    }
}

/// Root of one import. Every conversion produces exactly one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub title: String,
    pub lists: Vec<List>,
}

impl Namespace {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lists: Vec::new(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|l| l.tasks.len()).sum()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.lists.iter().flat_map(|l| l.tasks.iter())
    }

    /// Parent ids referenced by some task but not carried by any task in this
    /// namespace, in first-seen order.
    pub fn dangling_parent_ids(&self) -> Vec<i64> {
        let known: HashSet<i64> = self.tasks().map(|t| t.id).collect();
        let mut seen = HashSet::new();
        self.tasks()
            .filter_map(Task::parent_id)
            .filter(|id| !known.contains(id) && seen.insert(*id))
            .collect()
    }
}
