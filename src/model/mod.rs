// File: ./src/model/mod.rs
pub mod adapter;
pub mod item;
pub mod source;

pub use item::{
    DEFAULT_NAMESPACE_TITLE, Label, List, Namespace, RelatedTaskMap, RelationKind, Task, TaskStub,
};
pub use source::{ReminderOffset, TickTickTask};
