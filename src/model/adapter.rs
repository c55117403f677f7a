// File: src/model/adapter.rs
// Field mapping from TickTick records to destination tasks.
use crate::model::item::{Label, RelatedTaskMap, RelationKind, Task, TaskStub};
use crate::model::source::TickTickTask;

impl Task {
    /// Maps one raw record. The mapping is total: every record yields a task.
    pub fn from_ticktick(raw: &TickTickTask) -> Self {
        let done = raw.is_completed();
        let mut task = Task {
            id: raw.task_id,
            title: raw.title.clone(),
            description: raw.content.clone(),
            start_date: raw.start_date,
            // The source only knows one deadline, so end and due are the same instant.
            end_date: raw.due_date,
            due_date: raw.due_date,
            labels: raw.tags.iter().map(Label::new).collect(),
            position: raw.order,
            done,
            done_at: if done { raw.completed_time } else { None },
            reminder: raw.reminder.clone(),
            repeat: raw.repeat.clone(),
            related_tasks: None,
        };
        task.attach_parent(raw.parent_id);
        task
    }

    /// Records `parent_id` as a parent-task stub. Zero means no parent and leaves
    /// the relation map absent. The id is not checked against known tasks.
    pub fn attach_parent(&mut self, parent_id: i64) {
        if parent_id == 0 {
            return;
        }
        let mut related = RelatedTaskMap::new();
        related.insert(RelationKind::ParentTask, vec![TaskStub { id: parent_id }]);
        self.related_tasks = Some(related);
    }
}

impl From<&TickTickTask> for Task {
    fn from(raw: &TickTickTask) -> Self {
        Task::from_ticktick(raw)
    }
}
