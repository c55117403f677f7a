// File: ./src/convert.rs
//! Turns the flat TickTick record sequence into a single namespace tree.
//!
//! Records are grouped by list name first, then each member is mapped and
//! gets its parent stub. Children stay flat inside their list; only the
//! parent-task stub expresses the hierarchy.

use crate::model::{List, Namespace, Task, TickTickTask};
use std::collections::HashMap;

/// Groups records by exact list name. Groups come out in order of first
/// appearance and members keep their relative input order.
pub fn group_by_list(tasks: &[TickTickTask]) -> Vec<(&str, Vec<&TickTickTask>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&TickTickTask>)> = Vec::new();

    for task in tasks {
        let name = task.list_name.as_str();
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(task);
    }

    groups
}

/// Converts an export into one namespace titled `namespace_title`.
///
/// Empty input still yields a namespace, with no lists.
pub fn convert_ticktick_tasks(tasks: &[TickTickTask], namespace_title: &str) -> Namespace {
    let mut namespace = Namespace::new(namespace_title);

    for (name, members) in group_by_list(tasks) {
        let mut list = List::new(name);
        list.tasks = members.into_iter().map(Task::from_ticktick).collect();
        log::debug!("List '{}': {} tasks", list.title, list.tasks.len());
        namespace.lists.push(list);
    }

    namespace
}
