// File: tests/ticktick_conversion.rs
use chrono::{DateTime, Utc};
use tickport::convert_ticktick_tasks;
use tickport::model::{
    DEFAULT_NAMESPACE_TITLE, Label, RelatedTaskMap, RelationKind, ReminderOffset, TaskStub,
    TickTickTask,
};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn sample_tasks() -> Vec<TickTickTask> {
    let time1 = ts("2022-11-18T03:00:00.4770000Z");
    let time2 = ts("2022-12-18T03:00:00.4770000Z");
    let time3 = ts("2022-12-10T03:00:00.4770000Z");
    let day = ReminderOffset::from_minutes(24 * 60);

    let mut t1 = TickTickTask::new(1, "List 1", "Test task 1");
    t1.tags = vec!["label1".into(), "label2".into()];
    t1.content = "Lorem Ipsum Dolor sit amet".into();
    t1.start_date = Some(time1);
    t1.due_date = Some(time2);
    t1.reminder = Some(day.clone());
    t1.repeat = Some("FREQ=WEEKLY;INTERVAL=1;UNTIL=20190117T210000Z".into());
    t1.status = "0".into();
    t1.order = -1099511627776;

    let mut t2 = TickTickTask::new(2, "List 1", "Test task 2");
    t2.parent_id = 1;
    t2.status = "1".into();
    t2.completed_time = Some(time3);
    t2.order = -1099511626;

    let mut t3 = TickTickTask::new(3, "List 1", "Test task 3");
    t3.tags = vec!["label1".into(), "label2".into(), "other label".into()];
    t3.start_date = Some(time1);
    t3.due_date = Some(time2);
    t3.reminder = Some(day);
    t3.status = "0".into();
    t3.order = -109951627776;

    let mut t4 = TickTickTask::new(4, "List 2", "Test task 4");
    t4.status = "0".into();
    t4.order = -109951627777;

    vec![t1, t2, t3, t4]
}

#[test]
fn test_convert_ticktick_export() {
    let raw = sample_tasks();
    let ns = convert_ticktick_tasks(&raw, DEFAULT_NAMESPACE_TITLE);

    assert_eq!(ns.title, DEFAULT_NAMESPACE_TITLE);
    assert_eq!(ns.lists.len(), 2);

    let first = &ns.lists[0];
    assert_eq!(first.title, raw[0].list_name);
    assert_eq!(first.tasks.len(), 3);

    let task = &first.tasks[0];
    assert_eq!(task.title, raw[0].title);
    assert_eq!(task.description, raw[0].content);
    assert_eq!(task.start_date, raw[0].start_date);
    assert_eq!(task.end_date, raw[0].due_date);
    assert_eq!(task.due_date, raw[0].due_date);
    assert_eq!(task.labels, vec![Label::new("label1"), Label::new("label2")]);
    assert_eq!(task.position, raw[0].order);
    assert!(!task.done);
    assert!(task.related_tasks.is_none());

    let task = &first.tasks[1];
    assert_eq!(task.title, raw[1].title);
    assert_eq!(task.position, raw[1].order);
    assert!(task.done);
    assert_eq!(task.done_at, raw[1].completed_time);
    let mut expected = RelatedTaskMap::new();
    expected.insert(
        RelationKind::ParentTask,
        vec![TaskStub {
            id: raw[1].parent_id,
        }],
    );
    assert_eq!(task.related_tasks, Some(expected));

    let task = &first.tasks[2];
    assert_eq!(task.title, raw[2].title);
    assert_eq!(task.description, raw[2].content);
    assert_eq!(task.start_date, raw[2].start_date);
    assert_eq!(task.end_date, raw[2].due_date);
    assert_eq!(task.due_date, raw[2].due_date);
    assert_eq!(
        task.labels,
        vec![
            Label::new("label1"),
            Label::new("label2"),
            Label::new("other label")
        ]
    );
    assert_eq!(task.position, raw[2].order);
    assert!(!task.done);

    let second = &ns.lists[1];
    assert_eq!(second.title, raw[3].list_name);
    assert_eq!(second.tasks.len(), 1);
    assert_eq!(second.tasks[0].title, raw[3].title);
    assert_eq!(second.tasks[0].position, raw[3].order);
}

#[test]
fn test_interleaved_lists_keep_first_seen_order() {
    let raw = vec![
        TickTickTask::new(10, "Groceries", "Milk"),
        TickTickTask::new(11, "Work", "Report"),
        TickTickTask::new(12, "Groceries", "Eggs"),
        TickTickTask::new(13, "Home", "Vacuum"),
        TickTickTask::new(14, "Work", "Email"),
    ];
    let ns = convert_ticktick_tasks(&raw, "Import");

    let titles: Vec<&str> = ns.lists.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Groceries", "Work", "Home"]);

    let work: Vec<&str> = ns.lists[1].tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(work, vec!["Report", "Email"]);
    assert_eq!(ns.task_count(), raw.len());
}

#[test]
fn test_child_before_parent_stays_flat() {
    let mut child = TickTickTask::new(2, "List", "Child");
    child.parent_id = 1;
    let parent = TickTickTask::new(1, "List", "Parent");

    let ns = convert_ticktick_tasks(&[child, parent], "Import");
    assert_eq!(ns.lists.len(), 1);
    let tasks = &ns.lists[0].tasks;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Child");
    assert_eq!(tasks[0].parent_id(), Some(1));
    assert_eq!(tasks[1].parent_id(), None);
    assert!(ns.dangling_parent_ids().is_empty());
}

#[test]
fn test_dangling_parent_passes_through() {
    let mut orphan = TickTickTask::new(5, "List", "Orphan");
    orphan.parent_id = 404;

    let ns = convert_ticktick_tasks(&[orphan], "Import");
    assert_eq!(ns.lists[0].tasks[0].parent_id(), Some(404));
    assert_eq!(ns.dangling_parent_ids(), vec![404]);
}

#[test]
fn test_non_completed_statuses() {
    let mut archived = TickTickTask::new(1, "List", "Archived");
    archived.status = "2".into();
    archived.completed_time = Some(ts("2022-12-10T03:00:00Z"));
    let mut odd = TickTickTask::new(2, "List", "Odd");
    odd.status = "done".into();

    let ns = convert_ticktick_tasks(&[archived, odd], "Import");
    for task in ns.tasks() {
        assert!(!task.done, "{} should not be done", task.title);
        assert_eq!(task.done_at, None);
    }
}

#[test]
fn test_conversion_is_deterministic() {
    let raw = sample_tasks();
    let a = convert_ticktick_tasks(&raw, "Import");
    let b = convert_ticktick_tasks(&raw, "Import");
    assert_eq!(a, b);
}

#[test]
fn test_serialized_shape() {
    let ns = convert_ticktick_tasks(&sample_tasks(), DEFAULT_NAMESPACE_TITLE);
    let json = serde_json::to_value(&ns).unwrap();

    assert_eq!(json["title"], DEFAULT_NAMESPACE_TITLE);
    let first = &json["lists"][0]["tasks"][0];
    assert_eq!(first["reminder"], "P1D");
    assert_eq!(first["repeat"], "FREQ=WEEKLY;INTERVAL=1;UNTIL=20190117T210000Z");
    assert!(first.get("related_tasks").is_none());

    let child = &json["lists"][0]["tasks"][1];
    assert_eq!(child["related_tasks"]["parent-task"][0]["id"], 1);
    assert_eq!(child["done"], true);
}
