use crate::entity::DashboardEntity;
use bizdash_config::ViewId;
use bizdash_core::{
    db::aggregate::{KpiPredicate, KpiSpec},
    prelude::*,
};
use serde::{Deserialize, Serialize};

///
/// TaskStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusKind for TaskStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

///
/// TaskPriority
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

///
/// Task
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project: String,
    pub assignee: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<Date>,
    pub status: TaskStatus,
}

impl Task {
    /// Completion toggle used by the task list checkbox. Returns the
    /// updated copy; the original is left as is.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let status = match self.status {
            TaskStatus::Completed => TaskStatus::Todo,
            _ => TaskStatus::Completed,
        };

        Self {
            status,
            ..self.clone()
        }
    }
}

static FIELDS: [FieldModel; 7] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("title", FieldKind::Text),
    FieldModel::new("project", FieldKind::Text),
    FieldModel::new("assignee", FieldKind::Text),
    FieldModel::new("priority", FieldKind::Enum),
    FieldModel::new("due_date", FieldKind::Date),
    FieldModel::new("status", FieldKind::Enum),
];

pub static TASK_MODEL: RecordModel = RecordModel {
    path: "bizdash::entity::Task",
    entity_name: "task",
    primary_key: &FIELDS[0],
    fields: &FIELDS,
    searchable: &["title", "project", "assignee"],
    overdue_label: "overdue",
};

impl FieldValues for Task {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.title.as_str()),
            2 => Value::from(self.project.as_str()),
            3 => Value::from(self.assignee.as_str()),
            4 => Value::Enum(self.priority.as_str()),
            5 => Value::from(self.due_date),
            6 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for Task {
    type Status = TaskStatus;

    const MODEL: &'static RecordModel = &TASK_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        self.due_date
    }
}

impl DashboardEntity for Task {
    const VIEW: ViewId = ViewId::Tasks;

    fn default_kpis() -> Vec<KpiSpec<TaskStatus>> {
        let open = || KpiPredicate::status_not_in([TaskStatus::Completed, TaskStatus::Cancelled]);

        vec![
            KpiSpec::count("count"),
            KpiSpec::count_where("open_count", open()),
            KpiSpec::count_where(
                "completed_count",
                KpiPredicate::status_in([TaskStatus::Completed]),
            ),
            KpiSpec::count_where(
                "overdue_count",
                KpiPredicate::status_in([EffectiveStatus::Overdue]),
            ),
            KpiSpec::count_where(
                "due_soon_count",
                KpiPredicate::status_in([EffectiveStatus::DueSoon]),
            ),
            KpiSpec::count_where(
                "high_priority_open_count",
                KpiPredicate::And(vec![open(), KpiPredicate::field_eq("priority", "high")]),
            ),
        ]
    }
}
