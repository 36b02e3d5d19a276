// src/task/query.rs — Task query engine: filtering and sorting

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Priority, Status, Task};

/// Status facet of the filter bar. Unknown values deserialize as `All`
/// so stale UI state degrades to "show everything" instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl From<String> for StatusFilter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl StatusFilter {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => task.status == Status::Pending,
            Self::Completed => task.status == Status::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl From<String> for PriorityFilter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl PriorityFilter {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::All,
        }
    }

    fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Low => task.priority == Priority::Low,
            Self::Medium => task.priority == Priority::Medium,
            Self::High => task.priority == Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortKey {
    #[default]
    Date,
    Priority,
    Title,
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl SortKey {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Self::Priority,
            "title" => Self::Title,
            _ => Self::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "descending" | "desc" => Self::Descending,
            _ => Self::Ascending,
        }
    }
}

impl From<String> for SortDirection {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Ephemeral filter/sort state from the UI. Not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub priority: PriorityFilter,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Counts backing the filter chips in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

/// The ordered subset of `tasks` to display: every task passing all
/// three predicates, sorted by the requested key.
///
/// Pure function of its inputs; never fails. The sort is stable, so
/// ties keep their input order and identical calls yield identical
/// output.
pub fn visible_tasks(tasks: &[Task], criteria: &Criteria) -> Vec<Task> {
    let needle = criteria.search.trim().to_lowercase();

    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| {
            criteria.status.admits(t)
                && criteria.priority.admits(t)
                && matches_search(t, &needle)
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ord = match criteria.sort_key {
            SortKey::Date => a.created_at.cmp(&b.created_at),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::Title => compare_titles(&a.title, &b.title),
        };
        match criteria.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    out
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let completed = tasks.iter().filter(|t| t.completed()).count();
    StatusCounts {
        all: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}

/// `needle` is already trimmed and lowercased. An empty term matches
/// everything; a missing description never matches a non-empty term.
fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if task.title.to_lowercase().contains(needle) {
        return true;
    }
    task.description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(needle))
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: &str, title: &str, priority: Priority, status: Status, minute: u32) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap();
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            priority,
            category: None,
            due_date: None,
            status,
            created_at: at,
            updated_at: at,
            owner_id: "u1".into(),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_keeps_everything_in_date_order() {
        let tasks = vec![
            task("b", "second", Priority::Low, Status::Pending, 2),
            task("a", "first", Priority::High, Status::Completed, 1),
        ];
        let out = visible_tasks(&tasks, &Criteria::default());
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let tasks = vec![
            task("a", "pay rent", Priority::High, Status::Pending, 1),
            task("b", "pay rent", Priority::High, Status::Completed, 2),
            task("c", "pay rent", Priority::Low, Status::Pending, 3),
            task("d", "call mum", Priority::High, Status::Pending, 4),
        ];
        let criteria = Criteria {
            status: StatusFilter::Pending,
            priority: PriorityFilter::High,
            search: "rent".into(),
            ..Criteria::default()
        };
        // only "a" passes all three predicates at once
        assert_eq!(ids(&visible_tasks(&tasks, &criteria)), vec!["a"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tasks = vec![task("a", "Buy Milk", Priority::Medium, Status::Pending, 1)];
        for term in ["milk", "MILK", "Milk"] {
            let criteria = Criteria {
                search: term.into(),
                ..Criteria::default()
            };
            assert_eq!(visible_tasks(&tasks, &criteria).len(), 1, "term {term}");
        }
    }

    #[test]
    fn test_search_covers_description_but_not_absent_one() {
        let mut with_desc = task("a", "errands", Priority::Medium, Status::Pending, 1);
        with_desc.description = Some("buy Milk at the shop".into());
        let without_desc = task("b", "errands", Priority::Medium, Status::Pending, 2);

        let criteria = Criteria {
            search: "milk".into(),
            ..Criteria::default()
        };
        let out = visible_tasks(&[with_desc, without_desc], &criteria);
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn test_priority_descending_order() {
        let tasks = vec![
            task("low", "x", Priority::Low, Status::Pending, 1),
            task("high", "x", Priority::High, Status::Pending, 2),
            task("medium", "x", Priority::Medium, Status::Pending, 3),
        ];
        let criteria = Criteria {
            sort_key: SortKey::Priority,
            direction: SortDirection::Descending,
            ..Criteria::default()
        };
        assert_eq!(ids(&visible_tasks(&tasks, &criteria)), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_priority_ties_keep_input_order() {
        let tasks = vec![
            task("a", "x", Priority::Medium, Status::Pending, 3),
            task("b", "x", Priority::Medium, Status::Pending, 1),
            task("c", "x", Priority::Medium, Status::Pending, 2),
        ];
        let criteria = Criteria {
            sort_key: SortKey::Priority,
            direction: SortDirection::Descending,
            ..Criteria::default()
        };
        assert_eq!(ids(&visible_tasks(&tasks, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let tasks = vec![
            task("b", "banana", Priority::Medium, Status::Pending, 1),
            task("a", "Apple", Priority::Medium, Status::Pending, 2),
            task("c", "Cherry", Priority::Medium, Status::Pending, 3),
        ];
        let criteria = Criteria {
            sort_key: SortKey::Title,
            ..Criteria::default()
        };
        assert_eq!(ids(&visible_tasks(&tasks, &criteria)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let tasks = vec![
            task("a", "x", Priority::Medium, Status::Pending, 1),
            task("b", "y", Priority::High, Status::Completed, 2),
        ];
        let criteria = Criteria {
            sort_key: SortKey::Priority,
            direction: SortDirection::Descending,
            ..Criteria::default()
        };
        assert_eq!(
            visible_tasks(&tasks, &criteria),
            visible_tasks(&tasks, &criteria)
        );
    }

    #[test]
    fn test_unknown_filter_strings_fall_back_to_defaults() {
        assert_eq!(StatusFilter::parse("everything"), StatusFilter::All);
        assert_eq!(PriorityFilter::parse(""), PriorityFilter::All);
        assert_eq!(SortKey::parse("due"), SortKey::Date);
        assert_eq!(StatusFilter::parse("Completed"), StatusFilter::Completed);
    }

    #[test]
    fn test_empty_task_list_is_fine() {
        assert!(visible_tasks(&[], &Criteria::default()).is_empty());
        assert_eq!(status_counts(&[]), StatusCounts::default());
    }

    #[test]
    fn test_status_counts() {
        let tasks = vec![
            task("a", "x", Priority::Low, Status::Pending, 1),
            task("b", "y", Priority::Low, Status::Completed, 2),
            task("c", "z", Priority::Low, Status::Pending, 3),
        ];
        let counts = status_counts(&tasks);
        assert_eq!(counts.all, 3);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.completed, 1);
    }
}
