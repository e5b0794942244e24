use serde::{Deserialize, Serialize};

use crate::errors::CompassError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<DailyTask>,
}

impl Default for TaskList {
    fn default() -> Self {
        let seed = [
            (1, "Solve 2 LeetCode problems (Easy)", true),
            (2, "Watch a tutorial on React custom hooks", true),
            (3, "Read a chapter of \"Clean Code\"", false),
            (4, "Work on portfolio project for 1 hour", false),
        ];
        Self {
            tasks: seed
                .into_iter()
                .map(|(id, text, completed)| DailyTask { id, text: text.into(), completed })
                .collect(),
        }
    }
}

impl TaskList {
    pub fn empty() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn tasks(&self) -> &[DailyTask] {
        &self.tasks
    }

    pub fn completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Share of completed tasks in percent; 0 for an empty list.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed() as f64 / self.tasks.len() as f64 * 100.0
    }

    pub fn add(&self, text: &str, now_ms: i64) -> Result<Self, CompassError> {
        if text.trim().is_empty() {
            return Err(CompassError::Validation {
                field: "text".into(),
                message: "Task cannot be empty.".into(),
            });
        }
        let id = match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        };
        let mut tasks = self.tasks.clone();
        tasks.push(DailyTask { id, text: text.to_string(), completed: false });
        Ok(Self { tasks })
    }

    pub fn toggle(&self, id: i64) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| if t.id == id { DailyTask { completed: !t.completed, ..t.clone() } } else { t.clone() })
                .collect(),
        }
    }

    pub fn remove(&self, id: i64) -> Self {
        Self { tasks: self.tasks.iter().filter(|t| t.id != id).cloned().collect() }
    }

    /// Blank replacement text is ignored.
    pub fn edit(&self, id: i64, text: &str) -> Self {
        if text.trim().is_empty() {
            return self.clone();
        }
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| if t.id == id { DailyTask { text: text.to_string(), ..t.clone() } } else { t.clone() })
                .collect(),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_list_is_half_done() {
        let list = TaskList::default();
        assert_eq!(list.tasks().len(), 4);
        assert_eq!(list.progress(), 50.0);
        assert_eq!(TaskList::empty().progress(), 0.0);
    }

    #[test]
    fn add_rejects_blank_and_appends_incomplete() {
        let list = TaskList::empty();
        assert!(matches!(list.add("  ", 1), Err(CompassError::Validation { .. })));
        let list = list.add("Mock interview", 1_700_000_000_000).unwrap();
        assert_eq!(list.tasks()[0].id, 1_700_000_000_000);
        assert!(!list.tasks()[0].completed);
        let list = list.add("Second", 1_700_000_000_000).unwrap();
        assert_eq!(list.tasks()[1].id, 1_700_000_000_001);
    }

    #[test]
    fn toggle_edit_remove_touch_only_target() {
        let list = TaskList::default();
        let toggled = list.toggle(3);
        assert!(toggled.tasks()[2].completed);
        assert_eq!(toggled.tasks()[0], list.tasks()[0]);

        let edited = toggled.edit(4, "Ship portfolio v2");
        assert_eq!(edited.tasks()[3].text, "Ship portfolio v2");
        assert_eq!(edited.edit(4, "   "), edited);

        let removed = edited.remove(1);
        assert!(!removed.contains(1));
        assert_eq!(removed.tasks().len(), 3);
        assert_eq!(removed.remove(99), removed);
    }

    #[test]
    fn serializes_as_plain_array() {
        let v = serde_json::to_value(TaskList::default()).unwrap();
        assert!(v.is_array());
        assert_eq!(v[0]["text"], "Solve 2 LeetCode problems (Easy)");
    }
}
