//! Seed / overlay merge.

use std::collections::HashMap;

use crate::domain::{Task, TaskId};

/// Merge the seed set with the persisted overlay, keyed by id.
///
/// - 順序: seed の順 → overlay にしか無い id を overlay の順で末尾に
/// - 同じ id は overlay が勝つ（seed の位置を保ったまま置き換え）
/// - overlay 内で id が重複していたら最後のものが勝つ
pub fn merge_by_id(seed: &[Task], overlay: &[Task]) -> Vec<Task> {
    let mut merged: Vec<Task> = Vec::with_capacity(seed.len() + overlay.len());
    let mut position: HashMap<TaskId, usize> = HashMap::new();

    for task in seed.iter().chain(overlay) {
        match position.get(&task.id) {
            Some(&pos) => merged[pos] = task.clone(),
            None => {
                position.insert(task.id, merged.len());
                merged.push(task.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskDraft, TaskStatus};
    use chrono::{TimeZone, Utc};

    fn task(id: u64, name: &str) -> Task {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        Task::from_draft(TaskId::new(id), TaskDraft::new(name), at)
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn empty_overlay_yields_seed() {
        let seed = vec![task(1, "a"), task(2, "b")];
        assert_eq!(merge_by_id(&seed, &[]), seed);
    }

    #[test]
    fn overlay_wins_in_seed_position() {
        let seed = vec![task(1, "a"), task(2, "b"), task(3, "c")];
        let mut edited = task(2, "b-edited");
        edited.status = TaskStatus::Completed;

        let merged = merge_by_id(&seed, &[edited.clone()]);

        assert_eq!(names(&merged), vec!["a", "b-edited", "c"]);
        assert_eq!(merged[1], edited);
    }

    #[test]
    fn overlay_only_ids_are_appended_in_overlay_order() {
        let seed = vec![task(1, "a")];
        let overlay = vec![task(20, "x"), task(1, "a2"), task(10, "y")];

        let merged = merge_by_id(&seed, &overlay);
        assert_eq!(names(&merged), vec!["a2", "x", "y"]);
    }

    #[test]
    fn duplicate_overlay_ids_keep_last() {
        let overlay = vec![task(5, "first"), task(5, "second")];
        let merged = merge_by_id(&[], &overlay);
        assert_eq!(names(&merged), vec!["second"]);
    }

    #[test]
    fn ids_are_unique_after_merge() {
        let seed = vec![task(1, "a"), task(2, "b")];
        let overlay = vec![task(2, "b"), task(1, "a"), task(3, "c"), task(3, "c")];
        let merged = merge_by_id(&seed, &overlay);

        let ids: std::collections::HashSet<_> = merged.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), merged.len());
        assert_eq!(merged.len(), 3);
    }
}
