//! Goal repository
//!
//! Storage seam for goal definitions. The in-memory implementation keeps the
//! whole collection behind one lock; `modify` runs the caller's
//! read-modify-write under the write lock so version checks are atomic.

use parking_lot::RwLock;
use shared::models::GoalDefinition;
use shared::util::now_millis;
use std::collections::HashMap;

use crate::utils::{AppError, AppResult};

/// Goal storage
pub trait GoalRepository: Send + Sync {
    fn find_all(&self) -> Vec<GoalDefinition>;

    fn find_by_id(&self, id: i64) -> Option<GoalDefinition>;

    fn insert(&self, goal: GoalDefinition) -> GoalDefinition;

    /// Apply `f` to a working copy and persist it when `f` succeeds
    ///
    /// On success the version is bumped and `updated_at` refreshed. On error
    /// the stored goal is left untouched.
    fn modify(
        &self,
        id: i64,
        f: &mut dyn FnMut(&mut GoalDefinition) -> AppResult<()>,
    ) -> AppResult<GoalDefinition>;

    /// `true` if a goal was removed
    fn delete(&self, id: i64) -> bool;
}

/// In-memory goal storage
#[derive(Debug, Default)]
pub struct MemoryGoalRepository {
    goals: RwLock<HashMap<i64, GoalDefinition>>,
}

impl MemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.goals.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.read().is_empty()
    }
}

impl GoalRepository for MemoryGoalRepository {
    fn find_all(&self) -> Vec<GoalDefinition> {
        self.goals.read().values().cloned().collect()
    }

    fn find_by_id(&self, id: i64) -> Option<GoalDefinition> {
        self.goals.read().get(&id).cloned()
    }

    fn insert(&self, goal: GoalDefinition) -> GoalDefinition {
        self.goals.write().insert(goal.id, goal.clone());
        goal
    }

    fn modify(
        &self,
        id: i64,
        f: &mut dyn FnMut(&mut GoalDefinition) -> AppResult<()>,
    ) -> AppResult<GoalDefinition> {
        let mut goals = self.goals.write();
        let stored = goals.get_mut(&id).ok_or_else(|| AppError::goal_not_found(id))?;

        let mut working = stored.clone();
        f(&mut working)?;
        working.version = stored.version + 1;
        working.updated_at = now_millis();
        *stored = working.clone();
        Ok(working)
    }

    fn delete(&self, id: i64) -> bool {
        self.goals.write().remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;
    use chrono::NaiveDate;
    use shared::models::{DataEntryRole, GoalFamily, GoalKind, GoalScope, GoalStatus};
    use std::collections::BTreeSet;

    fn goal(id: i64) -> GoalDefinition {
        GoalDefinition {
            id,
            manager_id: "m1".to_string(),
            family: GoalFamily::Challenge,
            title: "Accessoires".to_string(),
            description: None,
            scope: GoalScope::Collective,
            seller_id: None,
            visible: true,
            visible_to_sellers: BTreeSet::new(),
            kind: GoalKind::ProductFocus {
                product_name: "Ceinture".to_string(),
            },
            target_value: 100.0,
            unit: "pièces".to_string(),
            data_entry_responsible: DataEntryRole::Seller,
            current_value: 0.0,
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
            status: GoalStatus::InProgress,
            version: 1,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_modify_bumps_version() {
        let repo = MemoryGoalRepository::new();
        repo.insert(goal(1));
        let updated = repo
            .modify(1, &mut |g| {
                g.current_value = 42.0;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(repo.find_by_id(1).unwrap().current_value, 42.0);
    }

    #[test]
    fn test_failed_modify_leaves_goal_untouched() {
        let repo = MemoryGoalRepository::new();
        repo.insert(goal(1));
        let result = repo.modify(1, &mut |g| {
            g.current_value = 99.0;
            Err(AppError::validation("nope"))
        });
        assert!(result.is_err());
        let stored = repo.find_by_id(1).unwrap();
        assert_eq!(stored.current_value, 0.0);
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn test_modify_missing() {
        let repo = MemoryGoalRepository::new();
        let err = repo.modify(7, &mut |_| Ok(())).unwrap_err();
        assert_eq!(err.code, ErrorCode::GoalNotFound);
    }

    #[test]
    fn test_delete() {
        let repo = MemoryGoalRepository::new();
        repo.insert(goal(1));
        assert!(repo.delete(1));
        assert!(!repo.delete(1));
        assert!(repo.is_empty());
    }
}
