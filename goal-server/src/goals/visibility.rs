//! Visibility Resolver
//!
//! Which goals a seller sees. Pure functions over a goal slice; input order
//! is preserved.

use shared::models::{GoalDefinition, GoalScope, Seller};

/// Whether one goal is shown to `seller_id`
pub fn is_visible_to(goal: &GoalDefinition, seller_id: &str) -> bool {
    if !goal.visible {
        return false;
    }
    match goal.scope {
        GoalScope::Individual => goal.seller_id.as_deref() == Some(seller_id),
        GoalScope::Collective => {
            goal.visible_to_sellers.is_empty() || goal.visible_to_sellers.contains(seller_id)
        }
    }
}

/// Goals shown to `seller_id`
pub fn visible_goals_for<'a>(
    seller_id: &str,
    goals: &'a [GoalDefinition],
) -> Vec<&'a GoalDefinition> {
    goals.iter().filter(|g| is_visible_to(g, seller_id)).collect()
}

/// Goals shown to a seller, restricted to their manager's goals
pub fn visible_goals_for_seller<'a>(
    seller: &Seller,
    goals: &'a [GoalDefinition],
) -> Vec<&'a GoalDefinition> {
    goals
        .iter()
        .filter(|g| g.manager_id == seller.manager_id && is_visible_to(g, &seller.id))
        .collect()
}
