//! Seller directory
//!
//! Sellers are owned by the account service. This keeps the last record
//! pushed for each seller so goal visibility can be scoped to their manager.

use dashmap::DashMap;
use shared::models::Seller;

use crate::utils::{AppError, AppResult, ErrorCode};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, Violations};

#[derive(Debug, Default)]
pub struct SellerDirectory {
    sellers: DashMap<String, Seller>,
}

impl SellerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a seller record
    pub fn upsert(&self, seller: Seller) -> AppResult<Seller> {
        let mut v = Violations::new();
        v.required_text(&seller.id, "id", MAX_SHORT_TEXT_LEN);
        v.required_text(&seller.name, "name", MAX_NAME_LEN);
        v.required_text(&seller.manager_id, "manager_id", MAX_SHORT_TEXT_LEN);
        v.into_result()?;

        tracing::debug!(seller_id = %seller.id, manager_id = %seller.manager_id, "Seller upserted");
        self.sellers.insert(seller.id.clone(), seller.clone());
        Ok(seller)
    }

    pub fn get(&self, seller_id: &str) -> AppResult<Seller> {
        self.sellers
            .get(seller_id)
            .map(|s| s.clone())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::SellerNotFound,
                    format!("Seller {} not found", seller_id),
                )
                .with_detail("seller_id", seller_id)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            manager_id: "m1".to_string(),
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let dir = SellerDirectory::new();
        dir.upsert(seller("s1")).unwrap();
        assert_eq!(dir.get("s1").unwrap().manager_id, "m1");
        assert_eq!(dir.get("s2").unwrap_err().code, ErrorCode::SellerNotFound);
    }

    #[test]
    fn test_upsert_requires_manager() {
        let dir = SellerDirectory::new();
        let mut s = seller("s1");
        s.manager_id = String::new();
        assert!(dir.upsert(s).is_err());
        assert!(dir.get("s1").is_err());
    }
}
