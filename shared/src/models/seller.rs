//! Seller Model
//!
//! Owned by the account service; goal tracking only reads it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub email: String,
    pub manager_id: String,
}
