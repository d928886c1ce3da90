//! Category records used for browsing.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A browsable product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name; catalog items refer to categories by this name.
    pub name: String,
    /// Icon name for the sidebar.
    pub icon: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}
