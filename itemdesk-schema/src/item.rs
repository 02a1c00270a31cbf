use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle marker carried by every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::Active, ItemStatus::Inactive, ItemStatus::Pending];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Inactive => "inactive",
            ItemStatus::Pending => "pending",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == name)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item as returned by every read or write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip_through_lookup() {
        for status in ItemStatus::ALL {
            assert_eq!(ItemStatus::from_name(status.as_str()), Some(status));
        }
        assert_eq!(ItemStatus::from_name("archived"), None);
        assert_eq!(ItemStatus::from_name("Active"), None);
    }

    #[test]
    fn status_defaults_to_active_and_serializes_lowercase() {
        assert_eq!(ItemStatus::default(), ItemStatus::Active);
        assert_eq!(
            serde_json::to_string(&ItemStatus::Pending).unwrap(),
            r#""pending""#
        );
    }
}
