use crate::models::auth::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// A single note as returned to its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List entry -- the owner is implied by the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct NoteSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Ordering of a note listing by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than exactly "asc" or "desc" falls back to ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Pagination window for a note listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortOrder,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            sort: SortOrder::Asc,
        }
    }
}

impl Page {
    /// Build a page from raw query-string values.
    ///
    /// Missing, non-numeric and negative numbers fall back to the defaults.
    pub fn from_params(limit: Option<&str>, offset: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            limit: parse_non_negative(limit).unwrap_or(DEFAULT_LIMIT),
            offset: parse_non_negative(offset).unwrap_or(DEFAULT_OFFSET),
            sort: SortOrder::from_param(sort),
        }
    }
}

fn parse_non_negative(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_defaults_to_asc() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("DESC")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("random")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("")), SortOrder::Asc);
    }

    #[test]
    fn test_page_defaults_when_unspecified() {
        let page = Page::from_params(None, None, None);
        assert_eq!(page, Page::default());
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_page_parses_numbers() {
        let page = Page::from_params(Some("25"), Some("5"), Some("desc"));
        assert_eq!(page.limit, 25);
        assert_eq!(page.offset, 5);
        assert_eq!(page.sort, SortOrder::Desc);
    }

    #[test]
    fn test_page_non_numeric_falls_back() {
        let page = Page::from_params(Some("ten"), Some("1.5"), Some("sideways"));
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_page_negative_falls_back() {
        let page = Page::from_params(Some("-1"), Some("-20"), None);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, DEFAULT_OFFSET);
    }

    #[test]
    fn test_note_update_partial_deserialize() {
        let update: NoteUpdate = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.content.is_none());
        assert!(!update.is_empty());

        let empty: NoteUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
