//! Pure helpers used by the service when composing use cases.

use chrono::{DateTime, Utc};

use super::types::News;
use super::views::NewsView;

/// Row offset for a 1-based page.
pub fn page_offset(page: u32, limit: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(limit)
}

/// Keeps only the items visible at `now`.
pub fn filter_visible(items: Vec<News>, now: DateTime<Utc>) -> Vec<News> {
    items
        .into_iter()
        .filter(|news| news.is_visible_at(now))
        .collect()
}

/// Builds the views for a page, optionally dropping hidden items.
pub fn to_views(items: Vec<News>, check_visibility: bool, now: DateTime<Utc>) -> Vec<NewsView> {
    let items = if check_visibility {
        filter_visible(items, now)
    } else {
        items
    };
    items.iter().map(NewsView::from).collect()
}
