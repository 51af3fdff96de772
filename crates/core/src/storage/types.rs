use crate::news::{page_offset, ListNewsRequest, News};

/// Columns a listing can be ordered by. Only exact lowercase names are
/// accepted; anything else falls back to `CreatedAt`, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
    Category,
    StartTime,
    EndTime,
}

impl SortField {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "title" => SortField::Title,
            "category" => SortField::Category,
            "start_time" => SortField::StartTime,
            "end_time" => SortField::EndTime,
            _ => SortField::CreatedAt,
        }
    }

    /// Qualified column for the `news n` alias.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "n.created_at",
            SortField::Title => "n.title",
            SortField::Category => "n.category",
            SortField::StartTime => "n.start_time",
            SortField::EndTime => "n.end_time",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "asc" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Repository-level listing parameters. Visibility filtering is applied by the
/// caller after the page is fetched, so it is not part of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
            search: None,
            category: None,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl From<&ListNewsRequest> for ListQuery {
    fn from(req: &ListNewsRequest) -> Self {
        Self {
            offset: page_offset(req.page, req.limit),
            limit: i64::from(req.limit),
            search: non_empty(req.search.as_deref()),
            category: non_empty(req.category.as_deref()),
            sort_field: req
                .sort_by
                .as_deref()
                .map(SortField::parse)
                .unwrap_or_default(),
            sort_direction: req
                .sort_dir
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One page of aggregates plus the number of rows matching the filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsPage {
    pub items: Vec<News>,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parse_known_values() {
        assert_eq!(SortField::parse("title"), SortField::Title);
        assert_eq!(SortField::parse("category"), SortField::Category);
        assert_eq!(SortField::parse("start_time"), SortField::StartTime);
        assert_eq!(SortField::parse("end_time"), SortField::EndTime);
        assert_eq!(SortField::parse("created_at"), SortField::CreatedAt);
    }

    #[test]
    fn test_sort_field_unknown_falls_back_to_created_at() {
        assert_eq!(SortField::parse("nonexistent_field"), SortField::CreatedAt);
        assert_eq!(SortField::parse("id; DROP TABLE news"), SortField::CreatedAt);
    }

    #[test]
    fn test_sort_field_parse_is_case_sensitive() {
        assert_eq!(SortField::parse("TITLE"), SortField::CreatedAt);
        assert_eq!(SortField::parse(" title "), SortField::CreatedAt);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse(" asc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
    }

    #[test]
    fn test_columns_are_qualified() {
        assert_eq!(SortField::CreatedAt.column(), "n.created_at");
        assert_eq!(SortField::EndTime.column(), "n.end_time");
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
    }

    #[test]
    fn test_list_query_from_request() {
        let req = ListNewsRequest::default()
            .with_page(3, 20)
            .with_search("rust")
            .with_category("tech")
            .with_sort("title", "asc");

        let query = ListQuery::from(&req);

        assert_eq!(query.offset, 40);
        assert_eq!(query.limit, 20);
        assert_eq!(query.search.as_deref(), Some("rust"));
        assert_eq!(query.category.as_deref(), Some("tech"));
        assert_eq!(query.sort_field, SortField::Title);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_list_query_defaults_from_empty_request() {
        let query = ListQuery::from(&ListNewsRequest::default());
        assert_eq!(query, ListQuery::default());
    }
}
