use chrono::{DateTime, Utc};

use super::error::ValidationError;
use super::requests::{
    ContentBlockInput, CreateNewsRequest, ListNewsRequest, UpdateNewsRequest,
};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 255;
pub const CATEGORY_MIN: usize = 2;
pub const CATEGORY_MAX: usize = 100;
pub const LIMIT_MAX: u32 = 100;

/// Validates a create payload.
pub fn validate_create(req: &CreateNewsRequest) -> Result<(), ValidationError> {
    validate_title(&req.title)?;
    validate_category(&req.category)?;
    validate_blocks(&req.content_blocks)?;
    validate_window(req.start_time, req.end_time)
}

/// Validates an update payload. Only the fields that are present are checked.
pub fn validate_update(req: &UpdateNewsRequest) -> Result<(), ValidationError> {
    validate_id(req.id)?;
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(category) = &req.category {
        validate_category(category)?;
    }
    if let Some(blocks) = &req.content_blocks {
        validate_blocks(blocks)?;
    }
    validate_window(req.start_time, req.end_time)
}

/// Validates listing parameters.
pub fn validate_list(req: &ListNewsRequest) -> Result<(), ValidationError> {
    if req.page < 1 {
        return Err(ValidationError::InvalidPage);
    }
    if req.limit < 1 || req.limit > LIMIT_MAX {
        return Err(ValidationError::InvalidLimit { max: LIMIT_MAX });
    }
    Ok(())
}

/// Parses a path segment into a store id.
pub fn parse_news_id(raw: &str) -> Result<i64, ValidationError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))?;
    validate_id(id)?;
    Ok(id)
}

fn validate_id(id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
        return Err(ValidationError::TitleLength {
            min: TITLE_MIN,
            max: TITLE_MAX,
        });
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    let len = category.chars().count();
    if !(CATEGORY_MIN..=CATEGORY_MAX).contains(&len) {
        return Err(ValidationError::CategoryLength {
            min: CATEGORY_MIN,
            max: CATEGORY_MAX,
        });
    }
    Ok(())
}

fn validate_blocks(blocks: &[ContentBlockInput]) -> Result<(), ValidationError> {
    for (index, block) in blocks.iter().enumerate() {
        if block.content.trim().is_empty() {
            return Err(ValidationError::EmptyBlockContent { index });
        }
        if block.position < 0 {
            return Err(ValidationError::NegativePosition { index });
        }
    }
    Ok(())
}

fn validate_window(
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start_time, end_time) {
        (Some(start), Some(end)) if end <= start => Err(ValidationError::InvalidTimeWindow),
        _ => Ok(()),
    }
}
