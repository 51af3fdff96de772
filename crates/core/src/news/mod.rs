mod error;
mod operations;
mod requests;
mod types;
mod validation;
mod views;

pub use error::ValidationError;
pub use operations::{filter_visible, page_offset, to_views};
pub use requests::{
    ContentBlockInput, CreateNewsRequest, DeleteNewsRequest, GetNewsRequest, ListNewsRequest,
    UpdateNewsRequest,
};
pub use types::{is_visible_at, BlockType, ContentBlock, News};
pub use validation::{
    parse_news_id, validate_create, validate_list, validate_update, CATEGORY_MAX, CATEGORY_MIN,
    LIMIT_MAX, TITLE_MAX, TITLE_MIN,
};
pub use views::{ContentBlockView, DeleteAck, ListView, NewsView, UpdateAck};
