pub mod cache;
pub mod news;
pub mod serde;
pub mod storage;
