pub mod error;
pub mod health;
pub mod news;

pub use error::AppError;
