//! Use-case orchestration on top of the storage and cache traits.

mod news;

use async_trait::async_trait;

use newsroom_core::news::{
    CreateNewsRequest, DeleteAck, DeleteNewsRequest, GetNewsRequest, ListNewsRequest, ListView,
    NewsView, UpdateAck, UpdateNewsRequest,
};
use newsroom_core::storage::Result;

pub use news::NewsService;

/// Object-safe facade over [`NewsService`] so handlers don't carry its
/// backend type parameters.
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn create(&self, req: CreateNewsRequest) -> Result<NewsView>;

    async fn get(&self, req: GetNewsRequest) -> Result<NewsView>;

    async fn update(&self, req: UpdateNewsRequest) -> Result<UpdateAck>;

    async fn delete(&self, req: DeleteNewsRequest) -> Result<DeleteAck>;

    async fn list(&self, req: ListNewsRequest) -> Result<ListView>;
}
