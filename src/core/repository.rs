use async_trait::async_trait;
use std::collections::HashMap;
use crate::core::library::{LibraryResult, PaginatedResult};

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // appends an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // get the first entity with the id
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // removes the most recently added entity equal to the given one
    async fn delete(&self, entity: &Entity) -> LibraryResult<usize>;

    // number of entities
    async fn count(&self) -> LibraryResult<usize>;

    // find by exact-match predicate, in insertion order
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}
