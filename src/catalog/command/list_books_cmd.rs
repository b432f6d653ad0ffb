use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::listing::{render_available, render_catalog};
use crate::core::command::{Command, CommandError};
use crate::core::domain::Configuration;

pub struct ListBooksCommand {
    config: Configuration,
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub fn new(config: &Configuration, catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            config: config.clone(),
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListBooksCommandRequest {
    #[serde(default)]
    pub available_only: bool,
}

impl ListBooksCommandRequest {
    pub fn new(available_only: bool) -> Self {
        Self {
            available_only,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
    pub total: usize,
    pub listing: Vec<String>,
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let books = if req.available_only {
            self.catalog_service.list_available().await?
        } else {
            self.catalog_service.list_books().await?
        };
        let listing = if req.available_only {
            render_available(&self.config, &books)?
        } else {
            render_catalog(&self.config, &books)?
        };
        let total = self.catalog_service.count().await?;
        Ok(ListBooksCommandResponse { books, total, listing })
    }
}
