use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: Configuration) -> AppState {
        let catalog = factory::create_catalog_service(&config);
        AppState {
            config,
            catalog,
        }
    }
}

// ResponseStatus classifies a failed request for the caller of the harness
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ResponseStatus {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl Display for ResponseStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ResponseStatus::BadRequest => write!(f, "BadRequest"),
            ResponseStatus::NotFound => write!(f, "NotFound"),
            ResponseStatus::Conflict => write!(f, "Conflict"),
            ResponseStatus::Internal => write!(f, "Internal"),
        }
    }
}

pub type ServerError = (ResponseStatus, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (ResponseStatus::BadRequest, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::NotFound { .. } => {
                (ResponseStatus::NotFound, format!("{:?}", err))
            }
            CommandError::Unavailable { .. } => {
                (ResponseStatus::Conflict, format!("{:?}", err))
            }
            CommandError::InvalidEntity { .. } => {
                (ResponseStatus::BadRequest, format!("{:?}", err))
            }
            CommandError::Runtime { .. } => {
                (ResponseStatus::Internal, format!("{:?}", err))
            }
            CommandError::Serialization { .. } => {
                (ResponseStatus::BadRequest, format!("{:?}", err))
            }
            CommandError::Validation { .. } => {
                (ResponseStatus::BadRequest, format!("{:?}", err))
            }
        }
    }
}
