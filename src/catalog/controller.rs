use serde::Serialize;
use serde_json::{json, Value};
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::checkout_book_cmd::{CheckoutBookCommand, CheckoutBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, json_to_server_error, ResponseStatus, ServerError};

fn to_json<T: Serialize>(res: &T) -> Result<Value, ServerError> {
    serde_json::to_value(res).map_err(json_to_server_error)
}

// Dispatches one request object on its "op" field, e.g. {"op": "checkout", "title": "1984"}.
pub async fn handle_request(state: &AppState, json: Value) -> Result<Value, ServerError> {
    let op = json.get("op").and_then(Value::as_str).map(str::to_string)
        .ok_or_else(|| (ResponseStatus::BadRequest, "request has no op".to_string()))?;
    match op.as_str() {
        "add" => {
            let book = BookDto::try_from(json).map_err(CommandError::from)?;
            let res = AddBookCommand::new(state.catalog.clone()).execute(AddBookCommandRequest::new(book)).await?;
            to_json(&res)
        }
        "find" => {
            let req: GetBookCommandRequest = serde_json::from_value(json).map_err(json_to_server_error)?;
            let res = GetBookCommand::new(state.catalog.clone()).execute(req).await?;
            to_json(&res)
        }
        "checkout" => {
            let req: CheckoutBookCommandRequest = serde_json::from_value(json).map_err(json_to_server_error)?;
            let res = CheckoutBookCommand::new(state.catalog.clone()).execute(req).await?;
            to_json(&res)
        }
        "return" => {
            let req: ReturnBookCommandRequest = serde_json::from_value(json).map_err(json_to_server_error)?;
            let res = ReturnBookCommand::new(state.catalog.clone()).execute(req).await?;
            to_json(&res)
        }
        "list" => {
            let req: ListBooksCommandRequest = serde_json::from_value(json).map_err(json_to_server_error)?;
            let res = ListBooksCommand::new(&state.config, state.catalog.clone()).execute(req).await?;
            to_json(&res)
        }
        "count" => {
            let count = state.catalog.count().await.map_err(CommandError::from)?;
            Ok(json!({ "count": count }))
        }
        other => {
            Err((ResponseStatus::BadRequest, format!("unsupported op {}", other)))
        }
    }
}

// Handles one line of the shell protocol and always answers with one JSON line.
pub async fn handle_line(state: &AppState, line: &str) -> String {
    let res = match serde_json::from_str::<Value>(line) {
        Ok(json) => handle_request(state, json).await,
        Err(err) => Err(json_to_server_error(err)),
    };
    match res {
        Ok(value) => value.to_string(),
        Err((status, message)) => {
            tracing::warn!(status = %status, message = message.as_str(), "request failed");
            json!({ "status": status, "error": message }).to_string()
        }
    }
}
