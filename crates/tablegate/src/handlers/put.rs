//! Write handler: single item or chunked batch insert.

use tablegate_core::api::{HandlerError, PutRequest, Response};
use tablegate_core::item::to_attr_map;

use crate::batch;
use crate::state::AppState;

const BAD_PUT_PAYLOAD: &str = "The payload you passed in is incorrect. Example: { Table: \"myTableName\", Item: { id: \"123\", name: \"Teddy\", age: \"12\" } }.";
const MISSING_ID: &str = "Item is missing an Id property. Please make sure you have an 'id' property and it's set to a string.";

/// Runs a put request: `Item` writes one item, `Items` runs the chunked
/// batch insert.
pub async fn run(state: &AppState, request: PutRequest) -> Result<Response, HandlerError> {
    if request.table.trim().is_empty() {
        return Err(HandlerError::Validation(BAD_PUT_PAYLOAD.to_string()));
    }

    if let Some(item) = &request.item {
        if !item.contains_key("id") {
            return Err(HandlerError::Validation(MISSING_ID.to_string()));
        }
        state
            .store
            .put_item(&request.table, to_attr_map(item))
            .await?;
        return Ok(Response::Message("SUCCESS".to_string()));
    }

    if let Some(items) = &request.items {
        // TODO: reject batch items missing an id before dispatching the
        // first chunk, instead of letting the store refuse them.
        let mapped = items.iter().map(to_attr_map).collect::<Vec<_>>();
        tracing::info!(count = mapped.len(), "batch put operation");

        let report = batch::insert_all(
            state.store.clone(),
            &request.table,
            mapped,
            state.config.batch_size,
        )
        .await?;
        if !report.is_complete() {
            return Err(HandlerError::AccountingMissing);
        }
        return Ok(Response::Message("SUCCESS".to_string()));
    }

    Err(HandlerError::Validation(
        "There was an error processing your request. Make sure you pass in Item or Items to be inserted/updated".to_string(),
    ))
}
