//! Filtered delete: preview, point delete, or the batched delete loop.

use tablegate_core::api::{DeleteRequest, DeleteResponse, GetRequest, HandlerError, Response};
use tablegate_core::filter::compile;
use tablegate_core::item::{from_attr_map, from_attr_maps};
use tablegate_core::storage::ScanParams;

use crate::context::ExecutionBudget;
use crate::state::AppState;

use super::{get, MISSING_TABLE};

/// Remaining-time floor below which the loop stops and asks for a retry.
const BUDGET_FLOOR_MILLIS: u64 = 200;

/// Above this many matches the per-item result echo is forced off.
const VERBOSE_ITEM_CAP: usize = 1000;

const TIMEOUT_WARNING: &str = "The Lambda function exceeded the timeout threshold before all items could be deleted. Try running this function again to delete the remaining items or increase the Lambda function timeout in AWS.";

/// Runs a delete request.
///
/// Without `Delete=true` this is a dry run that returns the matching page.
/// A single `id = value` filter deletes that one item directly; anything
/// else scans for candidate ids and deletes them batch by batch until done
/// or the execution budget runs low.
pub async fn run(
    state: &AppState,
    request: DeleteRequest,
    budget: &dyn ExecutionBudget,
) -> Result<Response, HandlerError> {
    if request.table.trim().is_empty() {
        return Err(HandlerError::Validation(MISSING_TABLE.to_string()));
    }
    if request.filters.is_empty() {
        return Err(HandlerError::Validation(
            "Filters are required at this time.".to_string(),
        ));
    }

    if !request.delete {
        tracing::info!(table = %request.table, "delete dry run, returning matches");
        let preview = get::run(
            state,
            GetRequest {
                table: request.table,
                filters: request.filters,
                limit: None,
                next_page: None,
            },
        )
        .await?;
        return Ok(Response::Page(preview));
    }

    if request.filters.len() == 1 && request.filters[0].is_id_equality() {
        return delete_one(state, &request).await;
    }
    delete_matching(state, &request, budget).await
}

/// Deletes the single item named by an `id = value` filter and checks the
/// store echoed back the same id.
async fn delete_one(state: &AppState, request: &DeleteRequest) -> Result<Response, HandlerError> {
    let id = request.filters[0]
        .compare_value
        .as_ref()
        .map(|v| v.raw())
        .ok_or_else(|| {
            HandlerError::Validation("An id filter needs a CompareValue to delete by.".to_string())
        })?;
    tracing::info!(table = %request.table, %id, "single item delete");

    let old = state.store.delete_item(&request.table, &id).await?;
    let Some(old) = old else {
        return Err(HandlerError::Validation(format!(
            "There are no records matching id = {id} in the table {}",
            request.table
        )));
    };

    let flat = from_attr_map(&old);
    if flat.get("id").map(String::as_str) != Some(id.as_str()) {
        let echoed = serde_json::to_string(&flat).unwrap_or_default();
        return Err(HandlerError::Validation(format!(
            "The item deleted didn't match the item you requested. The following item was deleted: {echoed}"
        )));
    }

    let mut response = DeleteResponse::new();
    response.items_found = 1;
    response.items_deleted = 1;
    response.all_items_deleted = true;
    if request.verbose {
        response.result.push(flat);
    }
    Ok(Response::Delete(response))
}

/// Scans for matching ids, then deletes them batch by batch.
async fn delete_matching(
    state: &AppState,
    request: &DeleteRequest,
    budget: &dyn ExecutionBudget,
) -> Result<Response, HandlerError> {
    let compiled = compile(&request.filters)?;
    let mut params = ScanParams::new(&request.table);
    params.filter_expression = Some(compiled.expression);
    params.attribute_values = compiled.attribute_values;
    params.projection = Some("id".to_string());

    let page = state.store.scan(&params).await?;
    let candidates = from_attr_maps(&page.items);

    let mut response = DeleteResponse::new();
    response.items_found = candidates.len() as u64;
    tracing::info!(found = response.items_found, "matched items to delete");

    let verbose = request.verbose && candidates.len() <= VERBOSE_ITEM_CAP;

    // Batches are popped off the back, so they complete in reverse scan
    // order.
    let mut queue: Vec<Vec<std::collections::HashMap<String, String>>> = candidates
        .chunks(state.config.batch_size)
        .map(<[_]>::to_vec)
        .collect();

    loop {
        let Some(batch) = queue.pop() else {
            tracing::info!("end of batch list");
            return Ok(Response::Delete(response));
        };

        let ids: Vec<String> = batch
            .iter()
            .filter_map(|item| item.get("id").cloned())
            .collect();
        tracing::info!(remaining = queue.len(), size = ids.len(), "deleting batch");

        let outcome = state.store.batch_delete(&request.table, &ids).await?;
        if outcome.unprocessed_count > 0 {
            tracing::warn!(
                unprocessed = outcome.unprocessed_count,
                "unprocessed deletes returned; stopping"
            );
            return Err(HandlerError::UnprocessedItems);
        }
        let Some(units) = outcome.consumed_units else {
            return Err(HandlerError::AccountingMissing);
        };
        response.items_deleted += units as u64;
        if verbose {
            response.result.extend(batch);
        }

        // The budget is checked before completion, so a run that finishes
        // its last batch with little time left still reports a retry.
        if budget.remaining_millis() < BUDGET_FLOOR_MILLIS {
            tracing::warn!(
                deleted = response.items_deleted,
                found = response.items_found,
                "stopping before the execution budget runs out"
            );
            response.all_items_deleted = false;
            response.retry = true;
            response.warning = Some(TIMEOUT_WARNING.to_string());
            return Ok(Response::Delete(response));
        }
        if response.items_deleted == response.items_found {
            response.all_items_deleted = true;
            return Ok(Response::Delete(response));
        }
    }
}
