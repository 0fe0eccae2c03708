//! Read handler: point lookup, query or scan per the planner's decision.

use tablegate_core::api::{GetRequest, HandlerError, ReadResponse};
use tablegate_core::item::from_attr_maps;
use tablegate_core::plan::{plan_read, ReadPlan};

use crate::state::AppState;

use super::MISSING_TABLE;

/// Runs a read request and flattens the result page.
pub async fn run(state: &AppState, request: GetRequest) -> Result<ReadResponse, HandlerError> {
    if request.table.trim().is_empty() {
        return Err(HandlerError::Validation(MISSING_TABLE.to_string()));
    }

    let limit = request.limit.unwrap_or(state.config.page_limit);
    let plan = plan_read(
        &request.table,
        &request.filters,
        limit,
        request.next_page.as_deref(),
    )?;

    let page = match &plan {
        ReadPlan::Query(params) => {
            tracing::info!(table = %request.table, "filter type: pointer query");
            state.store.query(params).await?
        }
        ReadPlan::Scan(params) if params.filter_expression.is_some() => {
            // Might be slow on larger tables.
            tracing::info!(table = %request.table, "filter type: table scan");
            state.store.scan(params).await?
        }
        ReadPlan::Scan(params) => {
            tracing::info!(table = %request.table, "filter type: return all");
            state.store.scan(params).await?
        }
    };

    let result = from_attr_maps(&page.items);
    Ok(ReadResponse {
        next_page: page.last_evaluated_id,
        count: result.len(),
        result,
    })
}
