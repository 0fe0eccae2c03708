//! Request dispatch and the three operation handlers.

pub mod delete;
pub mod get;
pub mod put;

use tablegate_core::api::{HandlerError, Request, Response};

use crate::context::ExecutionBudget;
use crate::state::AppState;

/// Dispatches a validated request to its handler.
pub async fn handle(
    state: &AppState,
    request: Request,
    budget: &dyn ExecutionBudget,
) -> Result<Response, HandlerError> {
    match request {
        Request::Get(request) => get::run(state, request).await.map(Response::Page),
        Request::Put(request) => put::run(state, request).await,
        Request::Delete(request) => delete::run(state, request, budget).await,
    }
}

/// The original error message for a payload without a table.
pub(crate) const MISSING_TABLE: &str = "The payload you passed in is missing a table. Make sure to include the Table you wish to query against";
