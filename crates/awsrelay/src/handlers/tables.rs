//! DynamoDB routes under `/dynamo-test`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use awsrelay_core::dynamo::{
    graph_lookup, graph_record, GetItemOutput, ListTablesOutput, ListTablesParams,
    PutGraphRequest, PutItemOutput,
};
use awsrelay_core::ServiceError;

use super::error::{rejected, RelayError, RelayStyle};
use crate::state::AppState;

/// `GET /dynamo-test/{guid}` answers every failure with this body.
const LOOKUP_FAILURE: &str = "BOOM";

fn relay_message(error: ServiceError) -> RelayError {
    RelayError::new(error, RelayStyle::MessageObject)
}

fn relay_boom(error: ServiceError) -> RelayError {
    RelayError::new(error, RelayStyle::Literal(LOOKUP_FAILURE))
}

/// List DynamoDB tables (GET /dynamo-test/tables).
pub async fn list_tables(
    State(state): State<AppState>,
    query: Result<Query<ListTablesParams>, QueryRejection>,
) -> Result<Json<ListTablesOutput>, RelayError> {
    let Query(params) = query.map_err(|e| relay_message(rejected(e)))?;
    let output = state.tables.list_tables(params).await.map_err(relay_message)?;

    tracing::debug!(count = output.table_names.len(), "Listed tables");

    Ok(Json(output))
}

/// Read the graph id stored for a guid (GET /dynamo-test/{guid}).
pub async fn get_graph(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<GetItemOutput>, RelayError> {
    let params = graph_lookup(&state.config.table_name, &guid).map_err(relay_boom)?;
    let output = state.tables.get_item(params).await.map_err(relay_boom)?;

    tracing::debug!(%guid, found = output.item.is_some(), "Read graph item");

    Ok(Json(output))
}

/// Store a graph id under a guid (PUT /dynamo-test).
pub async fn put_graph(
    State(state): State<AppState>,
    body: Result<Json<PutGraphRequest>, JsonRejection>,
) -> Result<Json<PutItemOutput>, RelayError> {
    let Json(payload) = body.map_err(|e| relay_message(rejected(e)))?;
    let params = graph_record(&state.config.table_name, payload).map_err(relay_message)?;
    let output = state.tables.put_item(params).await.map_err(relay_message)?;

    tracing::info!(table = %state.config.table_name, "Stored graph item");

    Ok(Json(output))
}
