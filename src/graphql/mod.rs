//! GraphQL API module
//!
//! Sales queries, dashboard analytics and sentiment scoring over
//! `POST /graphql`, with a playground on `GET /graphql`.

pub mod context;
pub mod errors;
pub mod metrics;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

pub use context::GraphQLContext;
pub use schema::{build_schema, execute_query, GraphQLSchema};

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::service::SalesService;

#[derive(Clone)]
pub struct GraphQLState {
    schema: GraphQLSchema,
    service: Arc<SalesService>,
}

/// Body of `POST /graphql`
#[derive(Debug, Deserialize, ToSchema)]
pub struct GraphQLRequest {
    #[schema(example = "query { sales { id productName } }")]
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GraphQLResponse {
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<serde_json::Value>,
}

impl GraphQLRequest {
    fn into_request(self) -> async_graphql::Request {
        let request = async_graphql::Request::new(self.query);
        let request = match self.operation_name {
            Some(name) => request.operation_name(name),
            None => request,
        };
        match self.variables {
            Some(vars) => request.variables(async_graphql::Variables::from_json(vars)),
            None => request,
        }
    }
}

impl From<async_graphql::Response> for GraphQLResponse {
    fn from(response: async_graphql::Response) -> Self {
        let errors = response
            .errors
            .iter()
            .filter_map(|e| serde_json::to_value(e).ok())
            .collect();

        Self {
            data: response.data.into_json().unwrap_or_default(),
            errors,
        }
    }
}

/// `POST /graphql` executes operations, `GET /graphql` serves the playground
pub fn graphql_routes(service: Arc<SalesService>) -> Router {
    let state = GraphQLState {
        schema: build_schema(),
        service,
    };

    Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .with_state(state)
}

/// Execute one operation against the schema with a fresh per-request context
#[utoipa::path(
    post,
    path = "/graphql",
    tag = "graphql",
    request_body = GraphQLRequest,
    responses(
        (status = 200, description = "GraphQL response; failures are reported in `errors`", body = GraphQLResponse),
        (status = 429, description = "Too many requests from this client")
    )
)]
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    Json(body): Json<GraphQLRequest>,
) -> Json<GraphQLResponse> {
    let request = body
        .into_request()
        .data(GraphQLContext::new(state.service.clone()));
    let response = state.schema.execute(request).await;

    Json(GraphQLResponse::from(response))
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
