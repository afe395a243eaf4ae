//! GraphQL schema definition

use async_graphql::*;

use super::context::GraphQLContext;
use super::metrics::MetricsExtension;
use super::mutations::MutationRoot;
use super::queries::QueryRoot;

/// The complete GraphQL schema type
pub type GraphQLSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema
pub fn build_schema() -> GraphQLSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(MetricsExtension)
        .limit_depth(10)
        .limit_complexity(200)
        .finish()
}

/// Execute a GraphQL query/mutation
///
/// Helper for tests and programmatic access
pub async fn execute_query(
    schema: &GraphQLSchema,
    ctx: GraphQLContext,
    query: &str,
    variables: Option<serde_json::Value>,
) -> Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(Variables::from_json(vars));
    }

    request = request.data(ctx);

    schema.execute(request).await
}
