//! GraphQL query resolvers

use async_graphql::*;
use chrono::Utc;

use super::context::GraphQLContext;
use super::types::*;

/// Root query object
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get system health information
    async fn health(&self) -> HealthInfo {
        HealthInfo {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().into(),
        }
    }

    /// Every sale, newest sale date first
    async fn sales(&self, ctx: &Context<'_>) -> Result<Vec<Sale>> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        let sales = gql_ctx
            .service
            .list_sales()
            .await
            .map_err(|e| e.extend())?;

        Ok(sales.into_iter().map(Sale).collect())
    }

    /// Get a sale by ID
    async fn sale(&self, ctx: &Context<'_>, id: i32) -> Result<Sale> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        let sale = gql_ctx
            .service
            .get_sale(id)
            .await
            .map_err(|e| e.extend())?;

        Ok(Sale(sale))
    }

    /// Dashboard analytics over all stored sales
    async fn analytics(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "End of the trend window; defaults to today (UTC)")] as_of: Option<
            DateScalar,
        >,
    ) -> Result<Analytics> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        let reference = match as_of {
            Some(DateScalar(date)) => crate::analytics::start_of_day(date),
            None => Utc::now(),
        };

        let report = gql_ctx
            .service
            .analytics(reference)
            .await
            .map_err(|e| e.extend())?;

        Ok(Analytics(report))
    }
}
