//! GraphQL mutation resolvers

use async_graphql::*;

use super::context::GraphQLContext;
use super::types::*;

/// Root mutation object
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Record a new sale
    async fn create_sale(&self, ctx: &Context<'_>, input: CreateSaleInput) -> Result<Sale> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        let sale = gql_ctx
            .service
            .create_sale(input.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(Sale(sale))
    }

    /// Delete a sale. Fails with `NOT_FOUND` when the id is unknown.
    async fn delete_sale(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        gql_ctx
            .service
            .delete_sale(id)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }

    /// Score the sentiment of a review text
    async fn analyze_sentiment(
        &self,
        ctx: &Context<'_>,
        input: SentimentAnalysisInput,
    ) -> Result<SentimentResult> {
        let gql_ctx = ctx.data::<GraphQLContext>()?;

        let result = gql_ctx
            .service
            .analyze_sentiment(&input.text)
            .map_err(|e| e.extend())?;

        Ok(SentimentResult(result))
    }
}
