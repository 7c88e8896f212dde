use async_graphql::{Context, Object, ResultExt, ID};

use crate::{graphql::helpers::state_and_claims, models::dto::response::FormSummary};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn publish_form(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<FormSummary> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        let result = state
            .form_service
            .publish_form(claims.user_id(), &id)
            .await
            .extend()?;

        Ok(FormSummary::from(&result.form))
    }

    async fn unpublish_form(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<FormSummary> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        let form = state
            .form_service
            .unpublish_form(claims.user_id(), &id)
            .await
            .extend()?;

        Ok(FormSummary::from(&form))
    }

    async fn delete_response(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        state
            .response_service
            .delete_response(claims.user_id(), &id)
            .await
            .extend()?;

        Ok(true)
    }
}
