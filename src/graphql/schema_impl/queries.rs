use async_graphql::{Context, Object, ResultExt, ID};

use crate::{
    graphql::helpers::state_and_claims,
    models::{
        domain::form_response::ResponseStats,
        dto::response::{FormSummary, ResponseSummary},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Forms owned by the caller, newest first.
    async fn forms(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<FormSummary>> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        let forms = state
            .form_service
            .list_owned_forms(claims.user_id())
            .await
            .extend()?;

        Ok(forms.iter().map(FormSummary::from).collect())
    }

    async fn form_responses(
        &self,
        ctx: &Context<'_>,
        form_id: ID,
    ) -> async_graphql::Result<Vec<ResponseSummary>> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        let responses = state
            .response_service
            .list_for_form(claims.user_id(), &form_id)
            .await
            .extend()?;

        Ok(responses.iter().map(ResponseSummary::from).collect())
    }

    async fn response_stats(
        &self,
        ctx: &Context<'_>,
        form_id: ID,
    ) -> async_graphql::Result<ResponseStats> {
        let (state, claims) = state_and_claims(ctx).extend()?;

        state
            .response_service
            .stats(claims.user_id(), &form_id)
            .await
            .extend()
    }
}
