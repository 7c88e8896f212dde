use async_graphql::Context;

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, Claims},
    errors::AppResult,
};

/// Shared state plus the caller's claims; every resolver is owner-scoped.
pub fn state_and_claims<'a>(ctx: &Context<'a>) -> AppResult<(&'a AppState, Claims)> {
    let state = ctx.data::<AppState>()?;
    let claims = extract_claims_from_context(ctx)?;
    Ok((state, claims))
}
