pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        auth::Claims,
        config::Config,
        models::domain::Form,
        repositories::{MockFormRepository, MockFormResponseRepository, MockQuestionRepository},
        test_utils::fixtures::OWNER_ID,
    };

    fn schema_with(forms: MockFormRepository) -> Schema {
        let state = AppState::from_repositories(
            Config::test_config(),
            Arc::new(forms),
            Arc::new(MockQuestionRepository::new()),
            Arc::new(MockFormResponseRepository::new()),
        );
        create_schema(state)
    }

    #[tokio::test]
    async fn test_forms_query_lists_owned_forms() {
        let mut forms = MockFormRepository::new();
        forms
            .expect_list_by_owner()
            .times(1)
            .returning(|owner| Ok(vec![Form::new_draft("Geography", owner)]));

        let request = async_graphql::Request::new("{ forms { title isPublished questionCount } }")
            .data(Claims::new(OWNER_ID, "owner@example.com", 1));
        let response = schema_with(forms).execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["forms"][0]["title"], "Geography");
        assert_eq!(data["forms"][0]["isPublished"], false);
        assert_eq!(data["forms"][0]["questionCount"], 0);
    }

    #[tokio::test]
    async fn test_query_without_claims_is_unauthorized() {
        let response = schema_with(MockFormRepository::new())
            .execute("{ forms { title } }")
            .await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("UNAUTHORIZED")));
    }

    #[tokio::test]
    async fn test_publish_of_missing_form_reports_not_found() {
        let mut forms = MockFormRepository::new();
        forms.expect_find_by_id().returning(|_| Ok(None));

        let request = async_graphql::Request::new(r#"mutation { publishForm(id: "nope") { id } }"#)
            .data(Claims::new(OWNER_ID, "owner@example.com", 1));
        let response = schema_with(forms).execute(request).await;

        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }
}
