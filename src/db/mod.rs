use std::time::Duration;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Form, FormResponse, Question},
};

pub const FORMS: &str = "forms";
pub const QUESTIONS: &str = "questions";
pub const FORM_RESPONSES: &str = "form_responses";

/// One index to create at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub name: &'static str,
    pub keys: Document,
    pub unique: bool,
}

impl IndexSpec {
    fn new(collection: &'static str, name: &'static str, keys: Document, unique: bool) -> Self {
        Self {
            collection,
            name,
            keys,
            unique,
        }
    }

    fn model(&self) -> IndexModel {
        IndexModel::builder()
            .keys(self.keys.clone())
            .options(
                IndexOptions::builder()
                    .name(self.name.to_string())
                    .unique(self.unique)
                    .build(),
            )
            .build()
    }
}

/// Every index the service relies on. Shareable links are looked up publicly, so they
/// must never collide.
pub fn index_specs() -> Vec<IndexSpec> {
    vec![
        IndexSpec::new(FORMS, "id_unique", doc! { "id": 1 }, true),
        IndexSpec::new(FORMS, "shareable_link_unique", doc! { "shareableLink": 1 }, true),
        IndexSpec::new(FORMS, "created_by", doc! { "createdBy": 1, "createdAt": -1 }, false),
        IndexSpec::new(QUESTIONS, "id_unique", doc! { "id": 1 }, true),
        IndexSpec::new(QUESTIONS, "form_order", doc! { "formId": 1, "order": 1 }, false),
        IndexSpec::new(FORM_RESPONSES, "id_unique", doc! { "id": 1 }, true),
        IndexSpec::new(
            FORM_RESPONSES,
            "form_created_at",
            doc! { "formId": 1, "createdAt": -1 },
            false,
        ),
    ]
}

fn client_options_from(config: &Config, mut options: ClientOptions) -> ClientOptions {
    let timeout = Duration::from_secs(config.mongo_timeout_secs);

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.min_pool_size = Some(config.mongo_max_pool_size.min(2));
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options
}

/// Handle on the form builder's database with typed access to its collections.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let parsed = ClientOptions::parse(&config.mongo_conn_string).await?;
        let client = Client::with_options(client_options_from(config, parsed))?;

        let db = Self {
            inner: client.database(&config.mongo_db_name),
        };
        db.ping().await?;

        log::info!(
            "Connected to MongoDB database '{}' (pool size {})",
            config.mongo_db_name,
            config.mongo_max_pool_size
        );
        Ok(db)
    }

    pub fn forms(&self) -> Collection<Form> {
        self.inner.collection(FORMS)
    }

    pub fn questions(&self) -> Collection<Question> {
        self.inner.collection(QUESTIONS)
    }

    pub fn form_responses(&self) -> Collection<FormResponse> {
        self.inner.collection(FORM_RESPONSES)
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        for spec in index_specs() {
            self.inner
                .collection::<Document>(spec.collection)
                .create_index(spec.model())
                .await?;
            log::debug!("Index '{}' ready on '{}'", spec.name, spec.collection);
        }
        log::info!("MongoDB indexes ready");
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.inner.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
