use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use form_builder_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    graphql::create_schema,
    handlers,
    middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let jwt_service = web::Data::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));
    let schema = web::Data::new(create_schema(state.clone()));
    let state = web::Data::new(state);

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on http://{}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    let allowed_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .expose_headers(vec![REQUEST_ID_HEADER])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .app_data(schema.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(r#"%a "%r" %s %b %{x-request-id}o %T"#))
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
