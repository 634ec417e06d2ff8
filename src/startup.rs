use std::net::TcpListener;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;

use crate::authentication::reject_anonymous_users;
use crate::configuration::{ApplicationSettings, DatabaseSettings, Settings};
use crate::relay_client::RelayClient;
use crate::routes::{health_check, login, send_emails, signup, test_email, upload};

pub struct Application {
    port: u16,
    server: Server,
}

/// Signing key for session tokens, shared as app data.
pub struct TokenSecret(pub SecretString);

/// The fixed recipient of `/test-email` probes.
pub struct TestRecipient(pub String);

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let relay_client = config.mail_relay.clone().client();
        let connection_pool = get_connection_pool(&config.database);

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            connection_pool,
            relay_client,
            config.mail_relay.test_recipient,
            config.app,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    relay_client: RelayClient,
    test_recipient: String,
    app_config: ApplicationSettings,
) -> Result<Server, anyhow::Error> {
    let db_pool = web::Data::new(db_pool);
    let relay_client = web::Data::new(relay_client);
    let token_secret = web::Data::new(TokenSecret(app_config.token_secret.clone()));
    let test_recipient = web::Data::new(TestRecipient(test_recipient));
    let allowed_origins = app_config.allowed_origins.clone();
    let send_requires_auth = app_config.send_requires_auth;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        let app = App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .route("/health_check", web::get().to(health_check))
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/upload", web::post().to(upload))
            .route("/test-email", web::get().to(test_email));

        // Bulk send is guarded by a bearer token unless the deployment opts
        // out via `app.send_requires_auth`.
        let app = if send_requires_auth {
            app.service(
                web::scope("/send-emails")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("", web::post().to(send_emails)),
            )
        } else {
            app.service(web::scope("/send-emails").route("", web::post().to(send_emails)))
        };

        app.app_data(db_pool.clone())
            .app_data(relay_client.clone())
            .app_data(token_secret.clone())
            .app_data(test_recipient.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_pool(db_config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(db_config.with_db())
}
