use mailburst::{
    authentication::issue_token,
    configuration::{DatabaseSettings, get_configuration},
    startup::{Application, get_connection_pool},
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub mail_server: MockServer,
    pub api_client: reqwest::Client,
    token_secret: SecretString,
}

impl TestApp {
    /// Mint a token the way `/login` would, for exercising guarded routes
    /// without a live credential store.
    pub fn issue_test_token(&self) -> String {
        issue_token(Uuid::new_v4(), &self.token_secret).expect("Failed to issue a test token.")
    }

    pub async fn post_signup(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/signup", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_send_emails(
        &self,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .post(format!("{}/send-emails", &self.address))
            .json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn upload_file(&self, filename: &str, contents: &[u8]) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(contents.to_vec()).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        self.api_client
            .post(format!("{}/upload", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database");

    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate database");

    connection_pool
}

pub async fn spawn_app() -> TestApp {
    spawn_app_inner(true, false).await
}

pub async fn spawn_app_without_send_auth() -> TestApp {
    spawn_app_inner(false, false).await
}

/// Variant for tests that hit the credential store; requires a running
/// Postgres, so only `#[ignore]`d tests use it.
pub async fn spawn_app_with_database() -> TestApp {
    spawn_app_inner(true, true).await
}

async fn spawn_app_inner(send_requires_auth: bool, create_database: bool) -> TestApp {
    Lazy::force(&TRACING);

    let mail_server = MockServer::start().await;

    let mut config = get_configuration().expect("Failed to read configuration");
    config.database.database_name = Uuid::new_v4().to_string();
    config.app.port = 0;
    config.app.send_requires_auth = send_requires_auth;
    config.mail_relay.base_url = mail_server.uri();

    if create_database {
        configure_database(&config.database).await;
    }

    let app = Application::build(config.clone())
        .await
        .expect("Failed to build application.");
    let port = app.get_port();
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        db_pool: get_connection_pool(&config.database),
        mail_server,
        api_client: reqwest::Client::new(),
        token_secret: config.app.token_secret.clone(),
    }
}
