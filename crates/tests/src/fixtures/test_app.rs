use dutydesk_api::{build_router, state::AppState};
use dutydesk_config::Settings;
use dutydesk_db::indexes::ensure_indexes;
use dutydesk_services::auth::{AuthService, Identity};
use dutydesk_services::rank::AdminLevel;
use mongodb::{Client, Database, options::ClientOptions};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::mock_erlc::MockErlc;

/// A running test application with its own MongoDB database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub base_url: String,
    pub db: Database,
    pub settings: Settings,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a new test server connected to the test MongoDB.
    ///
    /// Requires a running MongoDB at localhost:27017.
    /// Set DUTYDESK__DATABASE__URL env var to override the connection string.
    /// Each test gets a unique database name for isolation.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a test server pointed at a mock game-server API.
    pub async fn spawn_with_erlc(mock: &MockErlc) -> Self {
        let base = mock.base_url();
        Self::spawn_with(move |settings| {
            settings.erlc.api_base = base;
        })
        .await
    }

    /// Spawn a test server with customized settings.
    ///
    /// The `mutator` closure receives a `&mut Settings` after test defaults
    /// are applied, allowing tests to tweak specific fields.
    pub async fn spawn_with(mutator: impl FnOnce(&mut Settings)) -> Self {
        let db_name = format!("dutydesk_test_{}", uuid::Uuid::new_v4().simple());

        let mut settings = test_settings();
        if let Ok(url) = std::env::var("DUTYDESK__DATABASE__URL") {
            settings.database.url = url;
        }
        settings.database.name = db_name.clone();

        // Apply caller's customizations
        mutator(&mut settings);

        let client_options = ClientOptions::parse(&settings.database.url)
            .await
            .expect("Failed to parse MongoDB URL");
        let mongo_client =
            Client::with_options(client_options).expect("Failed to create MongoDB client");
        let db = mongo_client.database(&db_name);

        ensure_indexes(&db).await.expect("Failed to create indexes");

        let app_state = AppState::new(db.clone(), settings.clone());
        let app = build_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            base_url,
            db,
            settings,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Mint a session token for a synthetic staff member, bypassing the
    /// OAuth dance. The token carries the given level and roles, exactly
    /// as a real login would after role resolution.
    pub fn token_for(&self, username: &str, level: AdminLevel, roles: &[&str]) -> String {
        let auth = AuthService::new(self.settings.session.clone());
        let identity = Identity {
            id: format!("user-{username}"),
            username: username.to_string(),
            avatar: None,
            admin_level: level,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };
        auth.issue_session(&identity)
            .expect("Failed to issue session token")
    }

    pub fn auth_get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn auth_post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    pub fn auth_put(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token)
    }

    pub fn auth_delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let db = self.db.clone();
        // Best effort cleanup: drop the test database
        tokio::spawn(async move {
            let _ = db.drop().await;
        });
    }
}

fn test_settings() -> Settings {
    Settings {
        app: dutydesk_config::AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
            frontend_url: "http://localhost:5001".to_string(),
        },
        database: dutydesk_config::DatabaseSettings {
            url: "mongodb://localhost:27017".to_string(),
            name: "dutydesk_test".to_string(),
            max_pool_size: Some(5),
            min_pool_size: Some(1),
        },
        session: dutydesk_config::SessionSettings {
            secret: "test-secret-key-for-session-signing-32ch".to_string(),
            ttl_secs: 3600,
            issuer: "dutydesk".to_string(),
        },
        discord: dutydesk_config::DiscordSettings {
            api_base: "http://localhost:5002".to_string(),
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: "http://localhost:5001/api/auth/callback".to_string(),
            guild_id: "guild-1".to_string(),
            bot_token: None,
        },
        erlc: dutydesk_config::ErlcSettings {
            api_base: "http://localhost:5003".to_string(),
            server_key: "test-server-key".to_string(),
            timeout_secs: 5,
        },
        reminders: dutydesk_config::ReminderSettings {
            tick_secs: 3600,
            cron_secret: None,
        },
        roles: dutydesk_config::RoleSettings {
            direction_board: vec!["role-board".to_string()],
            management: vec!["role-management".to_string()],
            internal_affairs: vec!["role-ia".to_string()],
            administrator: vec!["role-admin".to_string()],
            moderator: vec!["role-mod".to_string()],
            trainee_mod: vec!["role-trainee".to_string()],
        },
        shifts: dutydesk_config::ShiftRoleSettings {
            moderating: "role-shift-moderating".to_string(),
            hr_supervisor: "role-shift-hr".to_string(),
            fifty_fifty: "role-shift-5050".to_string(),
            on_duty: "role-on-duty".to_string(),
        },
    }
}
