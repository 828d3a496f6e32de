use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use todo_service::config::JwtConfig;
use todo_service::domain::account::errors::AccountError;
use todo_service::domain::account::models::Account;
use todo_service::domain::account::models::AccountId;
use todo_service::domain::account::models::NewAccount;
use todo_service::domain::account::ports::AccountRepository;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::todo::errors::TodoError;
use todo_service::domain::todo::models::NewTodo;
use todo_service::domain::todo::models::Pagination;
use todo_service::domain::todo::models::Todo;
use todo_service::domain::todo::models::TodoId;
use todo_service::domain::todo::ports::TodoRepository;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::router::create_router;

static DATABASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt_config = JwtConfig {
            secret: TEST_SECRET.to_string(),
            algorithm: "HS256".to_string(),
            expiration_minutes: 30,
        };

        let authenticator = Arc::new(Authenticator::new(
            jwt_config.jwt_handler().expect("Invalid JWT config"),
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::default()),
            authenticator,
        ));
        let todo_service = Arc::new(TodoService::new(Arc::new(
            InMemoryTodoRepository::default(),
        )));

        let router = create_router(account_service, todo_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET.as_bytes()),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account with fixed names
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/v1/auth/register")
            .json(&json!({
                "email": email,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Submit the login form
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/v1/auth/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register then log in, returning the account ID and access token
    pub async fn signed_in(&self, email: &str) -> (i64, String) {
        let password = "correct-horse-battery";

        let body: serde_json::Value = self
            .register(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let id = body["data"]["id"].as_i64().expect("Missing account id");

        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let token = body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string();

        (id, token)
    }

    /// Create a todo and return its ID
    pub async fn create_todo(&self, token: &str, title: &str) -> i64 {
        let body: serde_json::Value = self
            .post_authenticated("/v1/todos", token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_i64().expect("Missing todo id")
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyRegistered);
        }

        let created = Account {
            id: AccountId(accounts.len() as i64 + 1),
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            password_hash: account.password_hash,
            created_at: account.created_at,
        };
        accounts.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email.as_str() == email).cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.email == account.email && a.id != account.id)
        {
            return Err(AccountError::EmailAlreadyRegistered);
        }

        let slot = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(|| AccountError::NotFound(account.id.to_string()))?;
        *slot = account.clone();

        Ok(account)
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepository {
    state: Mutex<(i64, Vec<Todo>)>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut state = self.state.lock().unwrap();
        state.0 += 1;

        let created = Todo {
            id: TodoId(state.0),
            owner_id: todo.owner_id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            completed: todo.completed,
            created_at: todo.created_at,
        };
        state.1.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let state = self.state.lock().unwrap();
        Ok(state.1.iter().find(|t| t.id == *id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &AccountId,
        pagination: &Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .1
            .iter()
            .filter(|t| t.owner_id == *owner)
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .1
            .iter_mut()
            .find(|t| t.id == todo.id)
            .ok_or(TodoError::NotFound(todo.id))?;
        *slot = todo.clone();

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.1.len();
        state.1.retain(|t| t.id != *id);

        if state.1.len() == before {
            return Err(TodoError::NotFound(*id));
        }

        Ok(())
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a fresh database on the server named by `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres repository test");
            return None;
        };

        let db_name = format!(
            "test_todo_service_{}_{}",
            std::process::id(),
            DATABASE_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
            .await
            .expect("Failed to drop stale test database");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
