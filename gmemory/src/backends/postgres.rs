use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gcommon::{BoxFuture, ConfigurationError, SecretString, SessionId, env_parse, env_var};
use tokio_postgres::NoTls;

use crate::backend::SessionBackend;
use crate::error::MemoryError;
use crate::types::{ConversationTurn, SessionRecord};

pub const ENV_HOST: &str = "POSTGRES_HOST";
pub const ENV_PORT: &str = "POSTGRES_PORT";
pub const ENV_DATABASE: &str = "POSTGRES_DB";
pub const ENV_USER: &str = "POSTGRES_USER";
pub const ENV_PASSWORD: &str = "POSTGRES_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresSessionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: SecretString,
}

impl Default for PostgresSessionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            username: "postgres".to_string(),
            password: SecretString::new(""),
        }
    }
}

impl PostgresSessionConfig {
    /// Unset variables keep their defaults; a malformed port is an error.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_var(ENV_HOST).unwrap_or(defaults.host),
            port: env_parse::<u16>(ENV_PORT)?.unwrap_or(defaults.port),
            database: env_var(ENV_DATABASE).unwrap_or(defaults.database),
            username: env_var(ENV_USER).unwrap_or(defaults.username),
            password: env_var(ENV_PASSWORD)
                .map(SecretString::from)
                .unwrap_or(defaults.password),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PostgresSessionBackend {
    config: PostgresSessionConfig,
}

impl PostgresSessionBackend {
    pub fn new(config: PostgresSessionConfig) -> Result<Self, MemoryError> {
        if config.host.trim().is_empty() {
            return Err(MemoryError::configuration("postgres host cannot be empty"));
        }
        if config.database.trim().is_empty() {
            return Err(MemoryError::configuration("postgres database cannot be empty"));
        }
        if config.username.trim().is_empty() {
            return Err(MemoryError::configuration("postgres username cannot be empty"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PostgresSessionConfig {
        &self.config
    }

    async fn connect_client(&self) -> Result<tokio_postgres::Client, MemoryError> {
        let mut config = tokio_postgres::Config::new();
        config.host(&self.config.host);
        config.port(self.config.port);
        config.dbname(&self.config.database);
        config.user(&self.config.username);
        config.password(self.config.password.expose());

        let (client, connection) = config.connect(NoTls).await.map_err(|error| {
            MemoryError::storage(format!("failed to connect to postgres: {error}"))
        })?;

        tokio::spawn(async move {
            if let Err(error) = connection.await {
                tracing::warn!(error = %error, "gmemory postgres connection error");
            }
        });

        client
            .batch_execute(
                "
                CREATE TABLE IF NOT EXISTS conversation_sessions (
                    session_id TEXT PRIMARY KEY,
                    user_id TEXT,
                    history JSONB NOT NULL,
                    start_time_secs BIGINT NOT NULL,
                    start_time_nanos BIGINT NOT NULL,
                    last_activity_secs BIGINT NOT NULL,
                    last_activity_nanos BIGINT NOT NULL
                );
                ",
            )
            .await
            .map_err(|error| {
                MemoryError::storage(format!("failed to initialize postgres schema: {error}"))
            })?;

        Ok(client)
    }
}

impl SessionBackend for PostgresSessionBackend {
    fn store<'a>(&'a self, record: SessionRecord) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let history = serde_json::to_value(&record.history).map_err(|error| {
                MemoryError::storage(format!("failed to serialize conversation history: {error}"))
            })?;
            let (start_secs, start_nanos) = encode_system_time(record.start_time)?;
            let (activity_secs, activity_nanos) = encode_system_time(record.last_activity)?;
            let client = self.connect_client().await?;
            client
                .execute(
                    "
                    INSERT INTO conversation_sessions
                        (session_id, user_id, history,
                         start_time_secs, start_time_nanos,
                         last_activity_secs, last_activity_nanos)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (session_id)
                    DO UPDATE SET
                        user_id = EXCLUDED.user_id,
                        history = EXCLUDED.history,
                        start_time_secs = EXCLUDED.start_time_secs,
                        start_time_nanos = EXCLUDED.start_time_nanos,
                        last_activity_secs = EXCLUDED.last_activity_secs,
                        last_activity_nanos = EXCLUDED.last_activity_nanos
                    ",
                    &[
                        &record.session_id.as_str(),
                        &record.user_id,
                        &history,
                        &start_secs,
                        &start_nanos,
                        &activity_secs,
                        &activity_nanos,
                    ],
                )
                .await
                .map_err(|error| {
                    MemoryError::storage(format!("failed to upsert conversation session: {error}"))
                })?;
            Ok(())
        })
    }

    fn fetch<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<Option<SessionRecord>, MemoryError>> {
        Box::pin(async move {
            let client = self.connect_client().await?;
            let row = client
                .query_opt(
                    "
                    SELECT user_id, history,
                           start_time_secs, start_time_nanos,
                           last_activity_secs, last_activity_nanos
                    FROM conversation_sessions
                    WHERE session_id = $1
                    ",
                    &[&session_id.as_str()],
                )
                .await
                .map_err(|error| {
                    MemoryError::storage(format!("failed to query conversation session: {error}"))
                })?;

            let Some(row) = row else {
                return Ok(None);
            };

            let history = serde_json::from_value::<Vec<ConversationTurn>>(
                row.get::<usize, serde_json::Value>(1),
            )
            .map_err(|error| {
                MemoryError::storage(format!("failed to deserialize conversation history: {error}"))
            })?;

            Ok(Some(SessionRecord {
                session_id: session_id.clone(),
                user_id: row.get::<usize, Option<String>>(0),
                history,
                start_time: decode_system_time(
                    row.get::<usize, i64>(2),
                    row.get::<usize, i64>(3),
                )?,
                last_activity: decode_system_time(
                    row.get::<usize, i64>(4),
                    row.get::<usize, i64>(5),
                )?,
            }))
        })
    }

    fn delete<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let client = self.connect_client().await?;
            client
                .execute(
                    "DELETE FROM conversation_sessions WHERE session_id = $1",
                    &[&session_id.as_str()],
                )
                .await
                .map_err(|error| {
                    MemoryError::storage(format!("failed to delete conversation session: {error}"))
                })?;
            Ok(())
        })
    }

    fn exists<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<bool, MemoryError>> {
        Box::pin(async move {
            let client = self.connect_client().await?;
            let row = client
                .query_opt(
                    "SELECT 1 FROM conversation_sessions WHERE session_id = $1",
                    &[&session_id.as_str()],
                )
                .await
                .map_err(|error| {
                    MemoryError::storage(format!("failed to query conversation session: {error}"))
                })?;
            Ok(row.is_some())
        })
    }
}

fn encode_system_time(value: SystemTime) -> Result<(i64, i64), MemoryError> {
    let elapsed = value.duration_since(UNIX_EPOCH).map_err(|error| {
        MemoryError::invalid_request(format!("timestamp predates unix epoch: {error}"))
    })?;
    let seconds = i64::try_from(elapsed.as_secs()).map_err(|_| {
        MemoryError::invalid_request(format!(
            "timestamp seconds do not fit in BIGINT: {}",
            elapsed.as_secs()
        ))
    })?;
    Ok((seconds, i64::from(elapsed.subsec_nanos())))
}

fn decode_system_time(seconds: i64, nanos: i64) -> Result<SystemTime, MemoryError> {
    let seconds = u64::try_from(seconds).map_err(|_| {
        MemoryError::storage(format!(
            "timestamp seconds must be non-negative, got {seconds}"
        ))
    })?;
    let nanos = u32::try_from(nanos)
        .ok()
        .filter(|nanos| *nanos < 1_000_000_000)
        .ok_or_else(|| {
            MemoryError::storage(format!(
                "timestamp nanos must be in [0, 1_000_000_000), got {nanos}"
            ))
        })?;
    Ok(UNIX_EPOCH + Duration::new(seconds, nanos))
}
