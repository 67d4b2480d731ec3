use clap::ValueEnum;

use crate::error::SqlCourierError;

/// The database backend behind a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum DatabaseType {
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Connection options, validated before any connection attempt.
///
/// `prefix` is prepended to every bare table name; `return_query` makes
/// every operation outcome carry the generated SQL text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    /// Database name, or the file path / `:memory:` for `SQLite`.
    pub database: String,
    pub user: String,
    pub password: String,
    /// Table-name prefix, empty when unset.
    pub prefix: String,
    pub charset: Option<String>,
    /// Echo the generated SQL in every outcome.
    pub return_query: bool,
}

impl DbConfig {
    /// Fluent builder for a database with the given name/path.
    #[must_use]
    pub fn builder(database: impl Into<String>) -> DbConfigBuilder {
        DbConfigBuilder::new(database)
    }
}

/// Fluent builder for [`DbConfig`].
#[derive(Debug, Clone)]
pub struct DbConfigBuilder {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
    prefix: Option<String>,
    charset: Option<String>,
    return_query: bool,
}

impl DbConfigBuilder {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: database.into(),
            user: String::new(),
            password: String::new(),
            prefix: None,
            charset: None,
            return_query: false,
        }
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    #[must_use]
    pub fn return_query(mut self, return_query: bool) -> Self {
        self.return_query = return_query;
        self
    }

    /// Validate the options and produce the finished config.
    ///
    /// # Errors
    ///
    /// Returns `SqlCourierError::ConfigError` for an empty host, database,
    /// prefix, or charset, or a zero port — raised here, before any
    /// connection attempt.
    pub fn finish(self) -> Result<DbConfig, SqlCourierError> {
        if self.host.is_empty() {
            return Err(SqlCourierError::ConfigError(
                "invalid host, expecting non-empty string".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(SqlCourierError::ConfigError(
                "invalid port, expecting number larger than 0".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(SqlCourierError::ConfigError(
                "invalid database name, expecting non-empty string".to_string(),
            ));
        }
        if let Some(prefix) = &self.prefix {
            if prefix.is_empty() {
                return Err(SqlCourierError::ConfigError(
                    "invalid prefix, expecting non-empty string".to_string(),
                ));
            }
        }
        if let Some(charset) = &self.charset {
            if charset.is_empty() {
                return Err(SqlCourierError::ConfigError(
                    "invalid charset, expecting non-empty string".to_string(),
                ));
            }
        }

        Ok(DbConfig {
            host: self.host,
            port: self.port,
            database: self.database,
            user: self.user,
            password: self.password,
            prefix: self.prefix.unwrap_or_default(),
            charset: self.charset,
            return_query: self.return_query,
        })
    }
}
