#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Atlas cluster the catalog's credentials belong to.
pub const DEFAULT_ATLAS_HOST: &str = "cluster0.18ceobk.mongodb.net";

/// Database holding the toy catalog.
pub const DEFAULT_DATABASE: &str = "toyVillage";

/// MongoDB connection settings
///
/// Either built from a full connection string or composed from Atlas
/// credentials via [`MongoConfig::from_credentials`].
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string: mongodb[+srv]://[user:pass@]host[:port]/[?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the driver pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the driver pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,

    /// Pin the Stable API (v1, strict, deprecation errors)
    pub stable_api: bool,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Compose an Atlas SRV connection string from a username and password.
    ///
    /// Both credentials are percent-encoded, so passwords containing `@`, `:`
    /// or `/` survive intact.
    pub fn from_credentials(user: &str, password: &str, host: &str) -> Self {
        let url = format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            urlencoding::encode(user),
            urlencoding::encode(password),
            host
        );
        Self::new(url)
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with the password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match userinfo.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
            stable_api: true,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Connection string, first match wins:
/// - `MONGODB_URL` or `MONGO_URL`
/// - `DB_USER` + `DB_PASS`, composed against `MONGODB_HOST`
///   (default: the catalog's Atlas cluster)
///
/// Optional:
/// - `MONGODB_DATABASE` / `MONGO_DATABASE` (default: toyVillage)
/// - `MONGODB_APP_NAME`
/// - `MONGODB_MAX_POOL_SIZE` (100), `MONGODB_MIN_POOL_SIZE` (5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (30)
/// - `MONGODB_STABLE_API` (true)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let explicit_url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .ok();

        let base = match explicit_url {
            Some(url) => Self::new(url),
            None => match (std::env::var("DB_USER"), std::env::var("DB_PASS")) {
                (Ok(user), Ok(password)) => {
                    let host = env_or_default("MONGODB_HOST", DEFAULT_ATLAS_HOST);
                    Self::from_credentials(&user, &password, &host)
                }
                _ => {
                    return Err(ConfigError::MissingEnvVar(
                        "MONGODB_URL or DB_USER/DB_PASS".to_string(),
                    ));
                }
            },
        };

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Ok(Self {
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", base.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", base.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                base.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                base.server_selection_timeout_secs,
            )?,
            stable_api: env_parse_or("MONGODB_STABLE_API", base.stable_api)?,
            ..base
        })
    }
}
