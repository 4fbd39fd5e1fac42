use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_ssm::Client as SsmClient;
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Deserialize)]
struct EnvironmentSelector {
    #[serde(default)]
    app_env: Environment,
}

impl Environment {
    /// Reads `APP_ENV`, falling back to development when it is unset.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let selector: EnvironmentSelector = Figment::new()
            .merge(Env::raw().only(&["APP_ENV"]))
            .extract()?;

        Ok(selector.app_env)
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {0}")]
    Extract(#[from] figment::Error),
    #[error("Failed to read SSM parameter '{name}': {reason}")]
    Ssm { name: String, reason: String },
    #[error("Failed to read secret '{secret_id}': {reason}")]
    SecretsManager { secret_id: String, reason: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub table_name: String,
    pub max_connections: u32,
}

/// Values every environment shares.
#[derive(Serialize)]
struct CommonDefaults {
    table_name: &'static str,
    max_connections: u32,
}

/// Connection defaults for a local database; production has none.
#[derive(Serialize)]
struct DevelopmentDefaults {
    host: &'static str,
    port: u16,
    user: &'static str,
    password: &'static str,
    database: &'static str,
}

impl Configuration {
    pub async fn load(
        ssm_client: &SsmClient,
        secret_client: &SecretsManagerClient,
    ) -> Result<Self, ConfigurationError> {
        let environment = Environment::from_env()?;
        let ssm_configuration = Configuration::load_from_ssm(ssm_client).await?;
        let secret_configuration = Configuration::load_from_secret_manager(secret_client).await?;

        let config: Configuration = Configuration::figment(
            environment,
            ssm_configuration.as_deref(),
            secret_configuration.as_deref(),
        )
        .extract()?;

        tracing::info!("{}", config);
        Ok(config)
    }

    /// Layers, lowest precedence first: defaults, `DB_*` variables, the SSM JSON document,
    /// the Secrets Manager JSON secret.
    pub fn figment(
        environment: Environment,
        ssm_configuration: Option<&str>,
        secret_configuration: Option<&str>,
    ) -> Figment {
        let mut config = Figment::from(Serialized::defaults(CommonDefaults {
            table_name: "orders",
            max_connections: 1,
        }))
        .merge(Serialized::default("environment", environment));

        if environment == Environment::Development {
            config = config.merge(Serialized::defaults(DevelopmentDefaults {
                host: "localhost",
                port: 5432,
                user: "user",
                password: "password",
                database: "mydatabase",
            }));
        }

        // DB_NAME names the database, matching the usual Postgres client variables.
        config = config.merge(Env::prefixed("DB_").map(|key| {
            if key == "name" {
                "database".into()
            } else {
                key.into()
            }
        }));

        if let Some(ssm_configuration) = ssm_configuration {
            config = config.merge(Json::string(ssm_configuration));
        }
        if let Some(secret_configuration) = secret_configuration {
            config = config.merge(Json::string(secret_configuration));
        }

        config
    }

    async fn load_from_ssm(ssm_client: &SsmClient) -> Result<Option<String>, ConfigurationError> {
        let name = match std::env::var("CONFIGURATION_PARAMETER_NAME") {
            Ok(name) if !name.is_empty() => name,
            _ => return Ok(None),
        };

        let output = ssm_client
            .get_parameter()
            .name(&name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| ConfigurationError::Ssm {
                name: name.clone(),
                reason: e.into_service_error().to_string(),
            })?;

        output
            .parameter
            .and_then(|parameter| parameter.value)
            .map(Some)
            .ok_or_else(|| ConfigurationError::Ssm {
                name,
                reason: "parameter has no value".to_string(),
            })
    }

    async fn load_from_secret_manager(
        secret_client: &SecretsManagerClient,
    ) -> Result<Option<String>, ConfigurationError> {
        let secret_id = match std::env::var("SECRET_MANAGER_SECRET_ID") {
            Ok(secret_id) if !secret_id.is_empty() => secret_id,
            _ => return Ok(None),
        };

        let output = secret_client
            .get_secret_value()
            .secret_id(&secret_id)
            .send()
            .await
            .map_err(|e| ConfigurationError::SecretsManager {
                secret_id: secret_id.clone(),
                reason: e.into_service_error().to_string(),
            })?;

        output
            .secret_string
            .map(Some)
            .ok_or_else(|| ConfigurationError::SecretsManager {
                secret_id,
                reason: "secret has no string value".to_string(),
            })
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration {{ environment: {:?}, host: {}, port: {}, user: {}, database: {}, table_name: {}, max_connections: {} }}",
            self.environment,
            self.host,
            self.port,
            self.user,
            self.database,
            self.table_name,
            self.max_connections
        )
    }
}
