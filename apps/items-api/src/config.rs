use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_items::ProcessorConfig;

pub use core_config::Environment;

/// Service configuration assembled from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub processor: ProcessorConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let processor = ProcessorConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            processor,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/items")),
                ("PORT", Some("9090")),
                ("APP_ENV", Some("production")),
                ("ITEMS_PROCESSOR_WORKERS", Some("4")),
                ("ITEMS_PROCESSOR_TASK_TIMEOUT_SECS", Some("2")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "items_api");
                assert_eq!(config.database.url, "postgresql://localhost/items");
                assert_eq!(config.server.port, 9090);
                assert!(config.environment.is_production());
                assert_eq!(config.processor.workers, 4);
                assert_eq!(config.processor.task_timeout, Some(Duration::from_secs(2)));
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_rejects_zero_workers() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/items")),
                ("ITEMS_PROCESSOR_WORKERS", Some("0")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("ITEMS_PROCESSOR_WORKERS"));
            },
        );
    }
}
