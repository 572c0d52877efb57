//! 配置基础设施
//!
//! 默认值之上叠加环境变量 `PORT`、`DATABASE_URL`、`DATABASE_NAME`。

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: None,
            database_name: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&["PORT", "DATABASE_URL", "DATABASE_NAME"]))
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn database_url_set(&self) -> bool {
        non_empty(&self.database_url).is_some()
    }

    pub fn database_name_set(&self) -> bool {
        non_empty(&self.database_name).is_some()
    }

    /// 两者都设置时返回 `(url, name)`
    pub fn database_settings(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.database_url)?, non_empty(&self.database_name)?))
    }
}
