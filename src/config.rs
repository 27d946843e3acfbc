use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 요청 본문 최대 크기(바이트)
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// 시작 시 테이블 재생성 여부 (개발용)
    pub recreate: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// 만료 경매 / 세션 정리 주기(초). 0 이면 스케줄러를 띄우지 않는다.
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            // config/auction.toml (없어도 됨)
            .add_source(File::with_name("config/auction").required(false))
            // 환경 변수 (예: AUCTION__SERVER__PORT=8080)
            .add_source(Environment::with_prefix("AUCTION").separator("__"))
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.body_limit_bytes", 1024 * 1024)?
            .set_default("database.url", "postgres://localhost/auctions")?
            .set_default("database.max_connections", 5)?
            .set_default("database.recreate", false)?
            .set_default("auth.session_ttl_hours", 24 * 7)?
            .set_default("scheduler.interval_secs", 3600)
    }

    /// 기본값만으로 구성 (테스트용)
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::defaults().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert_eq!(config.scheduler.interval_secs, 3600);
        assert!(!config.database.recreate);
    }
}
