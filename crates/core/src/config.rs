//! 설정 관리 — calico-st.toml 파싱 및 런타임 설정
//!
//! [`StConfig`]는 테스트 헬퍼가 사용하는 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CALICO_ST_RETRY_RETRIES=3` 형식, 로컬 IP는 `MY_IP`)
//! 3. 설정 파일 (`calico-st.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), calico_st_core::error::StError> {
//! use calico_st_core::config::StConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = StConfig::load("calico-st.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = StConfig::parse("[retry]\nretries = 3")?;
//! # Ok(())
//! # }
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, StError};

/// 로컬 IP 오버라이드 환경변수
pub const LOCAL_IP_ENV: &str = "MY_IP";

/// 출구 인터페이스 탐지에 사용하는 기본 주소 (패킷은 전송되지 않음)
pub const DEFAULT_PROBE_TARGET: &str = "8.8.8.8:80";

/// 재시도 설정 상한값
const MAX_RETRIES: u32 = 1000;
const MAX_RETRY_INTERVAL_MS: u64 = 60_000;

/// calico-st 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 대상 호스트 설정
    #[serde(default)]
    pub host: HostConfig,
    /// 재시도 설정
    #[serde(default)]
    pub retry: RetryConfig,
}

impl StConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    pub fn from_env() -> Result<Self, StError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                StError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, StError> {
        toml::from_str(toml_str).map_err(|e| {
            StError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CALICO_ST_{SECTION}_{FIELD}`
    /// 예외: 로컬 IP는 기존 하네스와 호환되도록 `MY_IP`를 사용합니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CALICO_ST_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CALICO_ST_GENERAL_LOG_FORMAT");

        // Host
        override_opt_string(&mut self.host.local_ip, LOCAL_IP_ENV);
        override_opt_string(&mut self.host.hostname, "CALICO_ST_HOST_HOSTNAME");
        override_string(&mut self.host.calicoctl, "CALICO_ST_HOST_CALICOCTL");
        override_string(&mut self.host.docker, "CALICO_ST_HOST_DOCKER");
        override_string(&mut self.host.probe_target, "CALICO_ST_HOST_PROBE_TARGET");

        // Retry
        override_u32(&mut self.retry.retries, "CALICO_ST_RETRY_RETRIES");
        override_u64(&mut self.retry.interval_ms, "CALICO_ST_RETRY_INTERVAL_MS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), StError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.host.calicoctl.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host.calicoctl".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.host.docker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host.docker".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.host.probe_target.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "host.probe_target".to_owned(),
                reason: format!(
                    "'{}' is not a socket address (ip:port)",
                    self.host.probe_target
                ),
            }
            .into());
        }

        if self.retry.retries > MAX_RETRIES {
            return Err(ConfigError::InvalidValue {
                field: "retry.retries".to_owned(),
                reason: format!("must be 0-{MAX_RETRIES}"),
            }
            .into());
        }

        if self.retry.interval_ms > MAX_RETRY_INTERVAL_MS {
            return Err(ConfigError::InvalidValue {
                field: "retry.interval_ms".to_owned(),
                reason: format!("must be 0-{MAX_RETRY_INTERVAL_MS}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 대상 호스트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// 로컬 IP (설정 시 자동 탐지를 건너뜀)
    pub local_ip: Option<String>,
    /// calicoctl 출력에서 찾을 호스트명 (미설정 시 `uname -n` 사용)
    pub hostname: Option<String>,
    /// calicoctl 실행 파일
    pub calicoctl: String,
    /// docker 실행 파일
    pub docker: String,
    /// 로컬 IP 탐지용 UDP connect 대상
    pub probe_target: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            local_ip: None,
            hostname: None,
            calicoctl: "calicoctl".to_owned(),
            docker: "docker".to_owned(),
            probe_target: DEFAULT_PROBE_TARGET.to_owned(),
        }
    }
}

impl HostConfig {
    /// 파싱된 probe 대상 주소. `validate()`를 통과한 설정이면 항상 성공합니다.
    pub fn probe_addr(&self) -> Result<SocketAddr, StError> {
        self.probe_target.parse().map_err(|_| {
            StError::Config(ConfigError::InvalidValue {
                field: "host.probe_target".to_owned(),
                reason: format!("'{}' is not a socket address", self.probe_target),
            })
        })
    }
}

/// 재시도 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// 첫 시도 이후 추가 시도 횟수 (0이면 한 번만 실행)
    pub retries: u32,
    /// 재시도 간격 (밀리초)
    pub interval_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 10,
            interval_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// 재시도 간격
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = Some(val);
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
