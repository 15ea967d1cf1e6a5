//! calico-st 공통 타입
//!
//! 시스템 테스트 헬퍼 크레이트들이 공유하는 에러 타입과 설정을 제공합니다.
//!
//! - [`error`]: 에러 타입 (`StError`, `CommandExecError`, `AssertionError`, ...)
//! - [`config`]: `calico-st.toml` 설정 (`StConfig`)

pub mod config;
pub mod error;

// --- 주요 타입 re-export ---

// 에러
pub use error::{AssertionError, CommandExecError, ConfigError, ErrorKind, ParseError, StError};

// 설정
pub use config::{GeneralConfig, HostConfig, RetryConfig, StConfig};
