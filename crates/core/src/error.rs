//! 에러 타입 — 도메인별 에러 정의
//!
//! 모든 헬퍼는 [`StError`]를 반환합니다. 재시도 헬퍼가 에러 종류별로
//! 필터링할 수 있도록 [`StError::kind`]가 [`ErrorKind`] 태그를 제공합니다.

use std::fmt;

/// calico-st 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum StError {
    /// 셸 명령이 0이 아닌 종료 코드로 끝남
    #[error(transparent)]
    CommandExec(#[from] CommandExecError),

    /// 테스트 단언 실패
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionError),

    /// 명령 출력 파싱 실패
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O 에러 (프로세스 생성, 소켓 등)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StError {
    /// 이 에러의 종류 태그를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CommandExec(_) => ErrorKind::CommandExec,
            Self::Assertion(_) => ErrorKind::Assertion,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// [`StError`] 변형을 구분하는 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CommandExec,
    Assertion,
    Parse,
    Config,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommandExec => "command_exec",
            Self::Assertion => "assertion",
            Self::Parse => "parse",
            Self::Config => "config",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

/// 셸 명령 실행 실패
///
/// 종료 코드만으로는 원인을 알기 어려우므로 캡처한 출력을 함께 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("command '{command}' failed with exit code {}:\n{output}", display_code(.returncode))]
pub struct CommandExecError {
    /// 실행한 명령 문자열
    pub command: String,
    /// 종료 코드 (시그널로 종료된 경우 `None`)
    pub returncode: Option<i32>,
    /// stdout/stderr를 합친 출력
    pub output: String,
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_owned(),
    }
}

/// 테스트 단언 실패
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    /// 엔드포인트 수 불일치
    #[error("Incorrect number of endpoints: \nExpected: {expected}; Actual: {actual}")]
    EndpointCount { expected: u32, actual: u32 },

    /// 프로파일이 등록되어 있지 않음
    #[error("Profile {0} not found in Calico")]
    ProfileNotFound(String),

    /// Docker 네트워크가 존재하지 않음
    #[error("Docker network {0} not found")]
    NetworkNotFound(String),
}

/// 명령 출력 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 행에 필요한 컬럼이 없음
    #[error("missing column {index} in row '{line}'")]
    MissingColumn { index: usize, line: String },

    /// 정수가 아닌 컬럼 값
    #[error("column {index} is not an integer: '{value}'")]
    InvalidInteger { index: usize, value: String },

    /// inspect 결과가 빈 배열
    #[error("inspect output for '{0}' is empty")]
    EmptyInspect(String),

    /// JSON 파싱 실패
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
