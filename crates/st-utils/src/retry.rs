//! 성공할 때까지 재시도
//!
//! 백오프 전략이 없는 단순 재시도입니다. `retries`는 첫 시도 이후의 추가
//! 시도 횟수이므로 전체 시도 횟수는 `retries + 1`입니다. 재시도 예산을 모두
//! 소진하면 마지막 에러를 감싸지 않고 그대로 반환합니다.

use std::time::Duration;

use calico_st_core::config::RetryConfig;
use calico_st_core::error::{ErrorKind, StError};
use tracing::{debug, warn};

/// 기본 재시도 횟수
pub const DEFAULT_RETRIES: u32 = 10;

/// 기본 재시도 간격
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// 재시도 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 첫 시도 이후 추가 시도 횟수
    pub retries: u32,
    /// 실패 후 다음 시도까지 대기 시간
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            retries: config.retries,
            interval: config.interval(),
        }
    }
}

impl RetryPolicy {
    /// 지정한 재시도 횟수와 기본 간격으로 정책을 생성합니다.
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }

    /// 재시도 간격을 변경합니다.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 어떤 에러든 재시도합니다.
    pub fn run<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: std::fmt::Display,
    {
        self.run_if(op, |_| true)
    }

    /// `should_retry`가 `true`를 반환하는 에러만 재시도합니다.
    ///
    /// 그 외 에러는 재시도 횟수를 소비하지 않고 즉시 반환됩니다.
    pub fn run_if<T, E, F, P>(&self, mut op: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < self.retries && should_retry(&e) => {
                    attempt += 1;
                    warn!(
                        attempt,
                        retries = self.retries,
                        error = %e,
                        "operation failed, retrying"
                    );
                    std::thread::sleep(self.interval);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// `op`가 성공할 때까지 최대 `retries`번 재시도합니다 (간격 1초).
///
/// `retries`가 0이면 재시도 없이 한 번만 실행합니다.
pub fn retry_until_success<T, E, F>(op: F, retries: u32) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    RetryPolicy::new(retries).run(op)
}

/// [`retry_until_success`]와 같지만 `should_retry`에 맞는 에러만 재시도합니다.
pub fn retry_until_success_if<T, E, F, P>(op: F, retries: u32, should_retry: P) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    RetryPolicy::new(retries).run_if(op, should_retry)
}

/// 특정 종류의 [`StError`]만 재시도하는 조건자
///
/// ```
/// use calico_st_utils::retry::{RetryPolicy, on_kind};
/// use calico_st_core::{ErrorKind, StError};
///
/// let policy = RetryPolicy::new(0);
/// let result: Result<(), StError> =
///     policy.run_if(|| Ok(()), on_kind(ErrorKind::CommandExec));
/// assert!(result.is_ok());
/// ```
pub fn on_kind(kind: ErrorKind) -> impl Fn(&StError) -> bool {
    move |e| e.kind() == kind
}
