//! calicoctl / docker 출력 단언
//!
//! 각 헬퍼는 [`Host`]를 통해 명령을 실행하고 출력에서 이름으로 행을 찾은 뒤
//! 조건이 맞지 않으면 [`AssertionError`]를 반환합니다. 결과가 늦게 반영되는
//! 검사는 [`RetryPolicy`](crate::retry::RetryPolicy)로 감싸서 호출합니다.
//!
//! ```no_run
//! use calico_st_core::ErrorKind;
//! use calico_st_utils::{LocalHost, RetryPolicy, assert_number_endpoints, on_kind};
//!
//! let host = LocalHost::default();
//! RetryPolicy::default().run_if(
//!     || assert_number_endpoints(&host, 2),
//!     on_kind(ErrorKind::Assertion),
//! )?;
//! # Ok::<(), calico_st_core::StError>(())
//! ```

use calico_st_core::error::{AssertionError, ParseError, StError};
use tracing::debug;

use crate::host::Host;
use crate::network;
use crate::table::{ENDPOINT_COUNT_COLUMN, NAME_COLUMN, find_row};

/// 호스트의 엔드포인트 수가 `expected`인지 확인합니다.
///
/// `calicoctl endpoint show`에서 1번 컬럼이 호스트명인 행을 찾아 4번 컬럼을
/// 실제 값으로 읽습니다. 해당 행이 없으면 실제 값은 0입니다.
///
/// # Errors
///
/// - `StError::Assertion`: 엔드포인트 수 불일치
/// - `StError::Parse`: 일치하는 행에 4번 컬럼이 없거나 정수가 아님
/// - 명령 실행 에러는 그대로 전파
pub fn assert_number_endpoints<H: Host>(host: H, expected: u32) -> Result<(), StError> {
    let hostname = host.hostname()?;
    let output = host.calicoctl("endpoint show")?;

    let actual = match find_row(&output, NAME_COLUMN, &hostname) {
        Some(row) => {
            let value = row.column(ENDPOINT_COUNT_COLUMN).ok_or_else(|| {
                ParseError::MissingColumn {
                    index: ENDPOINT_COUNT_COLUMN,
                    line: row.columns().join(" | "),
                }
            })?;
            value
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidInteger {
                    index: ENDPOINT_COUNT_COLUMN,
                    value: value.to_owned(),
                })?
        }
        None => {
            debug!(hostname = hostname.as_str(), "host not listed, counting 0 endpoints");
            0
        }
    };

    if actual != expected {
        return Err(AssertionError::EndpointCount { expected, actual }.into());
    }
    Ok(())
}

/// 프로파일이 calico에 등록되어 있는지 확인합니다.
///
/// `calicoctl profile show`에서 1번 컬럼이 `profile_name`인 행을 찾습니다.
pub fn assert_profile<H: Host>(host: H, profile_name: &str) -> Result<(), StError> {
    let output = host.calicoctl("profile show")?;

    if find_row(&output, NAME_COLUMN, profile_name).is_none() {
        return Err(AssertionError::ProfileNotFound(profile_name.to_owned()).into());
    }
    Ok(())
}

/// 네트워크에 대해 docker가 만든 프로파일 이름(네트워크 ID)을 반환합니다.
pub fn get_profile_name<H: Host>(host: H, network: &str) -> Result<String, StError> {
    let raw = host.execute(&network::inspect_command(host.docker_bin(), network))?;
    network::first_network_id(network, &raw)
}

/// docker 네트워크가 존재하는지 확인합니다.
///
/// inspect 명령이 실패하면 [`AssertionError::NetworkNotFound`]를 반환합니다.
/// 명령 실패가 아닌 에러(프로세스 생성 실패 등)는 그대로 전파합니다.
pub fn assert_network<H: Host>(host: H, network: &str) -> Result<(), StError> {
    match host.execute(&network::inspect_command(host.docker_bin(), network)) {
        Ok(_) => Ok(()),
        Err(StError::CommandExec(e)) => {
            debug!(network, error = %e, "network inspect failed");
            Err(AssertionError::NetworkNotFound(network.to_owned()).into())
        }
        Err(e) => Err(e),
    }
}
