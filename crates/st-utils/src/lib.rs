//! calico-st 시스템 테스트 헬퍼
//!
//! 외부 테스트 하네스에서 calicoctl을 검증할 때 쓰는 얇은 어댑터 모음입니다.
//!
//! # Module Structure
//!
//! - [`exec`]: 셸 명령 실행 (`log_and_run`)
//! - [`retry`]: 성공할 때까지 재시도 (`RetryPolicy`, `retry_until_success`)
//! - [`ip`]: 로컬 호스트 IP 탐지 (`get_ip`, `RouteProbe`)
//! - [`table`]: 파이프 구분 테이블 행 파싱 (`Row`)
//! - [`host`]: 명령 실행 대상 호스트 (`Host` trait, `LocalHost`)
//! - [`network`]: `docker network inspect` 출력 파싱
//! - [`assertions`]: 엔드포인트 수 / 프로파일 / 네트워크 단언
//!
//! # Architecture
//!
//! ```text
//! test harness
//!      |
//! assertions::assert_*()  --retry::RetryPolicy-->  (flaky checks)
//!      |
//! Host::calicoctl() / Host::execute()
//!      |
//! exec::log_and_run()  -->  sh -c
//!      |
//! table::Row / network::first_network_id()
//! ```

pub mod assertions;
pub mod exec;
pub mod host;
pub mod ip;
pub mod network;
pub mod retry;
pub mod table;

// --- Public API Re-exports ---

pub use assertions::{assert_network, assert_number_endpoints, assert_profile, get_profile_name};
pub use exec::log_and_run;
pub use host::{Host, LocalHost};
pub use ip::{RouteProbe, UdpRouteProbe, get_ip, resolve_local_ip};
pub use retry::{RetryPolicy, on_kind, retry_until_success, retry_until_success_if};
pub use table::{Row, find_row, parse_table};

pub use calico_st_core::{ErrorKind, StError};
