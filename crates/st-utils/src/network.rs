//! `docker network inspect` 출력 파싱
//!
//! inspect는 조회한 네트워크마다 객체 하나씩 담은 JSON 배열을 반환합니다.
//! 여기서는 한 번에 하나만 조회하므로 첫 번째 항목만 읽습니다.

use calico_st_core::error::{ParseError, StError};
use serde::Deserialize;

/// inspect 항목 중 사용하는 필드
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInspect {
    /// 네트워크 ID. calico 드라이버는 이 값으로 프로파일을 만듭니다.
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Driver", default)]
    pub driver: String,
}

/// `docker network inspect` 명령 문자열
pub fn inspect_command(docker: &str, network: &str) -> String {
    format!("{docker} network inspect {network}")
}

/// inspect 출력에서 첫 번째 항목을 파싱합니다.
pub fn parse_first(network: &str, raw: &str) -> Result<NetworkInspect, StError> {
    let entries: Vec<NetworkInspect> = serde_json::from_str(raw).map_err(ParseError::from)?;
    entries
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::EmptyInspect(network.to_owned()).into())
}

/// inspect 출력에서 첫 번째 항목의 `Id`를 반환합니다.
pub fn first_network_id(network: &str, raw: &str) -> Result<String, StError> {
    parse_first(network, raw).map(|entry| entry.id)
}
