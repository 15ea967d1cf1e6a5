//! 파이프 구분 테이블 행 파싱
//!
//! calicoctl의 `show` 명령은 다음과 같은 표를 출력합니다.
//!
//! ```text
//! +----------+-----------------+---------------------+---------------------+
//! | Hostname | Orchestrator ID | Number of Workloads | Number of Endpoints |
//! +----------+-----------------+---------------------+---------------------+
//! | host-a   | docker          |          2          |          3          |
//! +----------+-----------------+---------------------+---------------------+
//! ```
//!
//! 각 줄은 앞뒤 공백을 제거한 뒤 `|`마다 나누고 조각마다 공백을 제거합니다.
//! 줄이 `|`로 시작하므로 0번 컬럼은 빈 문자열이고 첫 데이터 컬럼은 1번입니다.
//! 컬럼 인덱스는 CLI 출력 형식과의 위치 기반 계약이며 스키마 검증은 하지 않습니다.

/// 이름 컬럼 (Hostname, Name)
pub const NAME_COLUMN: usize = 1;

/// `endpoint show`의 엔드포인트 수 컬럼
pub const ENDPOINT_COUNT_COLUMN: usize = 4;

/// 파싱된 테이블 한 행
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
}

impl Row {
    /// 한 줄을 컬럼으로 나눕니다.
    pub fn parse(line: &str) -> Self {
        let columns = line
            .trim()
            .split('|')
            .map(|column| column.trim().to_owned())
            .collect();
        Self { columns }
    }

    /// `index`번 컬럼
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 구분자가 하나라도 있는 행인지 여부. 빈 줄과 `+---+` 테두리는 `false`.
    pub fn is_data(&self) -> bool {
        self.columns.len() > 1
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// 명령 출력 전체를 행 단위로 파싱합니다.
pub fn parse_table(output: &str) -> impl Iterator<Item = Row> + '_ {
    output.split('\n').map(Row::parse)
}

/// `column`번 컬럼이 `key`와 같은 첫 데이터 행을 찾습니다.
pub fn find_row(output: &str, column: usize, key: &str) -> Option<Row> {
    parse_table(output).find(|row| row.is_data() && row.column(column) == Some(key))
}
