//! 테이블 행 파싱 벤치마크
//!
//! calicoctl `endpoint show` 출력 크기별 행 검색 성능을 측정합니다.

use calico_st_utils::table::{NAME_COLUMN, Row, find_row};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn endpoint_table(hosts: usize) -> String {
    let mut out = String::from(
        "+----------+-----------------+---------------------+---------------------+\n\
         | Hostname | Orchestrator ID | Number of Workloads | Number of Endpoints |\n\
         +----------+-----------------+---------------------+---------------------+\n",
    );
    for i in 0..hosts {
        out.push_str(&format!(
            "| host-{i:05} | docker          |          {w}          |          {w}          |\n",
            w = i % 10
        ));
    }
    out.push_str("+----------+-----------------+---------------------+---------------------+");
    out
}

fn bench_row_parse(c: &mut Criterion) {
    let line = "| host-00042 | docker          |          3          |          3          |";
    c.bench_function("row_parse", |b| b.iter(|| Row::parse(black_box(line))));
}

fn bench_find_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_row");
    for hosts in [10usize, 100, 1000] {
        let table = endpoint_table(hosts);
        let last = format!("host-{:05}", hosts - 1);
        group.throughput(Throughput::Bytes(table.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hosts), &table, |b, table| {
            b.iter(|| find_row(black_box(table), NAME_COLUMN, black_box(&last)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_row_parse, bench_find_row);
criterion_main!(benches);
