//! Gate engine benchmarks.
//!
//! Benchmarks: full gate run over change sets of 10, 100, and 1000 Python
//! files, sequential vs. parallel scheduling.
//! Run with: cargo bench -p gatekeep-analysis --bench engine_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gatekeep_analysis::enforcement::GateEngine;
use gatekeep_core::{ChangeSet, GateConfig};
use tempfile::TempDir;

/// Lay out a project with `n` changed source files, a schema change, one new
/// migration, and a coverage report.
fn fixture(n: usize) -> (TempDir, ChangeSet) {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("app/pkg")).expect("mkdir");
    std::fs::create_dir_all(root.join("app/models")).expect("mkdir");
    std::fs::create_dir_all(root.join("app/migrations")).expect("mkdir");
    std::fs::create_dir_all(root.join("cov")).expect("mkdir");

    let mut paths = Vec::with_capacity(n + 2);
    for idx in 0..n {
        let rel = format!("app/pkg/module_{idx}.py");
        let body = format!(
            "def handler_{idx}(request):\n    # regular comment\n    return request.json() * {idx}\n"
        );
        std::fs::write(root.join(&rel), body).expect("write source");
        paths.push(rel);
    }
    std::fs::write(root.join("app/models/user.py"), "class User:\n    pass\n")
        .expect("write model");
    std::fs::write(root.join("app/migrations/0002_user.py"), "").expect("write migration");
    std::fs::write(root.join("cov/coverage.xml"), r#"<coverage line-rate="0.91"/>"#)
        .expect("write coverage");
    paths.push("app/models/user.py".to_string());
    paths.push("app/migrations/0002_user.py".to_string());

    let change_set = ChangeSet::new(&paths).expect("change set");
    (dir, change_set)
}

fn gate_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_run");
    group.sample_size(20);

    for n in [10usize, 100, 1000] {
        let (dir, change_set) = fixture(n);
        let config = GateConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };

        for parallel in [false, true] {
            let engine = GateEngine::with_default_rules().with_parallel(parallel);
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &change_set, |b, cs| {
                b.iter(|| engine.run_change_set(cs, &config).expect("gate run"));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, gate_run);
criterion_main!(benches);
