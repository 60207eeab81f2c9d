use codspeed_criterion_compat::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dynjson::{DynamicNode, Options};
use serde_json::{json, Value};

fn document(users: usize) -> Value {
    let users: Vec<Value> = (0..users)
        .map(|idx| {
            json!({
                "id": idx,
                "user-name": format!("user-{idx}"),
                "joined": "2021-05-01T10:00:00Z",
                "profile": format!("https://example.com/users/{idx}"),
                "address": {"city": "Oslo", "zip-code": "0150"},
                "tags": ["a", "b", "c"]
            })
        })
        .collect();
    json!({"users": users, "next-page": "https://example.com/users?page=2"})
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in [10, 1000] {
        let value = document(size);
        for (name, options) in [
            ("coercing", Options::new()),
            ("plain", Options::new().coerce_dates(false).coerce_uris(false)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &value, |b, value| {
                b.iter(|| options.build(value.clone()));
            });
        }
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let node = DynamicNode::build(document(100));
    let mut group = c.benchmark_group("lookup");
    group.bench_function("exact", |b| b.iter(|| node.get("next-page")));
    group.bench_function("alias", |b| b.iter(|| node.get("nextPage")));
    group.bench_function("path", |b| b.iter(|| node.path("users.99.address.zipCode")));
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
