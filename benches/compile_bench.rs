use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use condex::condition::builder;
use condex::{Condition, ConditionBuilder, Document, Mapper, MapperKind, QueryExecutor, Schema};

fn create_schema() -> Schema {
    Schema::builder()
        .mapper(Mapper::string("name"))
        .mapper(Mapper::new("body", MapperKind::text_with_analyzer("english")))
        .mapper(Mapper::long("age").with_sorted(true))
        .mapper(Mapper::geo_point("loc", 11))
        .mapper(Mapper::bitemporal("t"))
        .build()
        .unwrap()
}

fn create_docs(schema: &Schema, count: u64) -> Vec<Document> {
    (1..=count)
        .map(|id| {
            let mut doc = Document::new(id);
            doc.add_value(schema, "name", &json!(format!("user{}", id)))
                .unwrap()
                .add_value(
                    schema,
                    "body",
                    &json!(format!("rust programming language doc {}", id)),
                )
                .unwrap()
                .add_value(schema, "age", &json!(id % 90))
                .unwrap()
                .add_value(
                    schema,
                    "loc",
                    &json!([(id % 360) as f64 - 180.0, (id % 180) as f64 - 90.0]),
                )
                .unwrap();
            doc
        })
        .collect()
}

fn conditions() -> Vec<(&'static str, Condition)> {
    vec![
        ("match_long", builder::match_value("age", 42).build().unwrap()),
        (
            "match_phrase",
            builder::match_value("body", "rust programming languages")
                .build()
                .unwrap(),
        ),
        ("wildcard", builder::wildcard("name", "user1*").build().unwrap()),
        (
            "geo_bbox",
            builder::geo_bbox("loc", -10.0, 30.0, 35.0, 60.0)
                .boost(0.5)
                .build()
                .unwrap(),
        ),
        (
            "bitemporal",
            builder::bitemporal("t")
                .tt_from("2015/03/20 11:45:32.333")
                .operation("intersects")
                .build()
                .unwrap(),
        ),
    ]
}

fn bench_compile(c: &mut Criterion) {
    let schema = create_schema();
    let mut group = c.benchmark_group("compile");

    for (name, condition) in conditions() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &condition, |b, condition| {
            b.iter(|| condition.compile(black_box(&schema)).unwrap())
        });
    }
    group.finish();
}

fn bench_builder_json(c: &mut Criterion) {
    let json = r#"{"type":"geo_bbox","field":"loc","boost":0.5,"min_longitude":-10.0,"max_longitude":30.0,"min_latitude":35.0,"max_latitude":60.0}"#;

    c.bench_function("builder_from_json", |b| {
        b.iter(|| {
            ConditionBuilder::from_json(black_box(json))
                .unwrap()
                .build()
                .unwrap()
        })
    });
}

fn bench_execute(c: &mut Criterion) {
    let schema = create_schema();
    let mut group = c.benchmark_group("execute");

    for count in [100u64, 1_000] {
        let docs = create_docs(&schema, count);
        let executor = QueryExecutor::new(&schema);

        for (name, condition) in conditions() {
            let query = condition.compile(&schema).unwrap();
            group.bench_with_input(
                BenchmarkId::new(name, count),
                &docs,
                |b, docs| b.iter(|| executor.search(black_box(&query), docs, 10).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_builder_json, bench_execute);
criterion_main!(benches);
