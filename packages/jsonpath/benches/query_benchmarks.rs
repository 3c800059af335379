//! JSONPath Engine Performance Benchmarks
//!
//! Benchmarks for the compile and evaluate hot paths:
//! - Expression compilation time
//! - Plain selection throughput
//! - Located selection overhead
//! - Regex-cached filter evaluation

use std::time::Instant;

use quyc_jsonpath::JsonPath;
use serde_json::{Value, json};

fn main() {
    println!("🏁 JSONPath Engine Performance Benchmarks\n");

    bench_compilation();
    bench_selection();
    bench_located_selection();
    bench_regex_filters();
}

fn bookstore() -> Value {
    json!({
        "store": {
            "book": [
                {"category": "reference", "author": "Nigel Rees",
                 "title": "Sayings of the Century", "price": 8.95},
                {"category": "fiction", "author": "Evelyn Waugh",
                 "title": "Sword of Honour", "price": 12.99},
                {"category": "fiction", "author": "Herman Melville",
                 "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99},
                {"category": "fiction", "author": "J. R. R. Tolkien",
                 "title": "The Lord of the Rings", "isbn": "0-395-19395-8", "price": 22.99}
            ],
            "bicycle": {"color": "red", "price": 19.95}
        }
    })
}

/// Benchmark expression compilation across selector shapes.
fn bench_compilation() {
    println!("📊 1. Expression Compilation");

    let exprs = [
        "$.store.book[*].author",
        "$..price",
        "$.store.book[?@.price < 10].title",
        "$.store.book[0,-1]",
        "$..book[?match(@.title, \".*Dick\")].author",
    ];
    let iterations = 10_000;

    for expr in exprs {
        let start = Instant::now();
        for _ in 0..iterations {
            let _path = JsonPath::parse(expr).expect("benchmark expression compiles");
        }
        let duration = start.elapsed();
        println!(
            "  {expr}: {:.2} µs/compile",
            duration.as_micros() as f64 / f64::from(iterations)
        );
    }
    println!();
}

/// Benchmark plain node selection on a pre-compiled query.
fn bench_selection() {
    println!("📊 2. Node Selection");

    let doc = bookstore();
    let iterations = 100_000;

    for expr in ["$.store.book[*].author", "$..price", "$.store.book[?@.price < 10]"] {
        let path = JsonPath::parse(expr).expect("benchmark expression compiles");
        let start = Instant::now();
        let mut total = 0usize;
        for _ in 0..iterations {
            total += path.select(&doc).len();
        }
        let duration = start.elapsed();
        println!(
            "  {expr}: {:.2} ns/select ({} nodes/iter)",
            duration.as_nanos() as f64 / f64::from(iterations),
            total / iterations as usize
        );
    }
    println!();
}

/// Benchmark located selection to measure path-tracking overhead.
fn bench_located_selection() {
    println!("📊 3. Located Selection");

    let doc = bookstore();
    let path = JsonPath::parse("$..price").expect("benchmark expression compiles");
    let iterations = 100_000;

    let start = Instant::now();
    for _ in 0..iterations {
        let _located = path.select_located(&doc);
    }
    let duration = start.elapsed();
    println!(
        "  $..price located: {:.2} ns/select\n",
        duration.as_nanos() as f64 / f64::from(iterations)
    );
}

/// Benchmark match() filters, which exercise the process-wide regex cache.
fn bench_regex_filters() {
    println!("📊 4. Regex Filter Evaluation");

    let doc = bookstore();
    let path = JsonPath::parse("$..book[?match(@.title, \".*o.*\")].title")
        .expect("benchmark expression compiles");
    let iterations = 50_000;

    let start = Instant::now();
    for _ in 0..iterations {
        let _titles = path.select(&doc);
    }
    let duration = start.elapsed();
    println!(
        "  cached match(): {:.2} ns/select\n",
        duration.as_nanos() as f64 / f64::from(iterations)
    );
}
