// Criterion benchmarks for ICP Search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use icp_search::core::{owner_scope, Condition, Document, TextMatch};
use icp_search::models::{CompanySizeFilter, FilterScalar, FilterValue, IcpFilters, SizeRange};
use icp_search::{MemoryCollection, SearchEngine};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn create_company(id: usize) -> Document {
    let industry = match id % 4 {
        0 => "Plastics",
        1 => "Textiles",
        2 => "Steel",
        _ => "Software",
    };
    let country = match id % 3 {
        0 => "United States",
        1 => "Germany",
        _ => "India",
    };
    json!({
        "company_id": format!("c{}", id),
        "name": format!("Company {}", id),
        "industry": industry,
        "country": country,
        "employee_count": 10 + (id % 500),
    })
    .as_object()
    .unwrap()
    .clone()
}

fn create_person(id: usize) -> Document {
    json!({
        "person_id": format!("p{}", id),
        "full_name": format!("Person {}", id),
        "employment": [{
            "company_id": format!("c{}", id % 200),
            "title": if id % 5 == 0 { "IT Manager" } else { "Analyst" },
        }],
        "emails": [{"value": format!("p{}@example.com", id)}],
    })
    .as_object()
    .unwrap()
    .clone()
}

fn create_filters() -> IcpFilters {
    IcpFilters {
        industry: Some(FilterValue::One(FilterScalar::Text("plastics".to_string()))),
        geography: Some(FilterValue::One(FilterScalar::Text("United States".to_string()))),
        company_size: Some(CompanySizeFilter::Range(SizeRange {
            min: Some(50.0),
            max: Some(200.0),
            ..Default::default()
        })),
        roles: Some(FilterValue::Many(vec![FilterScalar::Text("IT Manager".to_string())])),
    }
}

fn bench_condition_match(c: &mut Criterion) {
    let doc = create_company(0);
    let cond = Condition::And(vec![
        Condition::Contains {
            field: "industry",
            matcher: TextMatch::new(vec!["plastics".to_string()]).unwrap(),
        },
        owner_scope(Some("u1")),
    ]);

    c.bench_function("condition_match", |b| {
        b.iter(|| black_box(&cond).matches(black_box(&doc)));
    });
}

fn bench_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let filters = create_filters();

    let mut group = c.benchmark_group("search");

    for store_size in [100, 500, 1000, 5000].iter() {
        let companies: Vec<Document> = (0..*store_size).map(create_company).collect();
        let people: Vec<Document> = (0..*store_size).map(create_person).collect();
        let engine = SearchEngine::new(
            Arc::new(MemoryCollection::with_docs(companies)),
            Arc::new(MemoryCollection::with_docs(people)),
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(store_size),
            store_size,
            |b, _| {
                b.iter(|| {
                    rt.block_on(async {
                        engine
                            .search(black_box(&filters), black_box(Some("u1")), 50)
                            .await
                            .unwrap()
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_condition_match, bench_search);
criterion_main!(benches);
