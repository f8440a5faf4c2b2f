use criterion::{criterion_group, criterion_main, Criterion};
use routemap::definition::DefinitionFile;
use routemap::Router;
use std::collections::HashMap;
use std::hint::black_box;

fn example_routes() -> &'static str {
    r#"
groups:
  zoo:
    prefix: /zoo
    middlewares: [zoo_auth]
routes:
  - { name: root_handler, methods: [GET], pattern: / }
  - { name: get_animals, methods: [GET], pattern: /animals, group: zoo }
  - { name: create_animal, methods: [POST], pattern: /animals, group: zoo }
  - { name: get_animal, methods: [GET], pattern: "/animals/{id}", group: zoo }
  - { name: update_animal, methods: [PUT], pattern: "/animals/{id}", group: zoo }
  - { name: delete_animal, methods: [DELETE], pattern: "/animals/{id}", group: zoo }
  - { name: animal_toy, methods: [GET], pattern: "/animals/{id}/toys/{toy_id}", group: zoo }
  - name: habitat_section
    methods: [GET]
    pattern: "/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}"
    group: zoo
  - name: post_item_batch
    methods: [POST]
    pattern: "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}"
  - name: complex_many_params
    methods: [GET]
    pattern: "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}"
  - name: archive
    methods: [GET]
    pattern: "/archive[/{year:\\d{4}}[/{month:\\d{2}}]]"
  - { name: health_check, methods: [GET], pattern: /health, group: zoo }
"#
}

fn router() -> Router {
    let file = match DefinitionFile::from_str_with_extension(example_routes(), "yaml") {
        Ok(file) => file,
        Err(e) => panic!("failed to parse route definitions: {e:#}"),
    };
    Router::new(move |r| file.register(r))
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = router();
    if let Err(e) = router.prepare() {
        panic!("failed to compile routes: {e}");
    }
    c.bench_function("route_match", |b| {
        let test_paths = [
            ("GET", "/zoo/health"),
            ("GET", "/zoo/animals/123"),
            ("GET", "/zoo/animals/123/toys/456"),
            ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
            ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
            ("GET", "/complex/1/2/3/4/5/6/7/8/9"),
            ("GET", "/archive/2024/05"),
            ("DELETE", "/zoo/health"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.match_route(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_uri_for(c: &mut Criterion) {
    let router = router();
    let params: HashMap<String, String> = [("year", "2024"), ("month", "05")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    c.bench_function("uri_for", |b| {
        b.iter(|| {
            let uri = router.uri_for(black_box("archive"), &params, [("page", "2")]);
            black_box(&uri);
        })
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_routes", |b| {
        b.iter(|| {
            let router = router();
            black_box(router.prepare().is_ok());
        })
    });
}

criterion_group!(benches, bench_route_throughput, bench_uri_for, bench_compile);
criterion_main!(benches);
