use criterion::{criterion_group, criterion_main, Criterion};

use urikit::template::{Context, TemplateCache, UriTemplate};

pub fn criterion_benchmark(c: &mut Criterion) {
    let source = "https://api.example.com/repos/{owner}/{repo}/issues{?state,labels,per_page:3}";
    let mut context = Context::new();
    context.insert("owner", "rust lang");
    context.insert("repo", "rust");
    context.insert("state", "open");
    context.insert("labels", ["A-diagnostics", "C-bug", "E-easy"]);
    context.insert("per_page", 100);

    c.bench_function("template parse", |b| {
        b.iter(|| UriTemplate::new(source).expect("valid template should be passed"))
    });

    c.bench_function("template expand", |b| {
        let template = UriTemplate::new(source).expect("valid template should be passed");
        b.iter(|| {
            template
                .expand(&context)
                .expect("expansion should succeed")
        })
    });

    c.bench_function("template expand (cached template)", |b| {
        let mut cache = TemplateCache::new();
        b.iter(|| {
            cache
                .get_or_parse(source)
                .and_then(|template| template.expand(&context))
                .expect("expansion should succeed")
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
