use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use richtext::api::parse_with_links;
use richtext::attributed::TextStyleOptions;
use richtext::strip_tags;

fn sample_document() -> String {
  let mut source = String::new();
  source.push_str("<h1>Release notes</h1>");
  for i in 0..50 {
    source.push_str(&format!(
      "<p>Paragraph {i} with <b>bold</b>, <i>italic</i>, and a \
       <a href=\"https://example.com/{i}\">link</a>.</p>"
    ));
    source.push_str("<ul><li>First item</li><li>Second item</li></ul>");
    source.push_str("<p dir=\"auto\">שלום mixed <bdi>עברית</bdi> content</p>");
  }
  source
}

fn bench_parse_with_links(c: &mut Criterion) {
  let source = sample_document();
  let options = TextStyleOptions {
    tag_styles: r##"{"b":{"color":"#CC0000"},"code":{"fontSize":12}}"##.to_string(),
    ..Default::default()
  };

  c.bench_function("parse_with_links", |b| {
    b.iter(|| parse_with_links(black_box(&source), black_box(&options)))
  });
}

fn bench_strip_tags(c: &mut Criterion) {
  let source = sample_document();

  c.bench_function("strip_tags", |b| {
    b.iter(|| strip_tags(black_box(&source)))
  });
}

criterion_group!(benches, bench_parse_with_links, bench_strip_tags);
criterion_main!(benches);
