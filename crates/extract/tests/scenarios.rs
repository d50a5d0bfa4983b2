// ABOUTME: End-to-end extraction scenarios over complete HTML pages.
// ABOUTME: Covers structured-only, heuristic-only and mixed pages plus id derivation.

use companyscope_extract::{extract, CompanyParser, CompanyRecord};
use pretty_assertions::assert_eq;

fn ld_page(json: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Profile</title>
        <script type="application/ld+json">{json}</script></head>
        <body>{body}</body></html>"#
    )
}

#[test]
fn structured_employees_and_name() {
    let html = ld_page(
        r#"{"@context": "https://schema.org", "@type": "Organization", "name": "Acme", "numberOfEmployees": 50}"#,
        "<p>Welcome to our profile</p>",
    );
    let rec = extract(&html, "https://example.com/company/acme");
    assert_eq!(rec.name.as_deref(), Some("Acme"));
    assert_eq!(rec.employees, Some(50));
    assert_eq!(rec.total_employees, Some(50));
}

#[test]
fn meta_only_page_uses_og_title() {
    let html = r#"<html><head><meta property="og:title" content="Acme Corp"></head>
        <body><p>Hello</p></body></html>"#;
    let rec = extract(html, "https://example.com/company/acme");

    let expected = CompanyRecord {
        url: "https://example.com/company/acme".into(),
        name: Some("Acme Corp".into()),
        ..Default::default()
    };
    assert_eq!(rec, expected);
}

#[test]
fn missing_revenue_property_leaves_revenue_null() {
    let html = ld_page(
        r#"{"@type": "Organization", "name": "Acme", "revenue": null,
            "additionalProperty": [{"name": "Founded", "value": "1999"}]}"#,
        "<p>Annual results are private.</p>",
    );
    let rec = extract(&html, "https://example.com/company/acme");
    assert_eq!(rec.revenue, None);
    assert_eq!(rec.revenue_currency, None);
}

#[test]
fn revenue_property_is_parsed() {
    let html = ld_page(
        r#"{"@type": "Corporation", "additionalProperty": [
            {"name": "Annual Revenue", "value": "$10,500,000"},
            {"name": "Funding", "value": "3,000,000 EUR"}]}"#,
        "",
    );
    let rec = extract(&html, "https://example.com/company/acme");
    assert_eq!(rec.revenue, Some(10_500_000.0));
    assert_eq!(rec.revenue_currency.as_deref(), Some("USD"));
    assert_eq!(rec.total_funding_amount, Some(3_000_000.0));
    assert_eq!(rec.funding_currency.as_deref(), Some("EUR"));
}

#[test]
fn id_from_url_without_structured_id() {
    let rec = extract("<html><body></body></html>", "https://example.com/company/123456");
    assert_eq!(rec.id.as_deref(), Some("123456"));
}

#[test]
fn id_ignores_heuristic_content() {
    let html = r#"<html><body><p class="id">999</p><a href="https://example.com/company/888">x</a></body></html>"#;
    let rec = extract(html, "https://example.com/company/acme");
    assert_eq!(rec.id, None);
    assert_eq!(rec.website.as_deref(), Some("https://example.com/company/888"));
}

#[test]
fn heuristics_fill_what_structured_data_lacks() {
    let html = ld_page(
        r#"{"@type": "Organization", "@id": "https://example.com/org/4242", "name": "Acme"}"#,
        r#"<div class="headquarters">  Springfield,
              USA </div>
           <p>Call +1 555 010 0199</p>
           <p>Over 2,300 employees</p>
           <a href="https://acme.test">Website</a>"#,
    );
    let rec = extract(&html, "https://example.com/company/acme-7");
    assert_eq!(rec.id.as_deref(), Some("4242"));
    assert_eq!(rec.name.as_deref(), Some("Acme"));
    assert_eq!(rec.headquarters.as_deref(), Some("Springfield, USA"));
    assert_eq!(rec.phone_number.as_deref(), Some("Call +1 555 010 0199"));
    assert_eq!(rec.employees, Some(2300));
    assert_eq!(rec.website.as_deref(), Some("https://acme.test"));
}

#[test]
fn malformed_html_degrades_gracefully() {
    let rec = extract("<html><head><script type='application/ld+json'>{", "not a url");
    assert_eq!(rec.url, "not a url");
    assert_eq!(rec.name, None);
    assert!(rec.industry.is_empty());
}

#[test]
fn one_parser_serves_concurrent_callers() {
    let parser = CompanyParser::new();
    let pages: Vec<(String, String)> = (0..8)
        .map(|i| {
            (
                ld_page(&format!(r#"{{"@type": "Organization", "name": "Co {i}"}}"#), ""),
                format!("https://example.com/company/{i}"),
            )
        })
        .collect();

    let parser = &parser;
    let records: Vec<CompanyRecord> = std::thread::scope(|s| {
        let handles: Vec<_> = pages
            .iter()
            .map(|(html, url)| s.spawn(move || parser.extract(html, url)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.name.as_deref(), Some(format!("Co {i}").as_str()));
        assert_eq!(rec.id.as_deref(), Some(i.to_string().as_str()));
    }
}

#[test]
fn blank_structured_url_does_not_block_same_as() {
    let html = ld_page(
        r#"{"@type": "Organization", "url": "", "sameAs": ["https://acme.test"]}"#,
        r#"<a href="https://fallback.test">Site</a>"#,
    );
    let rec = extract(&html, "https://example.com/company/acme");
    assert_eq!(rec.website.as_deref(), Some("https://acme.test"));
}
