use catalog_detect::{analyze, dom, extract_document_with_path, extract_with_path, Error, Options};

fn index_page(rows: usize) -> String {
    let mut html = String::from(r#"<html><body><div id="main"><ul class="news">"#);
    for i in 1..=rows {
        html.push_str(&format!(
            r#"<li><a href="/n/{i}">Story headline {i}</a> <em>2024-07-{:02} 12:00</em></li>"#,
            i % 28 + 1
        ));
    }
    html.push_str("</ul></div></body></html>");
    html
}

#[test]
fn replay_picks_up_new_rows() {
    let detected = analyze(&index_page(10)).expect("default options are valid");
    let pattern = detected.pattern.expect("catalog detected");
    assert_eq!(detected.items.len(), 10);

    let items = extract_with_path(&index_page(15), &pattern, &Options::default()).expect("valid pattern");

    assert_eq!(items.len(), 15);
    assert_eq!(items[14].url, "/n/15");
    assert!(items.iter().all(|i| i.has_date));
}

#[test]
fn replay_matches_detection_on_same_page() {
    let html = index_page(8);
    let detected = analyze(&html).expect("default options are valid");
    let pattern = detected.pattern.clone().expect("catalog detected");

    let replayed = extract_with_path(&html, &pattern, &Options::default()).expect("valid pattern");
    assert_eq!(replayed, detected.items);
}

#[test]
fn replay_has_no_detection_thresholds() {
    // A single row is below every detection threshold but replays fine.
    let items = extract_with_path(
        &index_page(1),
        "/html[1]/body[1]/div[1]/ul[1]/li/a[1]",
        &Options::default(),
    )
    .expect("valid pattern");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Story headline 1");
}

#[test]
fn replay_with_wildcard_in_the_middle() {
    let html = r#"<html><body>
        <section><h2>Politics</h2> <div><a href="/p/1">Parliament votes today</a></div></section>
        <section><h2>Economy</h2> <div><a href="/e/1">Markets open higher</a></div></section>
        <section><h2>Sport</h2> <div><a href="/s/1">Cup final preview</a></div></section>
    </body></html>"#;

    let items = extract_with_path(html, "/html[1]/body[1]/section/div[1]/a[1]", &Options::default())
        .expect("valid pattern");

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Parliament votes today", "Markets open higher", "Cup final preview"]);
    assert_eq!(items[1].full_text, "Economy Markets open higher");
}

#[test]
fn replay_pattern_that_matches_nothing() {
    let items = extract_with_path(&index_page(5), "/html[1]/body[1]/ol[1]/li/a[1]", &Options::default())
        .expect("valid pattern");
    assert!(items.is_empty());
}

#[test]
fn replay_rejects_malformed_paths() {
    for path in ["", "html/body", "/html[x]/body[1]", "/html[1]/body[0]", "/html[1]//a"] {
        let result = extract_with_path(&index_page(3), path, &Options::default());
        assert!(matches!(result, Err(Error::InvalidPath(_))), "path {path:?} should be rejected");
    }
}

#[test]
fn replay_on_parsed_document() {
    let doc = dom::parse(&index_page(6));
    let items = extract_document_with_path(&doc, "/html[1]/body[1]/div[1]/ul[1]/li/a[1]", &Options::default())
        .expect("valid pattern");
    assert_eq!(items.len(), 6);
}
