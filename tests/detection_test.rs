use catalog_detect::{analyze, analyze_document, analyze_with_options, dom, Options};
use chrono::{Datelike, Timelike};

fn dated_list(rows: usize) -> String {
    let mut html = String::from("<html><body><ul>");
    for i in 1..=rows {
        html.push_str(&format!(
            r#"<li><a href="/news/{i}.html">Headline for story {i}</a> <span>2024-01-{i:02}</span></li>"#
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

#[test]
fn detects_simple_dated_list_in_document_order() {
    let result = analyze(&dated_list(10)).expect("default options are valid");

    assert_eq!(result.items.len(), 10);
    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/ul[1]/li/a[1]"));
    for (i, item) in result.items.iter().enumerate() {
        let n = i + 1;
        assert_eq!(item.url, format!("/news/{n}.html"));
        assert_eq!(item.title, format!("Headline for story {n}"));
        assert_eq!(item.path, format!("/html[1]/body[1]/ul[1]/li[{n}]/a[1]"));
        assert!(item.has_date);
        assert_eq!(item.published_raw.as_deref(), Some(format!("2024-01-{n:02}").as_str()));
        let published = item.published.expect("valid calendar date");
        assert_eq!((published.year(), published.month(), published.day()), (2024, 1, n as u32));
    }
}

#[test]
fn prunes_thumbnail_column_sharing_title_urls() {
    let mut html = String::from("<html><body><ul>");
    for i in 1..=6 {
        html.push_str(&format!(
            r#"<li><a href="/a{i}"><img src="/t{i}.jpg"></a><a href="/a{i}">Title number {i}</a> <span>2024-02-0{i}</span></li>"#
        ));
    }
    html.push_str("</ul></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/ul[1]/li/a[2]"));
    assert_eq!(result.items.len(), 6);
    let urls: Vec<&str> = result.items.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["/a1", "/a2", "/a3", "/a4", "/a5", "/a6"]);
    assert!(result.items.iter().all(|i| i.title.starts_with("Title number")));
    assert!(result.items.iter().all(|i| i.has_date));
}

#[test]
fn two_similar_links_are_not_a_catalog() {
    let html = r#"<html><body><ul>
        <li><a href="/a">First article title</a> 2024-01-01</li>
        <li><a href="/b">Second article title</a> 2024-01-02</li>
    </ul></body></html>"#;

    let result = analyze(html).expect("default options are valid");
    assert!(result.items.is_empty());
    assert_eq!(result.pattern, None);
}

#[test]
fn undated_catalog_is_still_detected() {
    let mut html = String::from("<html><body><ol>");
    for i in 1..=6 {
        html.push_str(&format!(r#"<li><a href="/p/{i}">Product review {i}</a></li>"#));
    }
    html.push_str("</ol></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.items.len(), 6);
    assert!(result.items.iter().all(|i| !i.has_date));
    assert!(result.items.iter().all(|i| i.published.is_none() && i.published_raw.is_none()));
}

#[test]
fn ignores_navigation_footer_and_sidebar_links() {
    let mut html = String::from("<html><body><header><nav><ul>");
    for i in 1..=6 {
        html.push_str(&format!(r#"<li><a href="/section/{i}">Section page {i}</a></li>"#));
    }
    html.push_str("</ul></nav></header><main><div class=\"list\">");
    for i in 1..=5 {
        html.push_str(&format!(
            r#"<p><a href="/story/{i}">Main story {i}</a> | 2024-04-0{i} 10:30</p>"#
        ));
    }
    html.push_str("</div></main><aside><ul>");
    for i in 1..=8 {
        html.push_str(&format!(r#"<li><a href="/popular/{i}">Most read article number {i}</a></li>"#));
    }
    html.push_str("</ul></aside><footer>");
    for i in 1..=6 {
        html.push_str(&format!(r#"<a href="/legal/{i}">Legal notice {i}</a>"#));
    }
    html.push_str("</footer></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.items.len(), 5);
    assert!(result.items.iter().all(|i| i.url.starts_with("/story/")));
    assert_eq!(result.items[0].published_raw.as_deref(), Some("2024-04-01 10:30"));
    assert_eq!(result.items[0].published.map(|p| (p.hour(), p.minute())), Some((10, 30)));
}

#[test]
fn detects_card_grid_with_heading_links() {
    let mut html = String::from(r#"<html><body><div class="grid">"#);
    for i in 1..=5 {
        html.push_str(&format!(
            r#"<div class="card"><a href="/c/{i}"><img src="{i}.jpg"></a> <h3><a href="/c/{i}">Card headline {i}</a></h3> <p>Teaser.</p> <time>2024-05-1{i}</time></div>"#
        ));
    }
    html.push_str("</div></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/div[1]/div/h3[1]/a[1]"));
    assert_eq!(result.items.len(), 5);
    assert_eq!(result.items[2].title, "Card headline 3");
    assert_eq!(result.items[2].full_text, "Card headline 3 Teaser. 2024-05-13");
    assert_eq!(result.items[2].published_raw.as_deref(), Some("2024-05-13"));
}

#[test]
fn detects_table_rows() {
    let mut html = String::from("<html><body><table>");
    for i in 1..=5 {
        html.push_str(&format!(
            r#"<tr><td><a href="/t/{i}">Notice about item {i}</a></td><td>Posted 2023/12/0{i}</td></tr>"#
        ));
    }
    html.push_str("</table></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.items.len(), 5);
    assert!(result.items.iter().all(|i| i.has_date));
    assert_eq!(result.items[4].published_raw.as_deref(), Some("2023/12/05"));
}

#[test]
fn reads_cjk_dates() {
    let mut html = String::from("<html><body><ul>");
    for i in 1..=5 {
        html.push_str(&format!(
            r#"<li><a href="/cn/{i}">关于第{i}号通知的公告</a><span>2024年3月{i}日</span></li>"#
        ));
    }
    html.push_str("</ul></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.items.len(), 5);
    assert_eq!(result.items[0].published_raw.as_deref(), Some("2024年3月1日"));
    let published = result.items[0].published.expect("valid calendar date");
    assert_eq!((published.year(), published.month(), published.day()), (2024, 3, 1));
}

#[test]
fn prefers_dated_list_over_longer_undated_list() {
    let mut html = String::from("<html><body><div>");
    for i in 1..=5 {
        html.push_str(&format!(r#"<p><a href="/topic/{i}">Evergreen topic landing page {i}</a></p>"#));
    }
    html.push_str("</div><ul>");
    for i in 1..=5 {
        html.push_str(&format!(r#"<li><a href="/n/{i}">Breaking update {i}</a> 2024-06-0{i}</li>"#));
    }
    html.push_str("</ul></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/ul[1]/li/a[1]"));
    assert!(result.items.iter().all(|i| i.url.starts_with("/n/")));
}

#[test]
fn resolves_urls_against_base_url() {
    let options = Options {
        base_url: Some("https://news.example.com/world/index.html".to_string()),
        ..Options::default()
    };
    let result = analyze_with_options(&dated_list(5), &options).expect("options are valid");

    assert_eq!(result.items[0].url, "https://news.example.com/news/1.html");
}

#[test]
fn analyze_document_matches_analyze() {
    let html = dated_list(7);
    let doc = dom::parse(&html);

    let from_doc = analyze_document(&doc, &Options::default()).expect("default options are valid");
    let from_str = analyze(&html).expect("default options are valid");
    assert_eq!(from_doc, from_str);
}

#[test]
fn result_serializes_to_json() {
    let result = analyze(&dated_list(4)).expect("default options are valid");
    let json = serde_json::to_value(&result).expect("serializable");

    assert_eq!(json["pattern"], "/html[1]/body[1]/ul[1]/li/a[1]");
    assert_eq!(json["items"][0]["url"], "/news/1.html");
    assert_eq!(json["items"][0]["has_date"], true);
    assert_eq!(json["items"][0]["published"], "2024-01-01T00:00:00");
}

#[test]
fn detects_table_rows_after_header_row() {
    let mut html = String::from("<html><body><table><tr><th>Title</th> <th>Date</th></tr>");
    for i in 2..=11 {
        html.push_str(&format!(
            r#"<tr><td><a href="/r/{i}">Quarterly report {i}</a></td> <td>Posted 2024-06-{i:02}</td></tr>"#
        ));
    }
    html.push_str("</table></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/table[1]/tbody[1]/tr/td[1]/a[1]"));
    assert_eq!(result.items.len(), 10);
    assert_eq!(result.items[0].url, "/r/2");
    assert_eq!(result.items[0].path, "/html[1]/body[1]/table[1]/tbody[1]/tr[2]/td[1]/a[1]");
    assert!(result.items.iter().all(|i| i.has_date));
}

#[test]
fn detects_list_whose_first_row_is_featured() {
    let mut html = String::from(
        r#"<html><body><ul><li><div class="featured"><a href="/n/1">Featured story of the day</a></div> 2024-07-01</li>"#,
    );
    for i in 2..=10 {
        html.push_str(&format!(r#"<li><a href="/n/{i}">News headline {i}</a> 2024-07-{i:02}</li>"#));
    }
    html.push_str("</ul></body></html>");

    let result = analyze(&html).expect("default options are valid");

    assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/ul[1]/li/a[1]"));
    assert_eq!(result.items.len(), 9);
    assert_eq!(result.items[0].url, "/n/2");
    assert!(result.items.iter().all(|i| i.has_date));
}
