use hg_feed::FeedParser;

fn rss_with_item(guid: &str, pub_date: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>repo dashboard</title>
    <link>https://hg.example.org/repo</link>
    <description>Recent pushes</description>
    <item>
      <title>pushed to default</title>
      <guid>{}</guid>
      <pubDate>{}</pubDate>
      <description><![CDATA[<ul><li>abc - change</li></ul>]]></description>
    </item>
  </channel>
</rss>"#,
        guid, pub_date
    )
}

#[test]
fn test_pub_date_text_is_passed_on_unchanged() {
    let mut parser = FeedParser::new();

    let parsed = parser
        .parse_feed(&rss_with_item("push-1", "Mon, 2 Jan 2006 15:04:05 -0700"))
        .expect("feed should parse");

    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].published, "Mon, 2 Jan 2006 15:04:05 -0700");
}

#[test]
fn test_pub_date_in_other_layout_is_not_rewritten() {
    let mut parser = FeedParser::new();

    let parsed = parser
        .parse_feed(&rss_with_item("push-1", "Mon, 02 Jan 2006 22:04:05 GMT"))
        .expect("feed should parse");

    assert_eq!(parsed.entries[0].published, "Mon, 02 Jan 2006 22:04:05 GMT");
}

#[test]
fn test_atom_dates_fall_back_to_rendered_form() {
    let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>repo dashboard</title>
  <id>urn:hg:repo</id>
  <updated>2006-01-02T15:04:05-07:00</updated>
  <entry>
    <title>pushed to default</title>
    <id>urn:hg:repo:push-1</id>
    <updated>2006-01-02T15:04:05-07:00</updated>
    <summary type="html">&lt;ul&gt;&lt;li&gt;abc - change&lt;/li&gt;&lt;/ul&gt;</summary>
  </entry>
</feed>"#;
    let mut parser = FeedParser::new();

    let parsed = parser.parse_feed(atom).expect("feed should parse");

    assert_eq!(parsed.entries.len(), 1);
    assert!(hg_feed::entry::parse_published(&parsed.entries[0].published).is_some());
}

#[test]
fn test_entries_are_reported_once() {
    let mut parser = FeedParser::new();
    let document = rss_with_item("push-1", "Mon, 2 Jan 2006 15:04:05 -0700");

    let first = parser.parse_feed(&document).expect("feed should parse");
    let second = parser.parse_feed(&document).expect("feed should parse");

    assert_eq!(first.entries.len(), 1);
    assert!(second.entries.is_empty());
    assert_eq!(parser.seen_count(), 1);
}
