use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use log::info;
use scraper::Html;

use crate::dom::Node;
use crate::error::Error;
use crate::error::Result;
use crate::schema::Stream;

pub const STREAM_BLOCK: &str = ".box";
pub const LISTENERS_AND_LOCATION: &str = "#aantalbezoekers";
pub const TITLE_BLOCK: &str = ".streamtitle";
pub const STREAM_LINKS: &str = ".images_online a";

/// Lines of the title block are `frequency<br/>name<br/>phone`.
const TITLE_LINE: usize = 1;

pub fn parse_document(body: &str) -> Result<Vec<Stream>> {
    if body.trim().is_empty() {
        return Err(Error::Parse("the response body is empty".to_owned()));
    }
    let html = Html::parse_document(body);
    let streams = parse(&html.root_element());
    info!("Found {} stream blocks", streams.len());
    Ok(streams)
}

pub fn parse<N: Node>(root: &N) -> Vec<Stream> {
    root.find(STREAM_BLOCK).iter().map(parse_stream).collect()
}

/// Never fails; missing parts of a block are left empty.
pub fn parse_stream<N: Node>(block: &N) -> Stream {
    let counts = block
        .find(LISTENERS_AND_LOCATION)
        .iter()
        .map(Node::text)
        .collect::<String>();
    let (listeners, location) = split_listeners_and_location(&counts);

    let (title, info) = match block.find(TITLE_BLOCK).first() {
        Some(element) => {
            let markup = element.inner_markup().unwrap_or_else(|| element.text());
            split_title_block(&markup)
        }
        None => {
            debug!("Stream block without {TITLE_BLOCK}");
            Default::default()
        }
    };

    let urls = parse_urls(&block.find(STREAM_LINKS));
    if urls.is_empty() {
        debug!("No playable links for {title:?}");
    }

    Stream::builder()
        .title(title)
        .info(info)
        .listeners(listeners)
        .location(location)
        .urls(urls)
        .build()
}

/// `"12 Amsterdam"` -> `("12", "Amsterdam")`; splits on the first whitespace run only.
pub fn split_listeners_and_location(text: &str) -> (String, String) {
    let mut parts = regex!(r"\s+").splitn(text.trim(), 2);
    let listeners = parts.next().unwrap_or_default().to_owned();
    let location = parts.next().unwrap_or_default().trim().to_owned();
    (listeners, location)
}

/// Trimmed, non-empty segments between line breaks.
pub fn split_lines(markup: &str) -> Vec<String> {
    line_segments(markup).filter(|s| !s.is_empty()).collect()
}

/// Title is picked by its position before blank lines are dropped, so a
/// missing frequency line does not shift the phone number into the title.
pub fn split_title_block(markup: &str) -> (String, Vec<String>) {
    let segments = line_segments(markup).collect_vec();
    let title = segments
        .get(TITLE_LINE)
        .map(|s| unescape_ampersand(s))
        .unwrap_or_default();
    let info = segments
        .iter()
        .enumerate()
        .filter(|(i, s)| *i != TITLE_LINE && !s.is_empty())
        .map(|(_, s)| s.clone())
        .collect();
    (title, info)
}

/// The serializer writes U+00A0 back as `&nbsp;`, which `trim` would not strip.
fn line_segments(markup: &str) -> impl Iterator<Item = String> + '_ {
    regex!(r"(?i)<br\s*/?>")
        .split(markup)
        .map(|s| s.replace("&nbsp;", "\u{a0}").trim().to_owned())
}

pub fn unescape_ampersand(s: &str) -> String {
    s.replace("&amp;", "&")
}

/// Keyed by the URL's extension; a later link with the same extension wins.
pub fn parse_urls<N: Node>(anchors: &[N]) -> BTreeMap<String, String> {
    let mut urls = BTreeMap::new();
    for anchor in anchors {
        let Some(href) = anchor.attribute("href") else {
            continue;
        };
        if !href.starts_with("http") {
            debug!("Skipping link without scheme: {href:?}");
            continue;
        }
        let extension = href.rsplit_once('.').map_or(href, |(_, ext)| ext);
        urls.insert(extension.to_owned(), href.to_owned());
    }
    urls
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use scraper::Html;

    use super::parse;
    use super::parse_document;
    use super::parse_urls;
    use super::split_lines;
    use super::split_listeners_and_location;
    use super::split_title_block;
    use super::unescape_ampersand;
    use crate::dom::Node;
    use crate::error::Error;

    fn block(counts: &str, title: &str, links: &[&str]) -> String {
        let links = links
            .iter()
            .map(|href| format!(r#"<a href="{href}"><img src="x.gif"></a>"#))
            .collect::<String>();
        format!(
            r#"<div class="box">
                <span id="aantalbezoekers">{counts}</span>
                <div class="streamtitle">{title}</div>
                <div class="images_online">{links}</div>
            </div>"#
        )
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body>{}</body></html>", blocks.concat())
    }

    #[test]
    fn one_stream_per_block_in_document_order() {
        let html = page(&[
            block("3 Groningen", "<b>105.6</b><br/>Radio Noord<br/>0501234567", &[]),
            block("12 Amsterdam", "98.2<br/>Cool Station<br/>091234567", &[]),
            block("0 Zwolle", "92.0<br/>De Vliegende Hollander", &[]),
        ]);
        let streams = parse_document(&html).unwrap();
        assert_eq!(streams.len(), 3);
        assert_eq!(streams[0].title(), "Radio Noord");
        assert_eq!(streams[1].title(), "Cool Station");
        assert_eq!(streams[2].title(), "De Vliegende Hollander");
        assert_eq!(streams[1].listeners(), "12");
        assert_eq!(streams[1].location(), "Amsterdam");
        assert_eq!(streams[1].info(), &["98.2", "091234567"]);
        assert_eq!(streams[0].info(), &["<b>105.6</b>", "0501234567"]);
    }

    #[test]
    fn page_without_blocks_is_empty_not_an_error() {
        let streams = parse_document("<html><body><p>Onderhoud</p></body></html>").unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn blank_body_is_a_parse_error() {
        assert!(matches!(parse_document(" \n"), Err(Error::Parse(_))));
    }

    #[test]
    fn split_on_first_whitespace_run() {
        assert_eq!(
            split_listeners_and_location("12 Amsterdam"),
            ("12".to_owned(), "Amsterdam".to_owned())
        );
        assert_eq!(
            split_listeners_and_location("12"),
            ("12".to_owned(), String::new())
        );
        assert_eq!(
            split_listeners_and_location("\n  7 \t Den Haag Zuid "),
            ("7".to_owned(), "Den Haag Zuid".to_owned())
        );
        assert_eq!(
            split_listeners_and_location(""),
            (String::new(), String::new())
        );
    }

    #[test]
    fn split_on_line_breaks() {
        assert_eq!(
            split_lines("Cool Station<br/>091234567"),
            vec!["Cool Station", "091234567"]
        );
        assert_eq!(
            split_lines("  a <br>\n<BR />  <br/> b  "),
            vec!["a", "b"]
        );
    }

    #[test]
    fn title_is_second_line_and_unescaped() {
        let (title, info) = split_title_block("93.7<br/>Rock &amp; Roll FM<br/>06-12345678");
        assert_eq!(title, "Rock & Roll FM");
        assert_eq!(info, vec!["93.7", "06-12345678"]);

        let (title, info) = split_title_block("<br/>Zender Zonder Frequentie<br/>");
        assert_eq!(title, "Zender Zonder Frequentie");
        assert!(info.is_empty());

        let (title, info) = split_title_block("Alleen Tekst");
        assert_eq!(title, "");
        assert_eq!(info, vec!["Alleen Tekst"]);
        assert_eq!(unescape_ampersand("Rock &amp; Roll FM"), "Rock & Roll FM");
    }

    #[test]
    fn non_breaking_spaces_are_trimmed() {
        let (title, info) = split_title_block(
            "\u{a0}99.1\u{a0}<br/>\u{a0}Radio Drenthe\u{a0}<br/>\u{a0}",
        );
        assert_eq!(title, "Radio Drenthe");
        assert_eq!(info, vec!["99.1"]);

        let html = page(&[block(
            "2 Assen",
            "\u{a0}99.1\u{a0}<br/>&nbsp;Radio Drenthe&nbsp;<br/>&nbsp;",
            &[],
        )]);
        let streams = parse_document(&html).unwrap();
        assert_eq!(streams[0].title(), "Radio Drenthe");
        assert_eq!(streams[0].info(), &["99.1"]);
        assert_eq!(split_lines("&nbsp;<br>a"), vec!["a"]);
    }

    #[test]
    fn ampersand_survives_serialization() {
        let html = page(&[block("1 Utrecht", "99.9<br/>Rock &amp; Roll FM", &[])]);
        let streams = parse_document(&html).unwrap();
        assert_eq!(streams[0].title(), "Rock & Roll FM");
    }

    #[test]
    fn relative_links_are_dropped() {
        let html = Html::parse_fragment(
            r#"<a href="https://x.example/stream.pls">pls</a><a href="relayfeed">relay</a><a>none</a>"#,
        );
        let anchors = html.root_element().find("a");
        assert_eq!(
            parse_urls(&anchors),
            BTreeMap::from([(
                "pls".to_owned(),
                "https://x.example/stream.pls".to_owned()
            )])
        );
    }

    #[test]
    fn links_keyed_by_extension_last_wins() {
        let html = page(&[block(
            "4 Leeuwarden",
            "101.1<br/>Radio Friesland",
            &[
                "http://a.example/one.pls",
                "http://a.example/live.ram",
                "http://b.example/two.pls",
                "/local/three.asx",
            ],
        )]);
        let streams = parse_document(&html).unwrap();
        let urls = streams[0].urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls["pls"], "http://b.example/two.pls");
        assert_eq!(urls["ram"], "http://a.example/live.ram");
    }

    #[test]
    fn missing_parts_degrade_to_empty_fields() {
        let html = Html::parse_document(
            r#"<div class="box"></div><div class="box"><div class="streamtitle">x<br/>Kaal</div></div>"#,
        );
        let streams = parse(&html.root_element());
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].title(), "");
        assert_eq!(streams[0].listeners(), "");
        assert!(streams[0].urls().is_empty());
        assert_eq!(streams[1].title(), "Kaal");
        assert_eq!(streams[1].location(), "");
    }
}
