//! Structural queries the parser needs, kept apart from the HTML library.

use log::warn;
use scraper::ElementRef;
use scraper::Selector;

pub trait Node: Sized {
    /// Descendants matching the CSS selector, in document order.
    fn find(&self, selector: &str) -> Vec<Self>;
    fn text(&self) -> String;
    /// Serialized children, if the backend can produce them.
    fn inner_markup(&self) -> Option<String>;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<'a> Node for ElementRef<'a> {
    fn find(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector).collect(),
            Err(e) => {
                warn!("Ignoring invalid selector {selector:?}: {e:?}");
                vec![]
            }
        }
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn inner_markup(&self) -> Option<String> {
        Some(self.inner_html())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}
