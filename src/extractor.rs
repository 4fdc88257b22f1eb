//! Label-driven value extraction from the registry page.
//!
//! The page lays out each value as
//!
//! ```html
//! <div>
//!   <span>Owner Name</span>
//!   <p>JOHN DOE</p>
//! </div>
//! ```
//!
//! so a value is found by locating the `<span>` carrying the label, walking
//! up to its enclosing `<div>` and reading the first `<p>` inside it. Misses
//! at any step give `None`.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{Field, VehicleDetails};

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Parsed registry page
pub struct Extractor {
    document: Html,
}

impl Extractor {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Text of the value element next to the marker containing `label`
    pub fn value(&self, label: &str) -> Option<String> {
        let spans = Selector::parse("span").ok()?;
        let paragraphs = Selector::parse("p").ok()?;

        let marker = self
            .document
            .select(&spans)
            .find(|span| span.text().collect::<String>().contains(label))?;

        let container = marker
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "div")?;

        let value = container.select(&paragraphs).next()?;
        let text = value.text().collect::<String>();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Look up every known field
    pub fn extract_details(&self) -> VehicleDetails {
        let mut details = VehicleDetails::default();
        for field in Field::ALL {
            let value = self.value(field.label());
            if value.is_none() {
                debug!("No value for label {:?}", field.label());
            }
            *details.slot_mut(field) = value;
        }
        details
    }

    /// At most `limit` characters of the page's visible text
    pub fn preview(&self, limit: usize) -> String {
        self.visible_text()
            .flat_map(str::chars)
            .take(limit)
            .collect()
    }

    fn visible_text(&self) -> impl Iterator<Item = &str> + '_ {
        self.document
            .root_element()
            .descendants()
            .filter(|node| {
                !node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
            })
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
    }
}
