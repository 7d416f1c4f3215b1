use crate::fetcher::Fetcher;
use crate::traits::PageExtractor;
use crate::types::PageFetch;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Element holding the full release text on circular pages.
pub const RELEASE_SELECTOR: &str = "span#ctl00_Content_Main_lblRelease";

/// Panel wrapping the release paragraphs when the release span is missing.
pub const PANEL_SELECTOR: &str = "div#ctl00_Content_Main_panelPressRelease";

/// Paragraphs this short or shorter are boilerplate (dates, captions, separators).
pub const MIN_PARAGRAPH_CHARS: usize = 20;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// A single way of pulling body text out of a parsed page.
pub type ExtractionStrategy = fn(&Html) -> Option<String>;

/// Strategies in priority order; the first non-empty result wins.
pub const STRATEGIES: &[(&str, ExtractionStrategy)] = &[
    ("release-span", release_span_text),
    ("panel-paragraphs", panel_paragraph_text),
    ("whole-page", whole_page_text),
];

/// Runs the extraction strategies over raw HTML.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for (name, strategy) in STRATEGIES {
        if let Some(text) = strategy(&document) {
            if !text.is_empty() {
                debug!("Extracted {} chars using {}", text.chars().count(), name);
                return text;
            }
        }
    }

    String::new()
}

/// Text of the release span, one line per text node.
pub fn release_span_text(document: &Html) -> Option<String> {
    let selector = Selector::parse(RELEASE_SELECTOR).ok()?;
    let span = document.select(&selector).next()?;
    Some(visible_lines(span).join("\n"))
}

/// Paragraphs of the press-release panel longer than the boilerplate threshold.
pub fn panel_paragraph_text(document: &Html) -> Option<String> {
    let panel_selector = Selector::parse(PANEL_SELECTOR).ok()?;
    let paragraph_selector = Selector::parse("p").ok()?;
    let panel = document.select(&panel_selector).next()?;

    let paragraphs: Vec<String> = panel
        .select(&paragraph_selector)
        .map(|p| visible_lines(p).concat())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();

    Some(paragraphs.join("\n\n"))
}

/// Every visible text node of the document, one per line.
pub fn whole_page_text(document: &Html) -> Option<String> {
    Some(visible_lines(document.root_element()).join("\n"))
}

/// Trimmed, non-empty text nodes under `element`, skipping scripts and styles.
fn visible_lines(element: ElementRef<'_>) -> Vec<String> {
    element
        .descendants()
        .filter_map(|node| {
            let text = match node.value() {
                Node::Text(text) => text,
                _ => return None,
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Placeholder body used when the page could not be retrieved.
pub fn unavailable_text(fetch: &PageFetch) -> Option<String> {
    match fetch {
        PageFetch::Html(_) => None,
        PageFetch::Status(code) => Some(format!("(Could not fetch content; HTTP {})", code)),
        PageFetch::Failed(_) => Some("(Could not fetch content; request failed)".to_string()),
    }
}

/// Fetches circular pages and extracts their body text.
pub struct CircularPageExtractor {
    fetcher: Arc<Fetcher>,
}

impl CircularPageExtractor {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PageExtractor for CircularPageExtractor {
    async fn extract_full_text(&self, link: &str) -> String {
        let html = match self.fetcher.fetch_page(link).await {
            PageFetch::Html(html) => html,
            failed => {
                warn!("Using placeholder text for {}: {:?}", link, failed);
                return unavailable_text(&failed).unwrap_or_default();
            }
        };

        let text = extract_text(&html);
        info!("Extracted {} chars from {}", text.chars().count(), link);
        text
    }
}
