use std::time::Duration;

use async_trait::async_trait;
use fc_core::{Error, PageFetcher, Result};
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Node};
use tracing::debug;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Elements whose text never belongs to the readable page.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head", "svg"];

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidUrl(format!(
                "only http/https URLs can be fetched, got: {}",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);
        let body = response.text().await?;
        debug!(url, bytes = body.len(), is_html, "Fetched page");

        if is_html {
            Ok(extract_text(&body))
        } else {
            Ok(body)
        }
    }
}

/// Elements that start a new line of text when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

enum Step<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
    Break,
}

/// Visible text of an HTML document. Inline markup is joined without
/// gaps, block elements are separated by a space, and whitespace runs are
/// collapsed.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    let mut stack = vec![Step::Element(document.root_element())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Break => out.push(' '),
            Step::Element(element) => {
                if BLOCK_ELEMENTS.contains(&element.value().name()) {
                    out.push(' ');
                    stack.push(Step::Break);
                }
                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        if !SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                            stack.push(Step::Element(child_element));
                        }
                    } else if let Node::Text(text) = child.value() {
                        stack.push(Step::Text(&**text));
                    }
                }
            }
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
