//! HTML parsing for the cinema's series pages.
//!
//! Pure functions over page text. `scraper::Html` isn't `Send`, so documents
//! are parsed and dropped inside these functions and never held across an
//! `.await`.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use ::scraper::{ElementRef, Html, Selector};

use super::{ScrapeError, ScrapedFilm, SeriesLink};

static JS_REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.location\.replace\(['"]([^'"]+)['"]"#).expect("valid regex")
});

/// Query parameter carrying the stable series id.
const SERIES_ID_PARAM: &str = "vista_series_id";

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(e.to_string()))
}

/// Text content of an element, trimmed at both ends only.
///
/// Names and titles are compared verbatim against stored snapshots, so inner
/// whitespace is kept as the page has it.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whitespace-collapsed text content of an element.
fn collapsed_text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collect `(name, url)` pairs from the series index page.
///
/// Entries without a link are skipped.
pub fn parse_series_index(html: &str) -> Result<Vec<SeriesLink>, ScrapeError> {
    let document = Html::parse_document(html);
    let title_selector = selector(".row .movie_title")?;
    let link_selector = selector("a[href]")?;

    let mut links = Vec::new();
    for title in document.select(&title_selector) {
        let href = title
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .unwrap_or_default();
        let name = text_of(title);

        if href.is_empty() {
            tracing::debug!(%name, "Series entry without link");
            continue;
        }

        tracing::debug!(%name, url = href, "Found series");
        links.push(SeriesLink {
            name,
            url: href.to_string(),
        });
    }

    Ok(links)
}

/// Collect the films listed on a series page.
///
/// Each `.item` contributes its `.title` text and the raw `.film-metadata`
/// text; items with an empty title are skipped.
pub fn parse_film_list(html: &str) -> Result<Vec<ScrapedFilm>, ScrapeError> {
    let document = Html::parse_document(html);
    let item_selector = selector(".item")?;
    let title_selector = selector(".title")?;
    let metadata_selector = selector(".film-metadata")?;

    let films = document
        .select(&item_selector)
        .filter_map(|item| {
            let title = item
                .select(&title_selector)
                .map(|t| t.text().collect::<String>())
                .collect::<String>();
            let title = title.trim();
            if title.is_empty() {
                return None;
            }

            let metadata = item
                .select(&metadata_selector)
                .map(collapsed_text_of)
                .collect::<Vec<_>>()
                .join(" ");

            Some(ScrapedFilm {
                title: title.to_string(),
                metadata,
            })
        })
        .collect();

    Ok(films)
}

/// Target of a `window.location.replace('...')` redirect, if the page has one.
pub fn find_js_redirect(body: &str) -> Option<String> {
    JS_REDIRECT
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse `director / year` or `year` metadata into `(director, year)`.
///
/// A first token that is a plausible year (1801..=2099) is the year and the
/// director stays empty. Otherwise the first token is the director and the
/// second token, when numeric, is the year. Unknown parts come back empty/0.
pub fn parse_metadata(text: &str) -> (String, i32) {
    let mut parts = text.split('/').map(str::trim);
    let first = parts.next().unwrap_or_default();
    if first.is_empty() {
        return (String::new(), 0);
    }

    if let Ok(year) = first.parse::<i32>() {
        if year > 1800 && year < 2100 {
            return (String::new(), year);
        }
    }

    let year = parts
        .next()
        .and_then(|second| second.parse::<i32>().ok())
        .unwrap_or(0);
    (first.to_string(), year)
}

/// Extract the series id from a series URL.
///
/// Relative URLs are resolved against `base`. Returns `None` when the URL
/// is malformed or carries no non-empty id parameter.
pub fn extract_series_id(url: &str, base: &Url) -> Option<String> {
    let url = base.join(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == SERIES_ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|id| !id.is_empty())
}
