//! HTTP client and page scraping for the two upstream sites.
//!
//! FrameXML exports are served per build under a numbered directory, with a
//! `live` page listing the current build and the per-file change history. The
//! wiki exposes its revision time in the page footer. All parsers work on
//! fetched HTML and stay free of I/O so they can be tested on fixture pages.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta, TimeZone};
use log::warn;
use reqwest::Client;
use reqwest::header::{REFERER, USER_AGENT};
use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;

pub const FXML_BASE: &str = "https://www.townlong-yak.com/framexml";
pub const WIKI_BASE: &str = "https://warcraft.wiki.gg";

/// Both sites refuse requests that do not look like a desktop browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/79.0.3945.56 Safari/537.36 \
     Edg/79.0.309.40";

/// Length of "This page was last edited on " in the wiki footer.
const LASTMOD_PREFIX_LEN: usize = 29;
const LASTMOD_FORMAT: &str = "%d %B %Y, at %H:%M.";

/// Builds advertised by the live FrameXML page.
///
/// The exported files can lag behind the client build after a patch, so the
/// page names both: the heading carries the export build, a `.morebuilds`
/// link the newer client build when one exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildPair {
    pub file_build: i64,
    pub game_build: i64,
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

pub(crate) fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_live_builds(html: &str) -> Result<BuildPair, String> {
    let document = Html::parse_document(html);
    let heading_selector =
        Selector::parse("h1").map_err(|err| format!("invalid heading selector: {err}"))?;
    let heading = document
        .select(&heading_selector)
        .next()
        .ok_or_else(|| "live page has no heading".to_owned())?;
    let heading_text = element_text(heading);
    // Heading reads "Build NNNNN"; the id sits after the six-character label.
    let file_build = heading_text
        .chars()
        .skip(6)
        .take(5)
        .collect::<String>()
        .parse::<i64>()
        .map_err(|_| format!("heading does not name a build: {heading_text:?}"))?;

    // The link lives inside the heading; matches elsewhere on the page
    // are not the game build.
    let more_selector = Selector::parse(".morebuilds")
        .map_err(|err| format!("invalid morebuilds selector: {err}"))?;
    let game_build = match heading.select(&more_selector).next() {
        Some(link) => {
            let title = link
                .attr("title")
                .ok_or_else(|| "morebuilds link has no title".to_owned())?;
            title
                .chars()
                .skip(1)
                .collect::<String>()
                .parse::<i64>()
                .map_err(|_| format!("morebuilds title is not a build: {title:?}"))?
        }
        None => file_build,
    };

    Ok(BuildPair {
        file_build,
        game_build,
    })
}

/// Finds the change-history row for `file_name` on the live page and reads
/// the build id from its second column.
pub fn parse_file_row_build(html: &str, file_name: &str) -> Result<i64, String> {
    let document = Html::parse_document(html);
    let row_selector =
        Selector::parse("tr").map_err(|err| format!("invalid row selector: {err}"))?;
    let cell_selector =
        Selector::parse("td").map_err(|err| format!("invalid cell selector: {err}"))?;

    for row in document.select(&row_selector) {
        if !element_text(row).contains(file_name) {
            continue;
        }
        let cell = row
            .select(&cell_selector)
            .nth(1)
            .ok_or_else(|| format!("row for {file_name} has no build column"))?;
        return trailing_build(&element_text(cell));
    }

    Err(format!("no table row mentions {file_name}"))
}

fn trailing_build(text: &str) -> Result<i64, String> {
    let len = text.chars().count();
    let tail: String = text.chars().skip(len.saturating_sub(5)).collect();
    tail.parse()
        .map_err(|_| format!("build column does not end in a build id: {text:?}"))
}

pub fn parse_footer_datetime(html: &str) -> Result<NaiveDateTime, String> {
    let document = Html::parse_document(html);
    let footer_selector = Selector::parse("#footer-info-lastmod")
        .map_err(|err| format!("invalid footer selector: {err}"))?;
    let footer = document
        .select(&footer_selector)
        .next()
        .ok_or_else(|| "page has no last-modified footer".to_owned())?;
    let text = element_text(footer);
    let tail: String = text.chars().skip(LASTMOD_PREFIX_LEN).collect();
    NaiveDateTime::parse_from_str(&tail, LASTMOD_FORMAT)
        .map_err(|err| format!("unrecognized last-modified text {text:?}: {err}"))
}

/// Interprets a footer time in the machine's timezone, matching how the
/// stamps were written by earlier runs on the same machine.
///
/// On a fold (clocks set back) the earlier of the two instants wins. Times
/// inside a spring-forward gap have no local mapping at all and resolve an
/// hour later, where the clock actually landed.
pub fn local_epoch(naive: NaiveDateTime) -> Result<i64, String> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(moment) => Ok(moment.timestamp()),
        None => Local
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .map(|moment| moment.timestamp())
            .ok_or_else(|| format!("{naive} is not a valid local time")),
    }
}

/// Shared HTTP client bound to the two site roots.
///
/// The roots are injectable so tests can point the client at a local server.
#[derive(Clone)]
pub struct SiteClient {
    client: Client,
    fxml_base: String,
    wiki_base: String,
}

impl SiteClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_bases(FXML_BASE, WIKI_BASE)
    }

    #[must_use]
    pub fn with_bases(fxml_base: impl Into<String>, wiki_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|err| {
                warn!("falling back to the default http client: {err}");
                Client::new()
            });
        Self {
            client,
            fxml_base: fxml_base.into(),
            wiki_base: wiki_base.into(),
        }
    }

    /// Root used as the prefix of rendered wiki links.
    #[must_use]
    pub fn wiki_base(&self) -> &str {
        &self.wiki_base
    }

    #[must_use]
    pub fn live_url(&self) -> String {
        format!("{}/live", self.fxml_base)
    }

    #[must_use]
    pub fn build_referer(&self, build: i64) -> String {
        format!("{}/{build}", self.fxml_base)
    }

    /// Download URL for one exported file of `build`. Localized exports take
    /// an extra locale segment before the `get` suffix.
    #[must_use]
    pub fn file_url(&self, build: i64, path: &str, language: Option<&str>) -> String {
        match language {
            Some(locale) => format!("{}/{build}{path}/{locale}/get", self.fxml_base),
            None => format!("{}/{build}{path}/get", self.fxml_base),
        }
    }

    #[must_use]
    pub fn wiki_page_url(&self, page: &str) -> String {
        format!("{}/wiki/{page}", self.wiki_base)
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|err| FetchError::connect(url, &err))?
            .error_for_status()
            .map_err(|err| FetchError::connect(url, &err))?;
        response
            .text()
            .await
            .map_err(|err| FetchError::connect(url, &err))
    }

    /// Opens a file download without consuming the body, so the caller can
    /// stream it. The referer is required or the server answers 403.
    pub async fn open_download(
        &self,
        url: &str,
        referer: &str,
    ) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, referer)
            .send()
            .await
            .map_err(|err| FetchError::connect(url, &err))?
            .error_for_status()
            .map_err(|err| FetchError::connect(url, &err))
    }

    pub async fn live_builds(&self) -> Result<BuildPair, FetchError> {
        let url = self.live_url();
        let html = self.fetch_page(&url).await?;
        parse_live_builds(&html).map_err(|reason| FetchError::parse(&url, reason))
    }

    pub async fn file_row_build(&self, file_name: &str) -> Result<i64, FetchError> {
        let url = self.live_url();
        let html = self.fetch_page(&url).await?;
        parse_file_row_build(&html, file_name).map_err(|reason| FetchError::parse(&url, reason))
    }

    pub async fn page_last_modified(&self, page: &str) -> Result<i64, FetchError> {
        let url = self.wiki_page_url(page);
        let html = self.fetch_page(&url).await?;
        let naive =
            parse_footer_datetime(&html).map_err(|reason| FetchError::parse(&url, reason))?;
        local_epoch(naive).map_err(|reason| FetchError::parse(&url, reason))
    }
}
