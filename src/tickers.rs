//! NASDAQ-100 ticker acquisition.
//!
//! A consumer of the retry executor: fetches the NASDAQ-100 component table
//! from Wikipedia, extracts ticker symbols from the markup, and falls back
//! to a hardcoded list whenever the network, the markup, or the symbol
//! count lets us down. This module never fails - every failure path
//! degrades to [`fallback_tickers`].
//!
//! Only available with the `tickers` feature.

use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::{Operation, Retrier, RetryPolicy};

/// The page the component table is scraped from.
pub const NASDAQ_100_URL: &str = "https://en.wikipedia.org/wiki/NASDAQ-100";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepted symbol-count range; outside it the scrape is assumed broken.
const EXPECTED_COUNT: std::ops::RangeInclusive<usize> = 80..=120;

/// Table-header words that match the ticker shape but are not tickers.
const HEADER_WORDS: [&str; 5] = ["TICKER", "SYMBOL", "COMPANY", "NAME", "WEIGHT"];

/// Current NASDAQ-100 ticker symbols, deduplicated and sorted.
///
/// Scrapes [`NASDAQ_100_URL`] with retries; returns [`fallback_tickers`]
/// if the fetch fails or yields an implausible number of symbols.
pub fn nasdaq100_tickers() -> Vec<String> {
    tickers_from(NASDAQ_100_URL)
}

/// Like [`nasdaq100_tickers`], but against an alternate URL.
pub fn tickers_from(url: &str) -> Vec<String> {
    let policy = RetryPolicy::exponential(Duration::from_secs(1))
        .with_max_retries(2)
        .with_max_delay(Duration::from_secs(10));
    // Non-zero literal delays; validation cannot fail.
    let retrier = Retrier::new(policy).expect("valid policy");

    let outcome = retrier.execute(Operation::new("fetch nasdaq-100 page", || fetch_page(url)));
    match outcome.into_result() {
        Ok(body) => {
            let tickers = extract_tickers(&body);
            if EXPECTED_COUNT.contains(&tickers.len()) {
                tickers
            } else {
                fallback_tickers()
            }
        }
        Err(_) => fallback_tickers(),
    }
}

fn fetch_page(url: &str) -> Result<String, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    client.get(url).send()?.error_for_status()?.text()
}

/// Pull ticker-shaped tokens out of table cells.
///
/// A token qualifies if, after stripping nested tags and whitespace, it is
/// 1 to 5 ASCII uppercase letters and not a known header word. Output is
/// deduplicated and sorted.
// Compiled once; the patterns are static and known-good.
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[dh](?:\s[^>]*)?>(.*?)</t[dh]\s*>").expect("valid pattern"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid pattern"));

fn extract_tickers(html: &str) -> Vec<String> {
    let mut tickers = BTreeSet::new();
    for capture in CELL_RE.captures_iter(html) {
        let inner = TAG_RE.replace_all(&capture[1], "");
        let text = inner.trim();
        if is_ticker_token(text) {
            tickers.insert(text.to_string());
        }
    }
    tickers.into_iter().collect()
}

fn is_ticker_token(text: &str) -> bool {
    !text.is_empty()
        && text.len() <= 5
        && text.chars().all(|c| c.is_ascii_uppercase())
        && !HEADER_WORDS.contains(&text)
}

/// Hardcoded NASDAQ-100 tickers, used when scraping fails.
///
/// Snapshot of the index membership as of 2024; refreshed manually.
pub fn fallback_tickers() -> Vec<String> {
    [
        "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "NVDA", "META", "TSLA", "NFLX", "ADBE",
        "CRM", "PEP", "COST", "AVGO", "CSCO", "TMUS", "INTC", "AMD", "QCOM", "INTU",
        "HON", "ISRG", "GILD", "MDLZ", "ADP", "PYPL", "REGN", "VRTX", "ABNB", "KLAC",
        "SNPS", "PANW", "CDNS", "MU", "ORLY", "MNST", "KDP", "LRCX", "ASML", "CHTR",
        "MAR", "MELI", "FTNT", "CTAS", "ODFL", "PAYX", "ROST", "IDXX", "BIIB", "FAST",
        "VRSK", "WDAY", "DXCM", "CPRT", "XEL", "PCAR", "ALGN", "SIRI", "MRVL", "ZS",
        "LCID", "JD", "PDD", "BIDU", "NTES", "TCOM", "WBA", "EA", "UBER",
        "LYFT", "DASH", "RIVN", "PLTR", "SNOW", "CRWD", "OKTA", "TEAM", "SPOT",
        "PINS", "SNAP", "BYND", "PTON", "DOCU", "RBLX", "ZM",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tickers_tests {
    use super::*;

    fn table(cells: &[&str]) -> String {
        let rows: String = cells
            .iter()
            .map(|c| format!("<tr><td>{}</td></tr>", c))
            .collect();
        format!("<table class=\"wikitable\">{}</table>", rows)
    }

    #[test]
    fn test_extract_tickers_filters_and_sorts() {
        let html = table(&[
            "MSFT",
            "AAPL",
            "Apple Inc.",
            "TICKER",
            "TOOLONGG",
            "msft",
            "AAPL", // duplicate
            "<a href=\"/wiki/Nvidia\">NVDA</a>",
            " GOOG ",
        ]);

        let tickers = extract_tickers(&html);
        assert_eq!(tickers, vec!["AAPL", "GOOG", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_extract_tickers_is_reusable() {
        let html = table(&["AAPL", "MSFT"]);
        let first = extract_tickers(&html);
        let second = extract_tickers(&html);
        assert_eq!(first, vec!["AAPL", "MSFT"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_tickers_reads_header_cells_too() {
        let html = "<table><tr><th>SYMBOL</th><th>EA</th></tr></table>";
        assert_eq!(extract_tickers(html), vec!["EA"]);
    }

    #[test]
    fn test_header_words_are_excluded() {
        for word in HEADER_WORDS {
            assert!(!is_ticker_token(word));
        }
        assert!(is_ticker_token("AAPL"));
        assert!(!is_ticker_token(""));
        assert!(!is_ticker_token("BRK.B"));
    }

    #[test]
    fn test_fallback_list_shape() {
        let tickers = fallback_tickers();
        assert_eq!(tickers.len(), 85);
        assert!(tickers.iter().all(|t| is_ticker_token(t)));

        let unique: std::collections::BTreeSet<_> = tickers.iter().collect();
        assert_eq!(unique.len(), tickers.len());
    }

    #[test]
    fn test_scrape_accepted_when_count_plausible() {
        let symbols: Vec<String> = (0..90)
            .map(|i| format!("{}{}", char::from(b'A' + (i / 26) as u8), char::from(b'A' + (i % 26) as u8)))
            .collect();
        let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(table(&refs))
            .create();

        let tickers = tickers_from(&server.url());
        mock.assert();
        assert_eq!(tickers.len(), 90);
        assert!(tickers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_scrape_with_too_few_symbols_falls_back() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(table(&["AAPL", "MSFT", "NVDA"]))
            .create();

        let tickers = tickers_from(&server.url());
        assert_eq!(tickers, fallback_tickers());
    }
}
