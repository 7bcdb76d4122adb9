//! Pro-Football-Reference schedule page: one GET per season plus extraction
//! of the `games` table into a [`RawTable`].

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::info;

use crate::common::error::{Result, ScraperError};
use crate::pipeline::raw_table::RawTable;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub fn schedule_url(year: i32) -> String {
    format!("https://www.pro-football-reference.com/years/{year}/games.htm")
}

/// Fetch the schedule page for one season. Single request, fixed deadline,
/// no retries; retry policy belongs to callers if they want one.
pub async fn fetch_schedule_page(year: i32) -> Result<String> {
    let url = schedule_url(year);
    info!("HTTP GET request to: {}", url);
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let resp = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?;
    let body = resp.text().await?;
    info!("fetched schedule page for {}: {} bytes", year, body.len());
    Ok(body)
}

/// Extract the `games` table from the schedule page.
///
/// PFR ships many tables inside HTML comments to defeat naive scrapers, so a
/// miss on the live DOM strips the comment markers and parses again. No table
/// either way means the page has no schedule for this season.
pub fn extract_games_table(html: &str, year: i32) -> Result<RawTable> {
    if let Some(table) = select_games_table(html) {
        return Ok(table);
    }
    let uncommented = html.replace("<!--", "").replace("-->", "");
    select_games_table(&uncommented).ok_or(ScraperError::TableNotFound { year })
}

fn select_games_table(html: &str) -> Option<RawTable> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table#games").unwrap();
    let header_sel = Selector::parse("thead tr th").unwrap();
    let row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();

    let table = document.select(&table_sel).next()?;

    // Blank header cells get positional labels, same as the tabular loaders
    // downstream of this data have always produced.
    let columns: Vec<String> = table
        .select(&header_sel)
        .enumerate()
        .map(|(i, th)| {
            let label = th.text().collect::<String>().trim().to_string();
            if label.is_empty() {
                format!("Unnamed: {i}")
            } else {
                label
            }
        })
        .collect();

    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        // PFR repeats the header mid-table as <tr class="thead">.
        if tr.value().classes().any(|class| class == "thead") {
            continue;
        }
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    Some(RawTable::new(columns, rows))
}
