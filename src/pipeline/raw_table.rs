use crate::common::error::{Result, ScraperError};

/// Marker-column labels in priority order. Which label the schedule page uses
/// varies by rendering: sometimes the header cell reads "@", sometimes it is
/// blank and gets a positional `Unnamed: {i}` label during extraction. The
/// first label present in the table wins.
pub const AT_MARKER_CANDIDATES: &[&str] = &["@", "Unnamed: 5", "Unnamed: 6"];

/// A generic extraction of one HTML table: ordered column labels plus string
/// cells. Normalization never mutates it; every pass builds fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Project every row through a resolved layout.
    pub fn game_rows(&self, layout: &ColumnLayout) -> Vec<RawGameRow> {
        self.rows
            .iter()
            .map(|cells| RawGameRow {
                week: cell(cells, Some(layout.week)).unwrap_or_default(),
                day: cell(cells, layout.day),
                date: cell(cells, Some(layout.date)).unwrap_or_default(),
                time: cell(cells, layout.time),
                winner: cell(cells, Some(layout.winner)).unwrap_or_default(),
                loser: cell(cells, Some(layout.loser)).unwrap_or_default(),
                pts_winner: cell(cells, layout.pts_winner),
                pts_loser: cell(cells, layout.pts_loser),
                ot: cell(cells, layout.ot),
                at_marker: cell(cells, layout.at_marker),
            })
            .collect()
    }
}

fn cell(cells: &[String], index: Option<usize>) -> Option<String> {
    let value = cells.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One table row as a typed optional-field record. Field names follow the
/// source table: `winner`/`loser` are the "Winner/tie" and "Loser/tie" cells,
/// which can each be home or away depending on the at-marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGameRow {
    pub week: String,
    pub day: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub winner: String,
    pub loser: String,
    pub pts_winner: Option<String>,
    pub pts_loser: Option<String>,
    pub ot: Option<String>,
    pub at_marker: Option<String>,
}

/// Column presence, resolved once per table before any row is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub week: usize,
    pub day: Option<usize>,
    pub date: usize,
    pub time: Option<usize>,
    pub winner: usize,
    pub loser: usize,
    pub pts_winner: Option<usize>,
    pub pts_loser: Option<usize>,
    pub ot: Option<usize>,
    pub at_marker: Option<usize>,
}

impl ColumnLayout {
    pub fn resolve(table: &RawTable) -> Result<Self> {
        let required = |label: &str| {
            table
                .column_index(label)
                .ok_or_else(|| ScraperError::MissingField(format!("column '{label}'")))
        };
        Ok(Self {
            week: required("Week")?,
            day: table.column_index("Day"),
            date: required("Date")?,
            time: table.column_index("Time"),
            winner: required("Winner/tie")?,
            loser: required("Loser/tie")?,
            pts_winner: table.column_index("PtsW"),
            pts_loser: table.column_index("PtsL"),
            ot: table.column_index("OT"),
            at_marker: AT_MARKER_CANDIDATES
                .iter()
                .find_map(|label| table.column_index(label)),
        })
    }
}
