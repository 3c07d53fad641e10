//! Formula strings for derived cells.
//!
//! Every function takes the 1-based spreadsheet row the formula lives on, so
//! the output reads exactly as it appears in the formula bar.

use rust_xlsxwriter::ColNum;

/// Sheet the dashboard aggregates over.
pub const TRACKER_SHEET: &str = "Post Performance Tracker";

/// A computed cell on a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedCell {
    /// 0-based column index.
    pub col: ColNum,
    pub formula: String,
    /// Rendered with the `0.0"%"` number format.
    pub percent: bool,
}

impl DerivedCell {
    fn plain(col: ColNum, formula: String) -> Self {
        Self {
            col,
            formula,
            percent: false,
        }
    }

    fn percent(col: ColNum, formula: String) -> Self {
        Self {
            col,
            formula,
            percent: true,
        }
    }
}

/// Derived columns N–Q, S, T of the Post Performance sheet.
///
/// Column R (cost per engagement) is a literal placeholder, not a formula.
pub fn performance_row(r: u32) -> Vec<DerivedCell> {
    vec![
        // N: likes + comments + shares
        DerivedCell::plain(13, format!("=SUM(G{r}:I{r})")),
        // O: engagement per impression
        DerivedCell::percent(14, format!("=IF(F{r}>0,N{r}/F{r}*100,0)")),
        // P: (comments + DMs) per impression
        DerivedCell::percent(15, format!("=IF(F{r}>0,(H{r}+J{r})/F{r}*100,0)")),
        // Q: demos per video sent
        DerivedCell::percent(16, format!("=IF(K{r}>0,L{r}/K{r}*100,0)")),
        // S: tier
        DerivedCell::plain(
            18,
            format!("=IF(O{r}>=5,\"🟢 High\",IF(O{r}>=2,\"🟡 Medium\",\"🔴 Low\"))"),
        ),
        // T: pipeline status
        DerivedCell::plain(
            19,
            format!(
                "=IF(L{r}>0,\"✅ Closed\",IF(K{r}>0,\"📹 Video Sent\",\
                 IF(J{r}>0,\"💬 Engaged\",\"👀 Posted\")))"
            ),
        ),
    ]
}

/// Derived columns I–L of the Response Tracker sheet.
pub fn response_row(r: u32) -> Vec<DerivedCell> {
    vec![
        // I: days from engagement to video
        DerivedCell::plain(8, format!("=IF(F{r}=\"\",\"\",F{r}-E{r})")),
        // J: days from engagement to demo
        DerivedCell::plain(9, format!("=IF(G{r}=\"\",\"\",G{r}-E{r})")),
        // K: speed grade
        DerivedCell::plain(
            10,
            format!(
                "=IF(I{r}=\"\",\"\",IF(I{r}<=1,\"🟢 Fast\",IF(I{r}<=3,\"🟡 OK\",\"🔴 Slow\")))"
            ),
        ),
        // L: pipeline stage
        DerivedCell::plain(
            11,
            format!(
                "=IF(H{r}=\"Demo Booked\",\"Stage 3: Demo\",IF(F{r}<>\"\",\"Stage 2: Video Sent\",\
                 IF(E{r}<>\"\",\"Stage 1: Engaged\",\"\")))"
            ),
        ),
    ]
}

/// `'Post Performance Tracker'!C:C`
pub fn tracker_column(letter: char) -> String {
    format!("'{TRACKER_SHEET}'!{letter}:{letter}")
}

/// Count of tracker rows whose `key` column equals `value`.
pub fn count_if(key: char, value: &str) -> String {
    format!("=COUNTIF({},\"{value}\")", tracker_column(key))
}

/// Average of `target` over tracker rows whose `key` column equals `value`; 0 if none.
pub fn average_if(key: char, value: &str, target: char) -> String {
    format!(
        "=IFERROR(AVERAGEIF({},\"{value}\",{}),0)",
        tracker_column(key),
        tracker_column(target)
    )
}

/// Sum of `target` over tracker rows whose `key` column equals `value`.
pub fn sum_if(key: char, value: &str, target: char) -> String {
    format!(
        "=SUMIF({},\"{value}\",{})",
        tracker_column(key),
        tracker_column(target)
    )
}

/// Sum of a whole tracker column.
pub fn sum_column(target: char) -> String {
    format!("=SUM({})", tracker_column(target))
}
