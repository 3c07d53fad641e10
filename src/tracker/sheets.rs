//! Sheet layouts: headers, sample rows, formulas, formatting, validation.

use rust_xlsxwriter::{
    Color, ColNum, ConditionalFormat3ColorScale, ConditionalFormatCell,
    ConditionalFormatCellRule, ConditionalFormatText, ConditionalFormatTextRule,
    ConditionalFormatType, DataValidation, ExcelDateTime, Format, FormatAlign, RowNum, Worksheet,
    XlsxError,
};

use super::formulas::{
    self, DerivedCell, TRACKER_SHEET, average_if, count_if, sum_column, sum_if,
};
use super::samples::{
    PAIN_POINTS, PERFORMANCE_ROWS, POST_TYPES, PROSPECT_ROWS, VERTICALS,
};

type Result<T> = core::result::Result<T, XlsxError>;

/// Last row (0-based) that conditional formats and dropdowns cover.
const LAST_FORMATTED_ROW: RowNum = 99;

const HEADER_BLUE: Color = Color::RGB(0x004A_90E2);
const RED: Color = Color::RGB(0x00EA_4335);
const AMBER: Color = Color::RGB(0x00FB_BC04);
const GREEN: Color = Color::RGB(0x0034_A853);

const PERFORMANCE_HEADERS: [&str; 20] = [
    "Post ID",
    "Date Posted",
    "Vertical",
    "Pain Point",
    "Post Type",
    "Impressions",
    "Likes",
    "Comments",
    "Shares",
    "DMs Received",
    "Videos Sent",
    "Demos Booked",
    "Notes",
    "Total Engagement",
    "Engagement %",
    "Conversion %",
    "Video→Demo %",
    "Cost/Engage",
    "Tier",
    "Status",
];

const PERFORMANCE_WIDTHS: [f64; 20] = [
    10.0, 12.0, 12.0, 20.0, 12.0, 12.0, 8.0, 10.0, 8.0, 12.0, 12.0, 12.0, 35.0, 12.0, 12.0, 12.0,
    12.0, 12.0, 12.0, 15.0,
];

const RESPONSE_HEADERS: [&str; 12] = [
    "Prospect",
    "Vertical",
    "Post ID",
    "Engage Type",
    "Date Engaged",
    "Video Sent",
    "Demo Date",
    "Status",
    "Days→Video",
    "Days→Demo",
    "Speed Grade",
    "Stage",
];

const RESPONSE_WIDTHS: [f64; 12] = [
    18.0, 12.0, 10.0, 12.0, 14.0, 14.0, 14.0, 15.0, 12.0, 12.0, 15.0, 18.0,
];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_BLUE)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn section_format() -> Format {
    Format::new().set_bold().set_font_size(14)
}

fn percent_format() -> Format {
    Format::new().set_num_format("0.0\"%\"")
}

fn date_format() -> Format {
    Format::new().set_num_format("yyyy-mm-dd")
}

fn fill(color: Color) -> Format {
    Format::new().set_background_color(color)
}

fn alert_fill(color: Color) -> Format {
    Format::new()
        .set_background_color(color)
        .set_font_color(Color::White)
        .set_bold()
}

fn write_headers(ws: &mut Worksheet, row: RowNum, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in (0..).zip(headers) {
        ws.write_string_with_format(row, col, *header, &format)?;
    }
    Ok(())
}

fn set_widths(ws: &mut Worksheet, widths: &[f64]) -> Result<()> {
    for (col, width) in (0..).zip(widths) {
        ws.set_column_width(col, *width)?;
    }
    Ok(())
}

fn write_date(ws: &mut Worksheet, row: RowNum, col: ColNum, ymd: (u16, u8, u8)) -> Result<()> {
    let (y, m, d) = ymd;
    let date = ExcelDateTime::from_ymd(y, m, d)?;
    ws.write_datetime_with_format(row, col, &date, &date_format())?;
    Ok(())
}

fn write_derived(ws: &mut Worksheet, row: RowNum, cells: Vec<DerivedCell>) -> Result<()> {
    let percent = percent_format();
    for cell in cells {
        if cell.percent {
            ws.write_formula_with_format(row, cell.col, cell.formula.as_str(), &percent)?;
        } else {
            ws.write_formula(row, cell.col, cell.formula.as_str())?;
        }
    }
    Ok(())
}

fn text_contains(text: &str, format: Format) -> ConditionalFormatText {
    ConditionalFormatText::new()
        .set_rule(ConditionalFormatTextRule::Contains(text.to_string()))
        .set_format(format)
}

fn list_validation(items: &[&str]) -> Result<DataValidation> {
    Ok(DataValidation::new()
        .allow_list_strings(items)?
        .ignore_blank(false))
}

/// Tab 1: one row per post.
pub fn post_performance(ws: &mut Worksheet) -> Result<()> {
    ws.set_name(TRACKER_SHEET)?;
    write_headers(ws, 0, &PERFORMANCE_HEADERS)?;

    for (row, post) in (1..).zip(PERFORMANCE_ROWS.iter()) {
        ws.write_string(row, 0, post.post_id)?;
        write_date(ws, row, 1, post.date)?;
        ws.write_string(row, 2, post.vertical)?;
        ws.write_string(row, 3, post.pain_point)?;
        ws.write_string(row, 4, post.post_type)?;
        let counters = [
            post.impressions,
            post.likes,
            post.comments,
            post.shares,
            post.dms,
            post.videos_sent,
            post.demos_booked,
        ];
        for (col, value) in (5..).zip(counters) {
            ws.write_number(row, col, value)?;
        }
        ws.write_string(row, 12, post.notes)?;

        write_derived(ws, row, formulas::performance_row(row + 1))?;
        // Cost/Engage: reserved for paid spend.
        ws.write_number(row, 17, 0)?;
    }

    let heatmap = ConditionalFormat3ColorScale::new()
        .set_minimum(ConditionalFormatType::Number, 0)
        .set_midpoint(ConditionalFormatType::Number, 5)
        .set_maximum(ConditionalFormatType::Number, 10)
        .set_minimum_color(RED)
        .set_midpoint_color(AMBER)
        .set_maximum_color(GREEN);
    ws.add_conditional_format(1, 14, LAST_FORMATTED_ROW, 14, &heatmap)?;

    for (text, color) in [
        ("High", Color::RGB(0x00D4_EDDA)),
        ("Medium", Color::RGB(0x00FF_F3CD)),
        ("Low", Color::RGB(0x00F8_D7DA)),
    ] {
        ws.add_conditional_format(1, 18, LAST_FORMATTED_ROW, 18, &text_contains(text, fill(color)))?;
    }

    let demo_booked = ConditionalFormatCell::new()
        .set_rule(ConditionalFormatCellRule::GreaterThan(0))
        .set_format(alert_fill(GREEN));
    ws.add_conditional_format(1, 11, LAST_FORMATTED_ROW, 11, &demo_booked)?;

    set_widths(ws, &PERFORMANCE_WIDTHS)?;
    ws.set_freeze_panes(1, 0)?;

    for (col, items) in [(2, &VERTICALS), (3, &PAIN_POINTS), (4, &POST_TYPES)] {
        ws.add_data_validation(1, col, LAST_FORMATTED_ROW, col, &list_validation(items)?)?;
    }

    Ok(())
}

/// Tab 2: aggregates over the tracker sheet.
pub fn dashboard(ws: &mut Worksheet) -> Result<()> {
    ws.set_name("Dashboard")?;
    let section = section_format();
    let percent = percent_format();
    let bold = Format::new().set_bold();

    // Vertical performance summary: rows 1-6.
    ws.write_string_with_format(0, 0, "VERTICAL PERFORMANCE SUMMARY", &section)?;
    write_headers(
        ws,
        1,
        &[
            "Vertical",
            "Total Posts",
            "Avg Engage%",
            "Total DMs",
            "Videos Sent",
            "Demos Booked",
        ],
    )?;
    for (row, vertical) in (2..).zip(["Electrical", "HVAC", "Plumbing"]) {
        ws.write_string(row, 0, vertical)?;
        ws.write_formula(row, 1, count_if('C', vertical).as_str())?;
        ws.write_formula_with_format(row, 2, average_if('C', vertical, 'O').as_str(), &percent)?;
        ws.write_formula(row, 3, sum_if('C', vertical, 'J').as_str())?;
        ws.write_formula(row, 4, sum_if('C', vertical, 'K').as_str())?;
        ws.write_formula(row, 5, sum_if('C', vertical, 'L').as_str())?;
    }
    ws.write_string_with_format(5, 0, "TOTAL", &bold)?;
    ws.write_formula_with_format(5, 1, "=SUM(B3:B5)", &bold)?;
    ws.write_formula_with_format(5, 2, "=AVERAGE(C3:C5)", &percent.clone().set_bold())?;
    ws.write_formula_with_format(5, 3, "=SUM(D3:D5)", &bold)?;
    ws.write_formula_with_format(5, 4, "=SUM(E3:E5)", &bold)?;
    ws.write_formula_with_format(5, 5, "=SUM(F3:F5)", &bold)?;

    // Pain point performance: rows 9-13.
    ws.write_string_with_format(8, 0, "PAIN POINT PERFORMANCE", &section)?;
    write_headers(ws, 9, &["Pain Point", "Posts Count", "Avg Engage%", "Demos"])?;
    for (row, pain) in (10..).zip(&PAIN_POINTS[..3]) {
        ws.write_string(row, 0, *pain)?;
        ws.write_formula(row, 1, count_if('D', pain).as_str())?;
        ws.write_formula_with_format(row, 2, average_if('D', pain, 'O').as_str(), &percent)?;
        ws.write_formula(row, 3, sum_if('D', pain, 'L').as_str())?;
    }

    // Weekly trends: rows 16-21. Filled in by hand until dated ranges exist.
    ws.write_string_with_format(15, 0, "WEEKLY TRENDS", &section)?;
    write_headers(
        ws,
        16,
        &["Week", "Posts Published", "Total DMs", "Demos Booked"],
    )?;
    for (row, week) in (17..).zip(["Week 1", "Week 2", "Week 3", "Week 4"]) {
        ws.write_string(row, 0, week)?;
        for col in 1..=3 {
            ws.write_number(row, col, 0)?;
        }
    }

    // Conversion funnel: rows 23-29.
    ws.write_string_with_format(22, 0, "CONVERSION FUNNEL", &section)?;
    ws.write_string_with_format(23, 0, "Stage", &bold)?;
    ws.write_string_with_format(23, 1, "Count", &bold)?;
    let funnel = [
        ("Total Impressions", 'F'),
        ("Total Engagement", 'N'),
        ("DMs Received", 'J'),
        ("Videos Sent", 'K'),
        ("Demos Booked", 'L'),
    ];
    for (row, (stage, column)) in (24..).zip(funnel) {
        ws.write_string(row, 0, stage)?;
        ws.write_formula(row, 1, sum_column(column).as_str())?;
    }

    set_widths(ws, &[25.0, 15.0, 15.0, 15.0, 15.0, 15.0])?;
    Ok(())
}

/// Tab 3: one row per prospect who raised a hand.
pub fn response_tracker(ws: &mut Worksheet) -> Result<()> {
    ws.set_name("Response Tracker")?;
    write_headers(ws, 0, &RESPONSE_HEADERS)?;

    for (row, prospect) in (1..).zip(PROSPECT_ROWS.iter()) {
        ws.write_string(row, 0, prospect.prospect)?;
        ws.write_string(row, 1, prospect.vertical)?;
        ws.write_string(row, 2, prospect.post_id)?;
        ws.write_string(row, 3, prospect.engage_type)?;
        write_date(ws, row, 4, prospect.engaged)?;
        if let Some(date) = prospect.video_sent {
            write_date(ws, row, 5, date)?;
        }
        if let Some(date) = prospect.demo_date {
            write_date(ws, row, 6, date)?;
        }
        ws.write_string(row, 7, prospect.status)?;

        write_derived(ws, row, formulas::response_row(row + 1))?;
    }

    let overdue = ConditionalFormatCell::new()
        .set_rule(ConditionalFormatCellRule::GreaterThan(2))
        .set_format(alert_fill(RED));
    ws.add_conditional_format(1, 8, LAST_FORMATTED_ROW, 8, &overdue)?;

    for (text, color) in [("Stage 3", GREEN), ("Stage 2", AMBER), ("Stage 1", HEADER_BLUE)] {
        ws.add_conditional_format(1, 11, LAST_FORMATTED_ROW, 11, &text_contains(text, fill(color)))?;
    }

    set_widths(ws, &RESPONSE_WIDTHS)?;
    ws.set_freeze_panes(1, 0)?;
    Ok(())
}
