//! Builds a fresh tracker workbook: the Applications table, a formula-driven
//! Dashboard and a Config settings table.

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::errors::AppError;
use crate::models::Status;
use crate::tracker::schema::{
    APPLICATIONS_SHEET, COLUMNS, COL_PLATFORM, COL_STATUS, CONFIG_SHEET, DASHBOARD_PLATFORMS,
    DASHBOARD_SHEET, HEADER_ROW,
};

/// Statuses that count as "the application went out".
const SUBMITTED: [Status; 7] = [
    Status::Applied,
    Status::PhoneScreen,
    Status::Interview,
    Status::TechnicalTest,
    Status::FinalRound,
    Status::Offer,
    Status::Rejected,
];

/// Statuses that count as a response from the employer.
const RESPONDED: [Status; 4] = [
    Status::PhoneScreen,
    Status::Interview,
    Status::FinalRound,
    Status::Offer,
];

pub fn new_workbook(settings: &[(&str, String)]) -> Result<Spreadsheet, AppError> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    let applications = add_sheet(&mut book, APPLICATIONS_SHEET)?;
    write_header(applications);

    let dashboard = add_sheet(&mut book, DASHBOARD_SHEET)?;
    write_dashboard(dashboard);

    let config = add_sheet(&mut book, CONFIG_SHEET)?;
    write_settings(config, settings);

    Ok(book)
}

fn add_sheet<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet, AppError> {
    book.new_sheet(name)
        .map_err(|e| AppError::Tracker(format!("Cannot add sheet '{name}': {e}")))
}

fn write_header(sheet: &mut Worksheet) {
    for (idx, header) in COLUMNS.iter().enumerate() {
        let cell = sheet.get_cell_mut((idx as u32 + 1, HEADER_ROW));
        cell.set_value(*header);
        cell.get_style_mut().get_font_mut().set_bold(true);
    }
}

fn status_column() -> String {
    format!("{APPLICATIONS_SHEET}!{}:{}", col_letter(COL_STATUS), col_letter(COL_STATUS))
}

fn countif_sum(statuses: &[Status]) -> String {
    let range = status_column();
    statuses
        .iter()
        .map(|s| format!("COUNTIF({range},\"{s}\")"))
        .collect::<Vec<_>>()
        .join("+")
}

fn write_dashboard(sheet: &mut Worksheet) {
    sheet.get_cell_mut("B2").set_value("Job Application Dashboard");
    sheet.get_cell_mut("B2").get_style_mut().get_font_mut().set_bold(true);

    let cards = [
        ("B", "Total Applied", countif_sum(&SUBMITTED)),
        (
            "D",
            "Interviews",
            countif_sum(&[Status::Interview, Status::FinalRound]),
        ),
        ("F", "Offers", countif_sum(&[Status::Offer])),
        (
            "H",
            "Response Rate",
            format!(
                "IFERROR(TEXT(({})/({}),\"0%\"),\"0%\")",
                countif_sum(&RESPONDED),
                countif_sum(&SUBMITTED)
            ),
        ),
    ];
    for (col, label, formula) in cards {
        sheet.get_cell_mut(&*format!("{col}4")).set_value(label);
        sheet.get_cell_mut(&*format!("{col}5")).set_formula(formula);
    }

    sheet.get_cell_mut("B7").set_value("Applications by Platform");
    sheet.get_cell_mut("B8").set_value("Platform");
    sheet.get_cell_mut("C8").set_value("Count");
    let platform_col = col_letter(COL_PLATFORM);
    for (offset, platform) in DASHBOARD_PLATFORMS.iter().enumerate() {
        let row = 9 + offset as u32;
        sheet.get_cell_mut(&*format!("B{row}")).set_value(*platform);
        sheet.get_cell_mut(&*format!("C{row}")).set_formula(format!(
            "COUNTIF({APPLICATIONS_SHEET}!{platform_col}:{platform_col},\"{platform}\")"
        ));
    }
}

fn write_settings(sheet: &mut Worksheet, settings: &[(&str, String)]) {
    sheet.get_cell_mut("A1").set_value("Setting");
    sheet.get_cell_mut("B1").set_value("Value");
    sheet.get_cell_mut("A1").get_style_mut().get_font_mut().set_bold(true);
    sheet.get_cell_mut("B1").get_style_mut().get_font_mut().set_bold(true);
    for (offset, (key, value)) in settings.iter().enumerate() {
        let row = 2 + offset as u32;
        sheet.get_cell_mut((1, row)).set_value(*key);
        sheet.get_cell_mut((2, row)).set_value(value.as_str());
    }
}

/// 1-based column number to spreadsheet letters (1 → A, 27 → AA).
pub fn col_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}
