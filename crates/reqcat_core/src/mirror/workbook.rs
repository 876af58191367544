//! Xlsx workbook append implementation.
//!
//! # Responsibility
//! - Create the workbook with a styled header row on first use.
//! - Append exactly one row per submitted requirement.
//!
//! # Invariants
//! - Column order follows `REQUIREMENT_FIELDS`; unknown keys are dropped,
//!   absent keys become empty cells.
//! - `append` never returns an error; failures become
//!   `MirrorStatus::Error` outcomes.
//! - Load-then-save is not locked across processes (see module docs of
//!   [`crate::mirror`]).

use crate::mirror::{MirrorOutcome, MirrorStatus};
use crate::model::requirement::REQUIREMENT_FIELDS;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

const SHEET_NAME: &str = "Requirements";
const HEADER_FILL_ARGB: &str = "FF1F4E79";
const HEADER_FONT_ARGB: &str = "FFFFFFFF";
const HEADER_COLUMN_WIDTH: f64 = 20.0;
const COLUMN_LETTERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

pub type MirrorResult<T> = Result<T, MirrorError>;

/// Internal mirror failure; absorbed before reaching callers.
#[derive(Debug)]
pub enum MirrorError {
    Io(std::io::Error),
    /// Workbook could not be loaded or saved.
    Workbook(String),
    /// Existing workbook does not contain the requirements sheet.
    MissingSheet(&'static str),
}

impl Display for MirrorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Workbook(message) => write!(f, "workbook error: {message}"),
            Self::MissingSheet(name) => write!(f, "workbook has no sheet named `{name}`"),
        }
    }
}

impl Error for MirrorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MirrorError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Best-effort xlsx mirror bound to a configured file path.
pub struct ExcelMirror {
    path: PathBuf,
}

impl ExcelMirror {
    /// Binds the mirror to a workbook path. Nothing is touched on disk
    /// until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured workbook path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row of field values to the workbook.
    ///
    /// Never fails the caller: any error is logged and reported as a
    /// `MirrorStatus::Error` outcome.
    pub fn append(&self, fields: &BTreeMap<String, String>) -> MirrorOutcome {
        let label = fields
            .get("attribute")
            .map(String::as_str)
            .unwrap_or_default();

        match self.try_append(fields) {
            Ok(()) => {
                info!(
                    "event=mirror_append module=mirror status=ok path={}",
                    self.path.display()
                );
                MirrorOutcome {
                    status: MirrorStatus::Inserted,
                    message: format!("'{label}' added to Excel"),
                }
            }
            Err(err) => {
                warn!(
                    "event=mirror_append module=mirror status=error path={} error={}",
                    self.path.display(),
                    err
                );
                MirrorOutcome {
                    status: MirrorStatus::Error,
                    message: "Failed to insert into Excel".to_string(),
                }
            }
        }
    }

    fn try_append(&self, fields: &BTreeMap<String, String>) -> MirrorResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut book = if self.path.exists() {
            umya_spreadsheet::reader::xlsx::read(&self.path)
                .map_err(|err| MirrorError::Workbook(format!("{err:?}")))?
        } else {
            new_workbook_with_header()?
        };

        let sheet = book
            .get_sheet_by_name_mut(SHEET_NAME)
            .ok_or(MirrorError::MissingSheet(SHEET_NAME))?;

        let next_row = sheet.get_highest_row() + 1;
        for (col_idx, field) in REQUIREMENT_FIELDS.iter().enumerate() {
            let value = fields.get(*field).map(String::as_str).unwrap_or("");
            let col = col_idx as u32 + 1;
            sheet.get_cell_mut((col, next_row)).set_value(value);
        }

        umya_spreadsheet::writer::xlsx::write(&book, &self.path)
            .map_err(|err| MirrorError::Workbook(format!("{err:?}")))?;

        Ok(())
    }
}

fn new_workbook_with_header() -> MirrorResult<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(SHEET_NAME)
        .map_err(|err| MirrorError::Workbook(err.to_string()))?;
    write_header_row(sheet);
    Ok(book)
}

fn write_header_row(sheet: &mut Worksheet) {
    for (col_idx, field) in REQUIREMENT_FIELDS.iter().enumerate() {
        let col = col_idx as u32 + 1;
        sheet.get_cell_mut((col, 1)).set_value(header_title(field));

        let style = sheet.get_style_mut((col, 1));
        style.set_background_color(HEADER_FILL_ARGB);
        let font = style.get_font_mut();
        font.set_bold(true);
        font.get_color_mut().set_argb(HEADER_FONT_ARGB);

        sheet
            .get_column_dimension_mut(COLUMN_LETTERS[col_idx])
            .set_width(HEADER_COLUMN_WIDTH);
    }
}

/// Turns a field key into its header text, e.g. `source_system` ->
/// `Source System`.
fn header_title(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::header_title;

    #[test]
    fn header_title_title_cases_underscored_keys() {
        assert_eq!(header_title("source_system"), "Source System");
        assert_eq!(header_title("attribute"), "Attribute");
        assert_eq!(header_title("responsible_analyst"), "Responsible Analyst");
    }
}
