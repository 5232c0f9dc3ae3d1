use std::path::Path;

use _model::{Contact, RawContact, RawOrder};
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

// column layout of the order sheet
const FIRST_NAME: usize = 0;
const LAST_NAME: usize = 1;
const ADDRESS: usize = 2;
const CITY: usize = 3;
const STATE: usize = 4;
const ZIP_CODE: usize = 5;
const PHONE: usize = 6;
const PHONE2: usize = 7;
const EMAIL: usize = 8;
const UNITS: usize = 9;
const DELIVERY: usize = 10;
// 11: amount paid
const NOTES: usize = 12;

static EMPTY: Data = Data::Empty;

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("row {row}: delivery flag is blank")]
    MissingDeliveryFlag { row: usize },
    #[error("row {row}: invalid quantity {value:?}")]
    InvalidQuantity { row: usize, value: String },
}

/// Reads the orders needing delivery from `sheet` of the workbook at `path`.
/// `max_rows` counts the header row.
pub fn load(path: &Path, sheet: &str, max_rows: usize) -> Result<Vec<Contact>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("Failed to read sheet {sheet:?} of {}", path.display()))?;

    let contacts = read_rows(range.rows(), max_rows)
        .with_context(|| format!("Malformed sheet {sheet:?} in {}", path.display()))?;
    log::info!(
        "Loaded {} deliveries from {} ({} rows in sheet)",
        contacts.len(),
        path.display(),
        range.height()
    );

    Ok(contacts)
}

pub fn read_rows<'a, I>(rows: I, max_rows: usize) -> Result<Vec<Contact>, RowError>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut output = Vec::new();

    for (i, row) in rows.into_iter().enumerate().take(max_rows).skip(1) {
        let line = i + 1;
        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY);

        let delivery =
            needs_delivery(cell(DELIVERY)).ok_or(RowError::MissingDeliveryFlag { row: line })?;
        if !delivery {
            continue;
        }

        let raw = RawContact {
            first_name: text(cell(FIRST_NAME)),
            last_name: text(cell(LAST_NAME)),
            email: text(cell(EMAIL)),
            phone: text(cell(PHONE)),
            address: text(cell(ADDRESS)),
            city: text(cell(CITY)),
            state: text(cell(STATE)),
            zip_code: text(cell(ZIP_CODE)),
            order: Some(RawOrder {
                units: units(cell(UNITS), line)?,
                phone2: text(cell(PHONE2)),
                notes: text(cell(NOTES)),
            }),
        };
        output.push(raw.refine());
    }

    Ok(output)
}

/// `None` when the flag is blank or not text at all.
fn needs_delivery(flag: &Data) -> Option<bool> {
    match flag {
        Data::String(x) => x.chars().next().map(|c| matches!(c, 'y' | 'Y')),
        _ => None,
    }
}

fn text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(x) if x.is_empty() => None,
        Data::String(x) => Some(x.clone()),
        // zip codes and phone numbers are often stored as numbers
        x => Some(x.to_string()),
    }
}

fn units(cell: &Data, row: usize) -> Result<Option<u32>, RowError> {
    let invalid = || RowError::InvalidQuantity {
        row,
        value: cell.to_string(),
    };

    let value: i64 = match cell {
        Data::Empty => return Ok(None),
        Data::String(x) if x.trim().is_empty() => return Ok(None),
        Data::String(x) => x.trim().parse().map_err(|_| invalid())?,
        Data::Int(x) => *x,
        Data::Float(x) if x.is_finite() => x.trunc() as i64,
        _ => return Err(invalid()),
    };

    u32::try_from(value).map(Some).map_err(|_| invalid())
}
