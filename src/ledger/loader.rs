//! Tabular exchange for the expense ledger
//!
//! One row per category with header `category,min_amount,max_amount`.
//! Tables without an income row are accepted: a zero income row is
//! inserted at the top before the ledger is validated.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::{ExpenseEntry, ExpenseLedger, INCOME_CATEGORY};
use crate::error::LedgerFileError;

/// Income label used by tables exported from the older spreadsheet tool
const LEGACY_INCOME_LABEL: &str = "Ingreso";

/// Load a ledger from a CSV file
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<ExpenseLedger, LedgerFileError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let ledger = load_ledger_from_reader(file)?;
    log::info!("loaded {} ledger rows from {}", ledger.len(), path.display());
    Ok(ledger)
}

/// Load a ledger from any CSV reader
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<ExpenseLedger, LedgerFileError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in rdr.deserialize() {
        let mut entry: ExpenseEntry = result?;
        if entry.category == LEGACY_INCOME_LABEL {
            entry.category = INCOME_CATEGORY.to_string();
        }
        entries.push(entry);
    }

    ensure_income_row(&mut entries);

    let mut ledger = ExpenseLedger::new(0.0)?;
    ledger.replace_all(entries)?;
    Ok(ledger)
}

/// Prepend a zero income row when `entries` has none
pub(crate) fn ensure_income_row(entries: &mut Vec<ExpenseEntry>) {
    if !entries.iter().any(ExpenseEntry::is_income) {
        log::warn!("ledger table has no income row; inserting one with zero income");
        entries.insert(0, ExpenseEntry::income(0.0));
    }
}

/// Write a ledger to a CSV file, income row included
pub fn save_ledger<P: AsRef<Path>>(ledger: &ExpenseLedger, path: P) -> Result<(), LedgerFileError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_ledger(ledger, file)?;
    log::info!("saved {} ledger rows to {}", ledger.len(), path.display());
    Ok(())
}

pub fn write_ledger<W: Write>(ledger: &ExpenseLedger, writer: W) -> Result<(), LedgerFileError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in ledger.entries() {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::ledger::Bound;

    #[test]
    fn test_load_with_income_row() {
        let data = "\
category,min_amount,max_amount
Food,550,900
Transport,150,300
Income,2061,2061
";
        let ledger = load_ledger_from_reader(data.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.income(), 2061.0);
        assert_eq!(ledger.total_expenses(Bound::Min), 700.0);
        assert_eq!(ledger.total_expenses(Bound::Max), 1200.0);
    }

    #[test]
    fn test_load_synthesizes_missing_income() {
        let data = "\
category,min_amount,max_amount
Food,550,900
";
        let ledger = load_ledger_from_reader(data.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.entries()[0].is_income());
        assert_eq!(ledger.income(), 0.0);
    }

    #[test]
    fn test_load_legacy_headers() {
        let data = "\
Categoría,Gasto Mín (Bs.),Gasto Máx (Bs.)
Alimentación,550,900
Ingreso,2061,2061
";
        let ledger = load_ledger_from_reader(data.as_bytes()).unwrap();
        assert_eq!(ledger.income(), 2061.0);
        assert!(ledger.get("Alimentación").is_some());
        assert!(ledger.get(LEGACY_INCOME_LABEL).is_none());
    }

    #[test]
    fn test_load_rejects_inverted_row() {
        let data = "\
category,min_amount,max_amount
Food,900,550
";
        let err = load_ledger_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LedgerFileError::Validation(ValidationError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_load_rejects_non_numeric_amount() {
        let data = "\
category,min_amount,max_amount
Food,lots,900
";
        assert!(matches!(
            load_ledger_from_reader(data.as_bytes()),
            Err(LedgerFileError::Csv(_))
        ));
    }

    #[test]
    fn test_write_then_load_preserves_rows() {
        let mut ledger = ExpenseLedger::default_categories();
        ledger.set_income(2061.0).unwrap();

        let mut buf = Vec::new();
        write_ledger(&ledger, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("category,min_amount,max_amount\n"));
        assert!(text.contains("Income,2061.0,2061.0"));

        let reloaded = load_ledger_from_reader(buf.as_slice()).unwrap();
        assert_eq!(reloaded, ledger);
    }
}
