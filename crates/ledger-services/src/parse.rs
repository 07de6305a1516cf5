use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use ledger_data::TransactionType;

/// A parsed import row, before its category is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTransaction {
    pub title: String,
    pub kind: TransactionType,
    pub value: f64,
    pub category: String,
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

impl CsvTransaction {
    /// Build a staging transaction from a record. Rows without
    /// title, type or a numeric value are skipped.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        // Fields:
        //  0: title
        //  1: type
        //  2: value
        //  3: category
        let title = field(record, 0);
        let kind = field(record, 1);
        let value = field(record, 2);
        let category = field(record, 3);

        if title.is_empty() || kind.is_empty() || value.is_empty() {
            debug!(line = ?record.position().map(|p| p.line()), "skipping incomplete row");
            return None;
        }

        let value: f64 = match value.parse() {
            Ok(value) if f64::is_finite(value) => value,
            _ => {
                warn!(title, value, "skipping row with non numeric value");
                return None;
            }
        };

        Some(Self {
            title: title.to_string(),
            kind: kind.into(),
            value,
            category: category.to_string(),
        })
    }
}

/// Parse a transaction CSV export. The first line is
/// a header and will be ignored.
pub fn parse<R: Read>(reader: R) -> Result<Vec<CsvTransaction>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut transactions: Vec<CsvTransaction> = vec![];
    for result in rdr.records() {
        if let Some(tx) = CsvTransaction::from_record(&result?) {
            transactions.push(tx);
        }
    }
    Ok(transactions)
}
