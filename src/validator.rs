use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::cards::card_record::{CardRecord, CARD_RECORD_COLUMNS};
use crate::cards::price::PriceField;
use crate::observer::ScrapeObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    TextList,
    Price,
}

/// Shape of one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ColumnKind::Text => "string",
            ColumnKind::TextList => "list<string>",
            ColumnKind::Price => "float",
        };
        write!(
            f,
            "{}: {}{}",
            self.name,
            kind,
            if self.nullable { " (nullable)" } else { "" }
        )
    }
}

fn column_kind(name: &str) -> ColumnKind {
    match name {
        "type" => ColumnKind::TextList,
        name if name.ends_with("price") => ColumnKind::Price,
        _ => ColumnKind::Text,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub schema: Vec<ColumnSchema>,
    pub lowest_price_violations: usize,
    pub duplicates: usize,
    pub null_counts: HashMap<&'static str, usize>,
    pub rows: usize,
}

/// Read-only consistency checks over a scraped card table.
pub struct CardTableValidator<'a> {
    records: &'a [CardRecord],
    observer: &'a dyn ScrapeObserver,
}

impl<'a> CardTableValidator<'a> {
    pub fn new(records: &'a [CardRecord], observer: &'a dyn ScrapeObserver) -> Self {
        Self { records, observer }
    }

    /// Column definitions of the table. A column is nullable when any row is
    /// missing a value for it.
    pub fn schema_report(&self) -> Vec<ColumnSchema> {
        let null_counts = self.count_nulls();
        let schema: Vec<ColumnSchema> = CARD_RECORD_COLUMNS
            .iter()
            .map(|&name| ColumnSchema {
                name,
                kind: column_kind(name),
                nullable: null_counts.get(name).copied().unwrap_or(0) > 0,
            })
            .collect();

        self.observer.validation("schema", "The card table schema is:");
        for column in &schema {
            self.observer.validation("schema", &format!("\t{}", column));
        }
        schema
    }

    /// Rows where a populated guide price is below `current_lowest_price`.
    /// Each offending price column is reported with its row count.
    pub fn lowest_price_violation_count(&self) -> usize {
        let mut violations = 0;
        let mut by_field: Vec<(PriceField, usize)> = Vec::new();
        for record in self.records {
            let below = record.prices_below_lowest();
            if below.is_empty() {
                continue;
            }
            violations += 1;
            for field in below {
                match by_field.iter_mut().find(|(seen, _)| *seen == field) {
                    Some((_, rows)) => *rows += 1,
                    None => by_field.push((field, 1)),
                }
            }
        }

        self.observer.validation(
            "lowest_price",
            &format!(
                "There are {} row(s) where current_lowest_price is greater than another stored price.",
                violations
            ),
        );
        for (field, rows) in by_field {
            self.observer
                .validation("lowest_price", &format!("\t{}: {} row(s)", field, rows));
        }
        violations
    }

    /// Rows that exactly repeat an earlier row.
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::new();
        let duplicates = self
            .records
            .iter()
            .filter(|record| !seen.insert(*record))
            .count();
        self.observer.validation(
            "duplicates",
            &format!("There are {} duplicated row(s) that will be removed.", duplicates),
        );
        duplicates
    }

    pub fn null_counts(&self) -> HashMap<&'static str, usize> {
        let null_counts = self.count_nulls();
        for name in CARD_RECORD_COLUMNS {
            self.observer.validation(
                "nulls",
                &format!("Column {} has {} null value(s).", name, null_counts[name]),
            );
        }
        null_counts
    }

    pub fn row_count(&self) -> usize {
        let rows = self.records.len();
        self.observer
            .validation("rows", &format!("There are {} row(s) in this table.", rows));
        rows
    }

    pub fn run_all(&self) -> ValidationReport {
        ValidationReport {
            schema: self.schema_report(),
            lowest_price_violations: self.lowest_price_violation_count(),
            duplicates: self.duplicate_count(),
            null_counts: self.null_counts(),
            rows: self.row_count(),
        }
    }

    fn count_nulls(&self) -> HashMap<&'static str, usize> {
        let mut counts: HashMap<&'static str, usize> =
            CARD_RECORD_COLUMNS.iter().map(|name| (*name, 0)).collect();
        for record in self.records {
            let missing_columns = record.missing_columns();
            for (name, missing) in CARD_RECORD_COLUMNS.into_iter().zip(missing_columns) {
                if missing {
                    *counts.entry(name).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

/// Keeps the first occurrence of every row, preserving order.
pub fn drop_duplicates(records: Vec<CardRecord>) -> Vec<CardRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
