use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::cards::card_record::{CardRecord, CARD_RECORD_COLUMNS};
use crate::error::ScrapeError;

/// `<dir>/<prefix><file_date>.csv`
pub fn output_file_path(dir: &str, prefix: &str, file_date: &str) -> PathBuf {
    Path::new(dir).join(format!("{}{}.csv", prefix, file_date))
}

fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Appends records to the CSV file, writing the header row only when the
/// file is created by this call.
pub fn append_records(path: &Path, records: &[CardRecord]) -> Result<(), ScrapeError> {
    create_parent_dirs(path)?;
    let new_file = !path.is_file();

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(new_file).from_writer(file);
    if new_file && records.is_empty() {
        writer.write_record(CARD_RECORD_COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Replaces the file content with the given records.
pub fn write_records(path: &Path, records: &[CardRecord]) -> Result<(), ScrapeError> {
    create_parent_dirs(path)?;
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(CARD_RECORD_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<CardRecord>, ScrapeError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CardRecord = result?;
        records.push(record);
    }
    Ok(records)
}
