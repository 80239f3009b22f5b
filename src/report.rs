use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::ranking::RankedEntry;
use crate::{AppError, Result};

pub const HEADER: [&str; 3] = ["Rank", "Emoji", "Count"];

/// Writes the first `limit` entries to `path` as `Rank,Emoji,Count` rows.
///
/// An existing file is removed first, so every run fully replaces the
/// previous report. Returns the number of data rows written.
pub fn write_report(path: &Path, entries: &[RankedEntry], limit: usize) -> Result<usize> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| AppError::RemoveFile {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| AppError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::Csv(e.to_string()))?;

    let mut rows = 0;
    for (rank, entry) in top(entries, limit).iter().enumerate() {
        writer
            .write_record(record(rank + 1, entry))
            .map_err(|e| AppError::Csv(e.to_string()))?;
        rows += 1;
    }

    writer.flush().map_err(|e| AppError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(rows)
}

/// Plain-text ranking for the console, one `rank. :emoji: count` line per entry.
pub fn format_table(entries: &[RankedEntry], limit: usize) -> String {
    let top = top(entries, limit);
    let width = top.len().to_string().len();

    top.iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>width$}. :{}: {}\n", i + 1, entry.name, entry.count))
        .collect()
}

fn top(entries: &[RankedEntry], limit: usize) -> &[RankedEntry] {
    entries.get(..limit).unwrap_or(entries)
}

fn record(rank: usize, entry: &RankedEntry) -> [String; 3] {
    [
        rank.to_string(),
        format!(":{}:", entry.name),
        entry.count.to_string(),
    ]
}
