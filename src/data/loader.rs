use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{BenchmarkRun, Sample};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the result file for iteration `index`.
///
/// Layout: no header row, one record per line,
/// `<integer size>,<real new_time>,<real old_time>`.
/// The file handle lives only for the duration of this call.
pub fn load_file(path: &Path, index: usize) -> Result<BenchmarkRun, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let samples = read_samples(BufReader::new(file))?;
    log::debug!("{}: {} samples", path.display(), samples.len());
    Ok(BenchmarkRun::new(index, samples))
}

/// Parse samples from any byte source.
pub fn load_reader<R: Read>(rdr: R, index: usize) -> Result<BenchmarkRun, LoadError> {
    let samples = read_samples(BufReader::new(rdr))?;
    Ok(BenchmarkRun::new(index, samples))
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

fn builder() -> ReaderBuilder {
    let mut b = ReaderBuilder::new();
    b.has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);
    b
}

/// Every line must be a record; only the final newline may end the file.
/// Lines are split one at a time because the csv reader skips empty lines.
fn read_samples<R: BufRead>(rdr: R) -> Result<Vec<Sample>, LoadError> {
    let mut samples = Vec::new();
    let mut record = StringRecord::new();

    for (i, text) in rdr.lines().enumerate() {
        let line = i as u64 + 1;
        let text = text.map_err(|e| LoadError::Read {
            line,
            source: e.into(),
        })?;
        let text = text.strip_suffix('\r').unwrap_or(&text);
        if text.is_empty() {
            return Err(LoadError::FieldCount { line, found: 1 });
        }

        let mut fields = builder().from_reader(text.as_bytes());
        let found = fields
            .read_record(&mut record)
            .map_err(|source| LoadError::Read { line, source })?;
        if !found {
            return Err(LoadError::FieldCount { line, found: 1 });
        }
        samples.push(parse_record(&record, line)?);
    }

    Ok(samples)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<Sample, LoadError> {
    if record.len() != 3 {
        return Err(LoadError::FieldCount {
            line,
            found: record.len(),
        });
    }
    Ok(Sample {
        size: parse_field(&record[0], line, "size", "integer")?,
        new_time: parse_field(&record[1], line, "new_time", "number")?,
        old_time: parse_field(&record[2], line, "old_time", "number")?,
    })
}

fn parse_field<T: FromStr>(
    text: &str,
    line: u64,
    column: &'static str,
    expected: &'static str,
) -> Result<T, LoadError> {
    text.parse::<T>().map_err(|_| LoadError::ParseField {
        line,
        column,
        text: text.to_string(),
        expected,
    })
}
