// store/table.rs
use crate::errors::PipelineError;
use crate::registry::Record;
use crate::store::csv::{cell_text, parse_rows, write_row, BOM};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A CSV file read fully into memory: header row plus data rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Values of one column, in file order. Short rows are skipped.
    pub fn column(&self, path: &Path, name: &str) -> Result<Vec<String>, PipelineError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;

        Ok(self
            .rows
            .iter()
            .filter_map(|r| r.get(idx).cloned())
            .collect())
    }
}

/// Read a table; `Ok(None)` when the file does not exist or has no header.
pub fn read_table(path: &Path) -> Result<Option<Table>, PipelineError> {
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let mut rows = parse_rows(&text).into_iter();

    Ok(rows.next().map(|header| Table {
        header,
        rows: rows.collect(),
    }))
}

/// Identifiers already written to `path`: the skip-list of a resumed run.
pub fn read_id_set(path: &Path, id_column: &str) -> Result<HashSet<String>, PipelineError> {
    match read_table(path)? {
        Some(table) => Ok(table.column(path, id_column)?.into_iter().collect()),
        None => Ok(HashSet::new()),
    }
}

fn ensure_parent(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Cells of `record` in `header` order. Missing fields become empty cells.
pub fn project(record: &Record, header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|h| record.get(h).map(cell_text).unwrap_or_default())
        .collect()
}

/// Overwrite `path` with BOM, header taken from the first record, then every record.
/// Writes nothing when `records` is empty. Returns the number of rows written.
pub fn write_records(path: &Path, records: &[Record]) -> Result<usize, PipelineError> {
    let Some(first) = records.first() else {
        return Ok(0);
    };
    let header: Vec<String> = first.keys().cloned().collect();

    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(BOM.as_bytes())?;
    write_row(&mut out, header.as_slice())?;

    for (i, record) in records.iter().enumerate() {
        let extra = record.keys().filter(|k| !header.contains(k)).count();
        if extra > 0 {
            debug!(row = i, extra, "record carries fields outside the header; ignored");
        }
        let cells = project(record, &header);
        write_row(&mut out, cells.as_slice())?;
    }

    out.flush()?;
    Ok(records.len())
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    Written,
    SchemaMismatch,
}

/// Append-only writer for the detail file.
///
/// The header is either the one already on disk or, for a fresh file, the
/// field names of the first record appended. The file is only created on
/// that first append.
pub struct AppendTable {
    path: PathBuf,
    header: Option<Vec<String>>,
    file: Option<File>,
    /// Only a missing or zero-length file gets a BOM.
    needs_bom: bool,
}

impl AppendTable {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let header = read_table(path)?.map(|t| t.header);
        let needs_bom = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            header,
            file: None,
            needs_bom,
        })
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Append one record as a row, or refuse it if its field set does not
    /// match the established header.
    pub fn append(&mut self, record: &Record) -> Result<AppendOutcome, PipelineError> {
        let mut buf = Vec::new();

        let header = match &self.header {
            Some(h) => h.clone(),
            None => {
                let h: Vec<String> = record.keys().cloned().collect();
                if self.needs_bom {
                    buf.extend_from_slice(BOM.as_bytes());
                }
                write_row(&mut buf, h.as_slice())?;
                h
            }
        };

        if !same_fields(record, &header) {
            return Ok(AppendOutcome::SchemaMismatch);
        }

        let cells = project(record, &header);
        write_row(&mut buf, cells.as_slice())?;

        // Header and row go out in one write so an interrupted run never
        // leaves a half-written line.
        let file = self.file_handle()?;
        file.write_all(&buf)?;
        file.flush()?;

        self.header = Some(header);
        self.needs_bom = false;
        Ok(AppendOutcome::Written)
    }

    fn file_handle(&mut self) -> Result<&mut File, PipelineError> {
        if self.file.is_none() {
            ensure_parent(&self.path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| PipelineError::Io(std::io::Error::other("append file not open")))
    }
}

fn same_fields(record: &Record, header: &[String]) -> bool {
    record.len() == header.len() && header.iter().all(|h| record.contains_key(h))
}
