use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::{Comment, LabeledComment, Sentiment};
use crate::error::{codes, AppError};

pub const COMMENTS_FILE: &str = "sample.csv";
pub const LABELED_FILE: &str = "labeled_comments.csv";

pub const COMMENT_HEADERS: [&str; 2] = ["Author", "Comment"];
pub const LABELED_HEADERS: [&str; 3] = ["Author", "Comment", "Sentiment"];

fn write_err(e: impl std::fmt::Display) -> AppError {
    AppError::new(codes::STORE_WRITE_FAILED, "Failed to write CSV").with_details(e.to_string())
}

fn parse_err(row: usize, e: impl std::fmt::Display) -> AppError {
    AppError::new(codes::STORE_PARSE_FAILED, "Failed to parse CSV row")
        .with_details(format!("row={row}: {e}"))
}

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    // Header rows are written explicitly so empty datasets still carry one.
    csv::WriterBuilder::new().has_headers(false).from_writer(out)
}

fn reader<R: Read>(input: R, expected: &[&str]) -> Result<csv::Reader<R>, AppError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(input);
    let headers = rdr.headers().map_err(|e| {
        AppError::new(codes::STORE_HEADERS_INVALID, "Failed to read CSV headers")
            .with_details(e.to_string())
    })?;
    let got: Vec<&str> = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();
    if got != expected {
        return Err(
            AppError::new(codes::STORE_HEADERS_INVALID, "Unexpected CSV headers")
                .with_details(format!("expected={expected:?} got={got:?}")),
        );
    }
    Ok(rdr)
}

pub fn write_comments<W: Write>(out: W, comments: &[Comment]) -> Result<(), AppError> {
    let mut wtr = writer(out);
    wtr.write_record(COMMENT_HEADERS).map_err(write_err)?;
    for c in comments {
        wtr.write_record([c.author.as_str(), c.text.as_str()])
            .map_err(write_err)?;
    }
    wtr.flush().map_err(write_err)
}

pub fn write_labeled<W: Write>(out: W, rows: &[LabeledComment]) -> Result<(), AppError> {
    let mut wtr = writer(out);
    wtr.write_record(LABELED_HEADERS).map_err(write_err)?;
    for r in rows {
        wtr.write_record([r.author.as_str(), r.text.as_str(), r.sentiment.as_str()])
            .map_err(write_err)?;
    }
    wtr.flush().map_err(write_err)
}

pub fn read_comments<R: Read>(input: R) -> Result<Vec<Comment>, AppError> {
    let mut rdr = reader(input, &COMMENT_HEADERS)?;
    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result.map_err(|e| parse_err(idx + 1, e))?;
        out.push(Comment::new(
            row.get(0).unwrap_or_default(),
            row.get(1).unwrap_or_default(),
        ));
    }
    Ok(out)
}

pub fn read_labeled<R: Read>(input: R) -> Result<Vec<LabeledComment>, AppError> {
    let mut rdr = reader(input, &LABELED_HEADERS)?;
    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result.map_err(|e| parse_err(idx + 1, e))?;
        let raw = row.get(2).unwrap_or_default();
        let sentiment = raw
            .parse::<Sentiment>()
            .map_err(|e| e.with_details(format!("row={} value={raw}", idx + 1)))?;
        out.push(LabeledComment {
            author: row.get(0).unwrap_or_default().to_string(),
            text: row.get(1).unwrap_or_default().to_string(),
            sentiment,
        });
    }
    Ok(out)
}

/// Write through a sibling temp file and rename it over `path` once complete.
///
/// The temp file is removed when dropped, so a failed write leaves any previous file intact.
fn save_with<F>(path: &Path, write: F) -> Result<(), AppError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), AppError>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        AppError::new(codes::STORE_OPEN_FAILED, "Failed to create temp file for CSV")
            .with_details(format!("path={}: {}", dir.display(), e))
    })?;
    write(&mut tmp)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| {
        AppError::new(codes::STORE_WRITE_FAILED, "Failed to replace CSV file")
            .with_details(format!("path={}: {}", path.display(), e.error))
    })?;
    Ok(())
}

fn open(path: &Path) -> Result<std::fs::File, AppError> {
    std::fs::File::open(path).map_err(|e| {
        AppError::new(codes::STORE_OPEN_FAILED, "Failed to open CSV file")
            .with_details(format!("path={}: {}", path.display(), e))
    })
}

pub fn save_comments(path: &Path, comments: &[Comment]) -> Result<(), AppError> {
    save_with(path, |f| write_comments(f, comments))?;
    info!(path = %path.display(), rows = comments.len(), "saved comments");
    Ok(())
}

pub fn save_labeled(path: &Path, rows: &[LabeledComment]) -> Result<(), AppError> {
    save_with(path, |f| write_labeled(f, rows))?;
    info!(path = %path.display(), rows = rows.len(), "saved labeled comments");
    Ok(())
}

pub fn load_comments(path: &Path) -> Result<Vec<Comment>, AppError> {
    read_comments(open(path)?)
}

pub fn load_labeled(path: &Path) -> Result<Vec<LabeledComment>, AppError> {
    read_labeled(open(path)?)
}

/// In-memory CSV text of the labeled rows, as offered for download.
pub fn labeled_csv_string(rows: &[LabeledComment]) -> Result<String, AppError> {
    let mut buf = Vec::new();
    write_labeled(&mut buf, rows)?;
    String::from_utf8(buf).map_err(write_err)
}
