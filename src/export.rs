//! One-way export of an indexed document.
//!
//! A document is written as one [`DocumentRecord`] followed by one
//! [`LineRecord`] per line, in global order. Nothing here reads records
//! back.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::ProcessBudget;
use crate::model::{Document, Line};
use crate::session::{CallerId, DocumentId};

/// Metadata describing one loaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Generated document id
    pub document_id: DocumentId,

    /// Source path or label
    pub document_path: String,

    /// Extraction budget used
    pub processing_type: ProcessBudget,

    /// Owner of the document
    pub user_id: CallerId,

    /// Load time
    pub created_at: DateTime<Utc>,
}

/// One indexed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Document the line belongs to
    pub document_id: DocumentId,

    /// 1-based page number
    pub page_number: u32,

    /// 1-based position within the page
    pub line_num_on_page: u32,

    /// 1-based position across the whole document
    pub global_line_number: u32,

    /// Line text as indexed
    pub text: String,
}

impl LineRecord {
    fn from_line(document_id: &DocumentId, line: &Line) -> Self {
        Self {
            document_id: document_id.clone(),
            page_number: line.page_number,
            line_num_on_page: line.line_number_on_page,
            global_line_number: line.global_line_number,
            text: line.text.clone(),
        }
    }
}

/// Destination for exported records.
pub trait ExportSink {
    /// Write the document record.
    fn write_document(&mut self, record: &DocumentRecord) -> Result<()>;

    /// Write a batch of line records.
    fn write_lines(&mut self, records: &[LineRecord]) -> Result<()>;

    /// Flush buffered output.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes each record as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ExportSink for JsonLinesSink<W> {
    fn write_document(&mut self, record: &DocumentRecord) -> Result<()> {
        self.write_record(record)
    }

    fn write_lines(&mut self, records: &[LineRecord]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Document records, in write order
    pub documents: Vec<DocumentRecord>,

    /// Line records, in write order
    pub lines: Vec<LineRecord>,
}

impl ExportSink for MemorySink {
    fn write_document(&mut self, record: &DocumentRecord) -> Result<()> {
        self.documents.push(record.clone());
        Ok(())
    }

    fn write_lines(&mut self, records: &[LineRecord]) -> Result<()> {
        self.lines.extend_from_slice(records);
        Ok(())
    }
}

/// Export a document and all its lines to a sink.
///
/// The document id is derived from `data` (the source bytes), the owner
/// and the current time.
pub fn export_document(
    doc: &Document,
    data: &[u8],
    owner: &CallerId,
    budget: ProcessBudget,
    sink: &mut dyn ExportSink,
) -> Result<DocumentId> {
    let created_at = Utc::now();
    let document_id = DocumentId::generate(data, owner, created_at);

    sink.write_document(&DocumentRecord {
        document_id: document_id.clone(),
        document_path: doc.source().to_string(),
        processing_type: budget,
        user_id: owner.clone(),
        created_at,
    })?;

    let records: Vec<LineRecord> = doc
        .lines()
        .iter()
        .map(|line| LineRecord::from_line(&document_id, line))
        .collect();
    // An empty document writes no line batch
    if !records.is_empty() {
        sink.write_lines(&records)?;
    }
    sink.finish()?;

    log::debug!(
        "Exported {} as {} ({} lines)",
        doc.source(),
        document_id,
        records.len()
    );
    Ok(document_id)
}
