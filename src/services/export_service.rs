use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::config::app_config::ExportConfig;
use crate::services::error_handling::{DeskError, DeskResult};

/// One output column: a header and how to render it for a record.
pub struct Column<R> {
    header: String,
    accessor: Box<dyn Fn(&R) -> String + Send + Sync>,
}

impl<R> Column<R> {
    pub fn new(
        header: impl Into<String>,
        accessor: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Box::new(accessor),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn value(&self, record: &R) -> String {
        (self.accessor)(record)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("header", &self.header).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Csv,
    Spreadsheet,
    Document,
    PaginatedText,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Spreadsheet,
        ExportFormat::Document,
        ExportFormat::PaginatedText,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "json",
            ExportFormat::Document => "doc",
            ExportFormat::PaginatedText => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Spreadsheet => "application/json",
            ExportFormat::Document => "application/msword;charset=utf-8",
            ExportFormat::PaginatedText => "text/plain;charset=utf-8",
        }
    }
}

/// Turns a record set into a file payload.
///
/// Callers pass the records in display order and the columns in output
/// order; adapters never reorder either.
pub trait ExportAdapter<R> {
    fn format(&self) -> ExportFormat;

    fn serialize(&self, records: &[R], columns: &[Column<R>]) -> DeskResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CsvQuoting {
    /// Raw values joined by commas, matching files exported so far.
    /// A value containing a comma shifts every following column.
    #[default]
    Verbatim,
    /// RFC 4180 quoting through the `csv` writer
    Rfc4180,
}

#[derive(Debug, Clone, Default)]
pub struct DelimitedTextExporter {
    pub quoting: CsvQuoting,
}

impl DelimitedTextExporter {
    pub fn new(quoting: CsvQuoting) -> Self {
        Self { quoting }
    }
}

impl<R> ExportAdapter<R> for DelimitedTextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn serialize(&self, records: &[R], columns: &[Column<R>]) -> DeskResult<Vec<u8>> {
        match self.quoting {
            CsvQuoting::Verbatim => {
                let mut output = String::new();
                let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
                output.push_str(&headers.join(","));
                output.push('\n');

                for record in records {
                    let row: Vec<String> = columns.iter().map(|c| c.value(record)).collect();
                    output.push_str(&row.join(","));
                    output.push('\n');
                }
                Ok(output.into_bytes())
            }
            CsvQuoting::Rfc4180 => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(columns.iter().map(|c| c.header()))?;
                for record in records {
                    wtr.write_record(columns.iter().map(|c| c.value(record)))?;
                }
                wtr.into_inner().map_err(|e| DeskError::Export {
                    message: e.to_string(),
                })
            }
        }
    }
}

/// A single named sheet of row objects, keys in column order.
#[derive(Debug, Clone)]
pub struct SheetExporter {
    pub sheet_name: String,
}

impl SheetExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl<R> ExportAdapter<R> for SheetExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn serialize(&self, records: &[R], columns: &[Column<R>]) -> DeskResult<Vec<u8>> {
        let rows: Vec<Value> = records
            .iter()
            .map(|record| {
                let mut row = Map::new();
                for column in columns {
                    row.insert(column.header().to_string(), Value::String(column.value(record)));
                }
                Value::Object(row)
            })
            .collect();

        let sheet = json!({
            "sheet": self.sheet_name,
            "rows": rows,
        });
        Ok(serde_json::to_vec_pretty(&sheet)?)
    }
}

/// An HTML table document, the shape word processors open as `.doc`.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    pub title: String,
}

impl DocumentExporter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl<R> ExportAdapter<R> for DocumentExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Document
    }

    fn serialize(&self, records: &[R], columns: &[Column<R>]) -> DeskResult<Vec<u8>> {
        let title = escape_html(&self.title);
        let mut output = String::new();

        output.push_str("<html>\n");
        output.push_str(&format!(
            "<head><meta charset=\"utf-8\"><title>{}</title></head>\n",
            title
        ));
        output.push_str("<body>\n");
        output.push_str(&format!("<h1>{}</h1>\n", title));
        output.push_str("<table border=\"1\" style=\"border-collapse: collapse;\">\n");

        output.push_str("<tr>");
        for column in columns {
            output.push_str(&format!("<th>{}</th>", escape_html(column.header())));
        }
        output.push_str("</tr>\n");

        for record in records {
            output.push_str("<tr>");
            for column in columns {
                output.push_str(&format!("<td>{}</td>", escape_html(&column.value(record))));
            }
            output.push_str("</tr>\n");
        }

        output.push_str("</table>\n</body>\n</html>\n");
        Ok(output.into_bytes())
    }
}

/// Plain text with a form feed between fixed-height pages.
#[derive(Debug, Clone)]
pub struct PaginatedTextExporter {
    pub title: String,
    pub lines_per_page: usize,
}

pub const PAGE_BREAK: char = '\u{000C}';

impl PaginatedTextExporter {
    pub fn new(title: impl Into<String>, lines_per_page: usize) -> Self {
        Self {
            title: title.into(),
            lines_per_page,
        }
    }
}

impl<R> ExportAdapter<R> for PaginatedTextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::PaginatedText
    }

    fn serialize(&self, records: &[R], columns: &[Column<R>]) -> DeskResult<Vec<u8>> {
        let mut lines = Vec::with_capacity(records.len() + 3);
        lines.push(self.title.clone());
        lines.push(String::new());
        lines.push(
            columns
                .iter()
                .map(|c| c.header())
                .collect::<Vec<_>>()
                .join(" | "),
        );
        for record in records {
            lines.push(
                columns
                    .iter()
                    .map(|c| c.value(record))
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }

        let pages: Vec<String> = lines
            .chunks(self.lines_per_page.max(1))
            .map(|page| {
                let mut text = page.join("\n");
                text.push('\n');
                text
            })
            .collect();

        Ok(pages.join(&PAGE_BREAK.to_string()).into_bytes())
    }
}

/// Build the adapter for a format from the export settings.
pub fn exporter_for<R: 'static>(
    format: ExportFormat,
    config: &ExportConfig,
    title: &str,
) -> Box<dyn ExportAdapter<R>> {
    let full_title = config.full_title(title);
    match format {
        ExportFormat::Csv => Box::new(DelimitedTextExporter::new(config.csv_quoting)),
        ExportFormat::Spreadsheet => Box::new(SheetExporter::new(title)),
        ExportFormat::Document => Box::new(DocumentExporter::new(full_title)),
        ExportFormat::PaginatedText => {
            Box::new(PaginatedTextExporter::new(full_title, config.lines_per_page))
        }
    }
}

/// `vehicle-purchase-reports` + Csv -> `vehicle-purchase-reports.csv`
pub fn export_file_name(stem: &str, format: ExportFormat) -> String {
    format!("{}.{}", stem, format.extension())
}

/// Save an export payload to disk
pub async fn write_export(path: &Path, bytes: &[u8]) -> DeskResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
