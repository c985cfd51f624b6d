use std::fs::File;
use std::path::Path;

use arrow::csv::Writer;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchWriter};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::OutputError;

/// Table output whose encoding is picked from the file extension.
#[derive(Debug)]
pub enum DataOutput {
    Parquet(WriterParquet),
    Csv(WriterCsv),
}

impl DataOutput {
    pub fn new(file_name: &Path, schema: Schema) -> Result<Self, OutputError> {
        let output = match table_extension(file_name)? {
            "parquet" => DataOutput::Parquet(WriterParquet::new(file_name, schema)?),
            _ => DataOutput::Csv(WriterCsv::new(file_name)?),
        };
        Ok(output)
    }

    /// Fails when no writer exists for the extension of `file_name`. Nothing is
    /// created on disk.
    pub fn check_path(file_name: &Path) -> Result<(), OutputError> {
        table_extension(file_name).map(|_| ())
    }

    pub fn record_batch_to_file(&mut self, record_batch: &RecordBatch) -> Result<(), OutputError> {
        match self {
            DataOutput::Parquet(output) => output.writer.write(record_batch)?,
            DataOutput::Csv(output) => output.writer.write(record_batch)?,
        }
        Ok(())
    }

    pub fn close(self) -> Result<(), OutputError> {
        match self {
            DataOutput::Parquet(output) => output.close(),
            DataOutput::Csv(output) => output.close(),
        }
    }
}

fn table_extension(file_name: &Path) -> Result<&str, OutputError> {
    match file_name.extension().and_then(|ext| ext.to_str()) {
        Some(ext @ ("parquet" | "csv")) => Ok(ext),
        _ => Err(OutputError::UnsupportedFormat(file_name.to_path_buf())),
    }
}

fn create_file(file_name: &Path) -> Result<File, OutputError> {
    File::create(file_name).map_err(|e| OutputError::Io {
        path: file_name.to_path_buf(),
        source: e,
    })
}

#[derive(Debug)]
pub struct WriterParquet {
    pub writer: ArrowWriter<File>,
}

impl WriterParquet {
    fn new(file_name: &Path, schema: Schema) -> Result<Self, OutputError> {
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let output_file = create_file(file_name)?;
        let writer = ArrowWriter::try_new(output_file, SchemaRef::from(schema), Some(props))?;
        Ok(Self { writer })
    }

    pub fn close(self) -> Result<(), OutputError> {
        self.writer.close()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct WriterCsv {
    pub writer: Writer<File>,
}

impl WriterCsv {
    fn new(file_name: &Path) -> Result<Self, OutputError> {
        let writer = Writer::new(create_file(file_name)?);
        Ok(Self { writer })
    }

    pub fn close(self) -> Result<(), OutputError> {
        self.writer.close()?;
        Ok(())
    }
}
