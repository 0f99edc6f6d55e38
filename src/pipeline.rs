//! Pipeline: CSV records in, indexer calls out.
//!
//! Input has no header row. Records are read with flexible widths so that a
//! short or long row is reported by the record builder, with its line number,
//! rather than by the CSV layer. Blank lines are skipped by the CSV reader
//! and never reach the builder; line numbers still count them.

use std::io::Read;

use esfeed_core::{record, FormatError, IndexStore, Indexer, IndexerError, Summary};

/// Why a load stopped. Everything already flushed stays in the store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unreadable CSV input near line {line}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("malformed record on line {line}")]
    Format {
        line: u64,
        #[source]
        source: FormatError,
    },

    #[error("indexing the record on line {line} failed")]
    Index {
        line: u64,
        #[source]
        source: IndexerError,
    },

    #[error("final flush failed")]
    Flush(#[source] IndexerError),
}

/// CSV reader configured for headerless log exports.
pub fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input)
}

/// Feed every record of `input` through `indexer`, then flush.
///
/// Reading is blocking; the only suspension points are store calls. Returns
/// the indexer's totals after the final flush.
pub async fn load<R, S>(input: R, indexer: &mut Indexer<S>) -> Result<Summary, LoadError>
where
    R: Read,
    S: IndexStore,
{
    let mut reader = csv_reader(input);
    let mut record = csv::StringRecord::new();

    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|source| LoadError::Csv {
                line: reader.position().line(),
                source,
            })?;
        if !more {
            break;
        }

        let line = record
            .position()
            .map_or_else(|| reader.position().line(), |pos| pos.line());
        let fields: Vec<&str> = record.iter().collect();
        let event = record::build(&fields).map_err(|source| LoadError::Format { line, source })?;
        indexer
            .index(event)
            .await
            .map_err(|source| LoadError::Index { line, source })?;
    }

    indexer.flush().await.map_err(LoadError::Flush)?;
    tracing::debug!(summary = %indexer.summary(), "input exhausted");
    Ok(indexer.summary().clone())
}
