//! Chunked writes: sequential chunks, parallel slices within a chunk

use std::error::Error;
use std::fmt;

use log::{debug, warn};
use rayon::prelude::*;

use crate::QueryError;
use crate::config::QueryConfig;

/// How rows are grouped for writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    chunk_size: usize,
    slice_size: usize,
}

impl ChunkOptions {
    pub fn new(chunk_size: usize, slice_size: usize) -> Result<Self, QueryError> {
        if chunk_size == 0 || slice_size == 0 {
            return Err(QueryError::configuration(format!(
                "chunk size and slice size must be positive, got {} and {}",
                chunk_size, slice_size
            )));
        }
        Ok(Self {
            chunk_size,
            slice_size,
        })
    }

    pub fn from_config(config: &QueryConfig) -> Result<Self, QueryError> {
        Self::new(config.chunk_size, config.chunk_slice_size)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn slice_size(&self) -> usize {
        self.slice_size
    }
}

/// A chunk failed part way through a write
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkWriteError<K, E> {
    /// Keys written before the failure, in input order
    pub written: Vec<K>,
    /// Index of the chunk that failed
    pub chunk: usize,
    /// The first failing slice's error
    pub source: E,
}

impl<K, E: fmt::Display> fmt::Display for ChunkWriteError<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {} failed after {} rows were written: {}",
            self.chunk,
            self.written.len(),
            self.source
        )
    }
}

impl<K: fmt::Debug, E: Error + 'static> Error for ChunkWriteError<K, E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Write `rows` chunk by chunk.
///
/// Each chunk is split into slices that `write` handles in parallel. The
/// next chunk starts only once every slice of the current one is done. On
/// failure no further chunk starts.
pub fn write_by_chunks<T, K, E, W>(
    rows: &[T],
    options: ChunkOptions,
    write: W,
) -> Result<Vec<K>, ChunkWriteError<K, E>>
where
    T: Sync,
    K: Send,
    E: Send,
    W: Fn(&[T]) -> Result<Vec<K>, E> + Sync,
{
    let mut written = Vec::with_capacity(rows.len());

    for (index, chunk) in rows.chunks(options.chunk_size).enumerate() {
        let results: Vec<Result<Vec<K>, E>> = chunk
            .par_chunks(options.slice_size)
            .map(|slice| write(slice))
            .collect();

        let mut failure = None;
        for result in results {
            match result {
                Ok(keys) => written.extend(keys),
                Err(e) => {
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }

        if let Some(source) = failure {
            warn!(
                "Chunk {} failed, stopping after {} written rows",
                index,
                written.len()
            );
            return Err(ChunkWriteError {
                written,
                chunk: index,
                source,
            });
        }

        debug!("Wrote chunk {} ({} rows)", index, chunk.len());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn double(slice: &[i32]) -> Result<Vec<i32>, QueryError> {
        Ok(slice.iter().map(|n| n * 2).collect())
    }

    #[test]
    fn test_keys_keep_input_order() {
        let rows: Vec<i32> = (1..=25).collect();
        let options = ChunkOptions::new(10, 3).unwrap();
        let keys = write_by_chunks(&rows, options, double).unwrap();
        assert_eq!(keys, rows.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let keys = write_by_chunks(&[] as &[i32], ChunkOptions::new(5, 2).unwrap(), double).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_failure_stops_later_chunks() {
        let rows: Vec<i32> = (1..=30).collect();
        let calls = AtomicUsize::new(0);
        let options = ChunkOptions::new(10, 5).unwrap();

        let result = write_by_chunks(&rows, options, |slice| {
            calls.fetch_add(1, Ordering::SeqCst);
            if slice.contains(&13) {
                Err(QueryError::invalid_value("row", "13", "an even row"))
            } else {
                double(slice)
            }
        });

        let error = result.unwrap_err();
        assert_eq!(error.chunk, 1);
        // Chunk 0 plus the successful slice 16..=20 of chunk 1
        assert_eq!(error.written.len(), 15);
        assert_eq!(error.written.last(), Some(&40));
        assert_matches!(error.source, QueryError::InvalidValue { .. });
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_first_failing_slice_is_reported() {
        let rows: Vec<i32> = (1..=6).collect();
        let result = write_by_chunks(&rows, ChunkOptions::new(6, 2).unwrap(), |slice| {
            Err::<Vec<i32>, _>(format!("slice starting at {}", slice[0]))
        });
        assert_eq!(result.unwrap_err().source, "slice starting at 1");
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        assert_matches!(ChunkOptions::new(0, 1), Err(QueryError::Configuration(_)));
        assert_matches!(ChunkOptions::new(1, 0), Err(QueryError::Configuration(_)));
        assert!(ChunkOptions::from_config(&QueryConfig::default()).is_ok());
    }

    #[test]
    fn test_error_display() {
        let error = ChunkWriteError {
            written: vec![1, 2],
            chunk: 3,
            source: QueryError::configuration("disk full"),
        };
        assert_eq!(
            error.to_string(),
            "Chunk 3 failed after 2 rows were written: Invalid query configuration: disk full"
        );
    }
}
