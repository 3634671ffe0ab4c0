//! Fixed set of partition writers, one slot per file kind

use crate::error::{CloseFailure, Result, SerializerError};
use crate::file_kind::FileKind;
use crate::storage::FileSystem;
use crate::writer::{PartitionWriter, WriterOptions};
use std::marker::PhantomData;
use std::path::Path;
use tracing::error;

pub struct WriterSet<K: FileKind> {
    writers: Vec<PartitionWriter>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: FileKind> WriterSet<K> {
    /// Open one writer per kind, named `<kind>_<partition_id>`, in ordinal order.
    ///
    /// Any failure discards the writers opened so far.
    pub fn open(
        fs: &dyn FileSystem,
        dir: &Path,
        partition_id: u32,
        options: &WriterOptions,
    ) -> Result<Self> {
        let mut writers = Vec::with_capacity(K::ALL.len());
        for (ordinal, kind) in K::ALL.iter().enumerate() {
            debug_assert_eq!(kind.ordinal(), ordinal, "ordinal out of step with ALL");
            let name = format!("{}_{}", kind.name(), partition_id);
            writers.push(PartitionWriter::create(fs, dir, &name, options)?);
        }
        Ok(Self {
            writers,
            _kind: PhantomData,
        })
    }

    pub fn get_mut(&mut self, kind: K) -> &mut PartitionWriter {
        &mut self.writers[kind.ordinal()]
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.writers.iter().map(PartitionWriter::name).collect()
    }

    /// Close every writer in ordinal order.
    ///
    /// A failing writer does not stop the rest from closing; all failures are
    /// reported together.
    pub fn close_all(self) -> Result<()> {
        let mut failures = Vec::new();
        for writer in self.writers {
            let name = writer.name().to_string();
            if let Err(source) = writer.close() {
                error!(writer = %name, error = %source, "Failed to close writer");
                failures.push(CloseFailure {
                    writer: name,
                    source,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SerializerError::Close { failures })
        }
    }
}
