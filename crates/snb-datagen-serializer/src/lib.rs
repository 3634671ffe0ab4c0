//! Partitioned delimited-text serializers for the person graph
//!
//! A serializer is bound to one partition: `initialize` opens one writer per
//! file kind, typed `serialize_*` calls route records to those writers, and
//! `close` releases them. Partitions never share writers, so nothing here
//! locks.

mod entities;
mod error;
mod file_kind;
mod pgx;
mod registry;
mod serializer;
mod storage;
mod writer;
mod writer_set;

pub use entities::{Knows, Person, PersonSummary, StudyAt, WorkAt};
pub use error::{CloseFailure, Result, SerializerError, SerializerState};
pub use file_kind::{FileKind, FileName};
pub use pgx::{CsvDynamicPersonSerializer, EdgeListFile};
pub use registry::{serializer_for, PGX_ALIAS, PGX_SERIALIZER};
pub use serializer::PersonSerializer;
pub use storage::{filesystem_for, FileSystem, LocalFileSystem, MemoryFileSystem};
pub use writer::{sub_file_path, PartitionWriter, WriterOptions};
pub use writer_set::WriterSet;
