//! Edge-list serializer for graph-analytics loaders
//!
//! Exports only the `knows` graph, one `<from> <to>` line per edge, with no
//! header. Every other entity shape is ignored.

use crate::entities::{Knows, Person};
use crate::error::{Result, SerializerError, SerializerState};
use crate::file_kind::FileKind;
use crate::serializer::PersonSerializer;
use crate::storage::FileSystem;
use crate::writer::WriterOptions;
use crate::writer_set::WriterSet;
use snb_datagen_config::{keys, Configuration};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const FIELD_SEPARATOR: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeListFile {
    PersonKnowsPerson,
}

impl FileKind for EdgeListFile {
    const ALL: &'static [Self] = &[EdgeListFile::PersonKnowsPerson];

    fn name(self) -> &'static str {
        match self {
            EdgeListFile::PersonKnowsPerson => "person_knows_person",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

enum State {
    Uninitialized,
    Initialized(WriterSet<EdgeListFile>),
    Closed,
}

impl State {
    fn kind(&self) -> SerializerState {
        match self {
            State::Uninitialized => SerializerState::Uninitialized,
            State::Initialized(_) => SerializerState::Initialized,
            State::Closed => SerializerState::Closed,
        }
    }
}

pub struct CsvDynamicPersonSerializer {
    fs: Arc<dyn FileSystem>,
    state: State,
}

impl CsvDynamicPersonSerializer {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            state: State::Uninitialized,
        }
    }

    pub fn state(&self) -> SerializerState {
        self.state.kind()
    }

    /// Logical writer names, empty unless initialized
    pub fn writer_names(&self) -> Vec<&str> {
        match &self.state {
            State::Initialized(writers) => writers.names(),
            _ => Vec::new(),
        }
    }

    fn writers(&mut self, operation: &'static str) -> Result<&mut WriterSet<EdgeListFile>> {
        match &mut self.state {
            State::Initialized(writers) => Ok(writers),
            other => Err(SerializerError::invalid_state(other.kind(), operation)),
        }
    }
}

impl PersonSerializer for CsvDynamicPersonSerializer {
    fn initialize(&mut self, config: &Configuration, partition_id: u32) -> Result<()> {
        if !matches!(self.state, State::Uninitialized) {
            return Err(SerializerError::invalid_state(
                self.state.kind(),
                "initialize",
            ));
        }

        let dir = config.get_required(keys::SOCIAL_NETWORK_DIR)?;
        let options = WriterOptions::from_config(config, FIELD_SEPARATOR)?;
        let writers = WriterSet::<EdgeListFile>::open(
            self.fs.as_ref(),
            Path::new(dir),
            partition_id,
            &options,
        )?;

        info!(
            partition = partition_id,
            dir,
            num_partitions = options.num_partitions,
            compressed = options.compressed,
            "Initialized edge-list serializer"
        );
        self.state = State::Initialized(writers);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Initialized(writers) => writers.close_all(),
            previous => {
                let kind = previous.kind();
                self.state = previous;
                Err(SerializerError::invalid_state(kind, "close"))
            }
        }
    }

    fn serialize_knows(&mut self, person: &Person, knows: &Knows) -> Result<()> {
        let fields = [person.account_id.to_string(), knows.to.account_id.to_string()];
        self.writers("write")?
            .get_mut(EdgeListFile::PersonKnowsPerson)
            .write_entry(&fields)
    }
}
