//! Person serializer interface

use crate::entities::{Knows, Person, StudyAt, WorkAt};
use crate::error::Result;
use crate::file_kind::FileName;
use snb_datagen_config::Configuration;

/// Sink for the dynamic person graph of one partition.
///
/// Lifecycle: `initialize` once, any number of writes, `close` once. Each
/// entity shape has its own method; shapes a variant does not export keep the
/// default no-op, so feeding them is never an error.
pub trait PersonSerializer: Send {
    /// Header-bearing files this variant produces
    fn file_names(&self) -> Vec<FileName> {
        Vec::new()
    }

    fn write_file_headers(&mut self) -> Result<()> {
        Ok(())
    }

    /// Open the writers for `partition_id`
    fn initialize(&mut self, config: &Configuration, partition_id: u32) -> Result<()>;

    /// Release every writer. Must be called exactly once.
    fn close(&mut self) -> Result<()>;

    fn serialize_person(&mut self, _person: &Person) -> Result<()> {
        Ok(())
    }

    fn serialize_study_at(&mut self, _study_at: &StudyAt) -> Result<()> {
        Ok(())
    }

    fn serialize_work_at(&mut self, _work_at: &WorkAt) -> Result<()> {
        Ok(())
    }

    fn serialize_knows(&mut self, _person: &Person, _knows: &Knows) -> Result<()> {
        Ok(())
    }

    /// Feed one person and everything hanging off it: the person, study-at,
    /// work-at records, then every outgoing `knows` edge.
    fn export(&mut self, person: &Person) -> Result<()> {
        self.serialize_person(person)?;
        if let Some(study_at) = &person.study_at {
            self.serialize_study_at(study_at)?;
        }
        for work_at in &person.work_at {
            self.serialize_work_at(work_at)?;
        }
        for knows in &person.knows {
            self.serialize_knows(person, knows)?;
        }
        Ok(())
    }
}
