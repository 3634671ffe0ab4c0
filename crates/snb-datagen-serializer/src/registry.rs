//! Serializer lookup by configured name

use crate::error::{Result, SerializerError};
use crate::pgx::CsvDynamicPersonSerializer;
use crate::serializer::PersonSerializer;
use crate::storage::FileSystem;
use std::sync::Arc;

/// Fully qualified identifier of the edge-list serializer
pub const PGX_SERIALIZER: &str =
    "ldbc.snb.datagen.serializer.graphalytics.pgx.CsvDynamicPersonSerializer";

/// Short alias accepted in place of [`PGX_SERIALIZER`]
pub const PGX_ALIAS: &str = "pgx";

/// Build the serializer registered under `name`
pub fn serializer_for(name: &str, fs: Arc<dyn FileSystem>) -> Result<Box<dyn PersonSerializer>> {
    match name.trim() {
        PGX_SERIALIZER | PGX_ALIAS => Ok(Box::new(CsvDynamicPersonSerializer::new(fs))),
        other => Err(SerializerError::UnknownSerializer {
            name: other.to_string(),
            supported: format!("{}, {}", PGX_ALIAS, PGX_SERIALIZER),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileSystem;

    #[test]
    fn test_resolves_full_name_and_alias() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        assert!(serializer_for(PGX_SERIALIZER, Arc::clone(&fs)).is_ok());
        assert!(serializer_for("pgx", fs).is_ok());
    }

    #[test]
    fn test_unknown_name() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let err = serializer_for(
            "ldbc.snb.datagen.serializer.snb.interactive.CSVPersonSerializer",
            fs,
        )
        .err()
        .unwrap();
        assert!(matches!(err, SerializerError::UnknownSerializer { .. }));
    }
}
