//! Configuration key names

/// Namespace shared by every generator key
pub const NAMESPACE: &str = "ldbc.snb.datagen";

pub const SCALE_FACTOR: &str = "ldbc.snb.datagen.scaleFactor";
pub const NUM_THREADS: &str = "ldbc.snb.datagen.numThreads";
pub const PERSON_SERIALIZER: &str = "ldbc.snb.datagen.serializer.personSerializer";
pub const INVARIANT_SERIALIZER: &str = "ldbc.snb.datagen.serializer.invariantSerializer";
pub const DYNAMIC_PERSON_SERIALIZER: &str = "ldbc.snb.datagen.serializer.dynamicPersonSerializer";
pub const COMPRESSED: &str = "ldbc.snb.datagen.serializer.compressed";
pub const UPDATE_STREAMS: &str = "ldbc.snb.datagen.serializer.updateStreams";
pub const OUTPUT_DIR: &str = "ldbc.snb.datagen.serializer.outputDir";
pub const DELTA_TIME: &str = "ldbc.snb.datagen.deltaTime";
pub const EXPORT_TEXT: &str = "ldbc.snb.datagen.exportText";

pub const SOCIAL_NETWORK_DIR: &str = "ldbc.snb.datagen.serializer.socialNetworkDir";
pub const NUM_PARTITIONS: &str = "ldbc.snb.datagen.serializer.numPartitions";
pub const ENDLINE_SEPARATOR: &str = "ldbc.snb.datagen.serializer.endlineSeparator";

/// Filesystem scheme, outside the generator namespace
pub const DEFAULT_FS: &str = "fs.defaultFS";
