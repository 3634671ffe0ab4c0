// Configuration bootstrap
//
// `initialize` seeds the defaults, `read_config` overlays an override file on
// top of them and applies the local-filesystem safeguard.

use crate::error::{ConfigError, Result};
use crate::keys;
use crate::properties::parse_properties;
use crate::validation::validate_config;
use crate::{ConfigBuilder, Configuration};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// `fs.defaultFS` value meaning the output goes to the local, non-distributed filesystem
pub const LOCAL_FILESYSTEM: &str = "file:///";

const DEFAULTS: &[(&str, &str)] = &[
    (keys::SCALE_FACTOR, "1"),
    (keys::NUM_THREADS, "1"),
    (
        keys::PERSON_SERIALIZER,
        "ldbc.snb.datagen.serializer.snb.interactive.CSVPersonSerializer",
    ),
    (
        keys::INVARIANT_SERIALIZER,
        "ldbc.snb.datagen.serializer.snb.interactive.CSVInvariantSerializer",
    ),
    (keys::COMPRESSED, "false"),
    (keys::UPDATE_STREAMS, "false"),
    (keys::OUTPUT_DIR, "./"),
    (keys::DELTA_TIME, "10000"),
    (keys::EXPORT_TEXT, "true"),
];

/// Build the configuration holding only the built-in defaults
pub fn initialize() -> Configuration {
    let mut builder = ConfigBuilder::new();
    builder.merge(DEFAULTS.iter().copied());
    builder.build()
}

/// Overlay the property file at `path` on `base`.
///
/// Every key in the file replaces (or adds to) the base entry. When the
/// result targets the local filesystem the thread count is forced to 1; an
/// unset `fs.defaultFS` means the local filesystem.
/// The merged configuration is validated before it is returned; nothing
/// partially merged ever escapes.
pub fn read_config(base: Configuration, path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let overrides = parse_properties(&content)?;
    debug!(
        path = %path.display(),
        entries = overrides.len(),
        "Read override file"
    );

    let mut builder = base.into_builder();
    builder.merge(overrides);

    if builder.get(keys::DEFAULT_FS).unwrap_or(LOCAL_FILESYSTEM) == LOCAL_FILESYSTEM {
        warn!("Running in standalone mode. Setting numThreads to 1");
        builder.set(keys::NUM_THREADS, "1");
    }

    let config = builder.build();
    validate_config(&config)?;
    info!(path = %path.display(), "Loaded configuration overrides");
    Ok(config)
}

/// Like [`read_config`], but a failure terminates the process with status 1.
///
/// Downstream partition writers assume a fully resolved configuration, so a
/// broken override file is not something the caller can recover from.
pub fn read_config_or_exit(base: Configuration, path: impl AsRef<Path>) -> Configuration {
    match read_config(base, path) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Derive the social-network directory from the base output directory.
///
/// An explicit value is left alone.
pub fn derive_output_dirs(config: Configuration) -> Configuration {
    let output_dir = config
        .get(keys::OUTPUT_DIR)
        .unwrap_or("./")
        .trim_end_matches('/')
        .to_string();
    let output_dir = if output_dir.is_empty() {
        "/".to_string()
    } else {
        output_dir
    };

    let mut builder = config.into_builder();
    if builder.get(keys::SOCIAL_NETWORK_DIR).is_none() {
        let derived = if output_dir == "/" {
            "/social_network".to_string()
        } else {
            format!("{}/social_network", output_dir)
        };
        builder.set(keys::SOCIAL_NETWORK_DIR, derived);
    }
    builder.build()
}

/// Entries whose key starts with `prefix`
pub fn entries_with_prefix<'a>(
    config: &'a Configuration,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    config.iter().filter(move |(k, _)| k.starts_with(prefix))
}

/// Dump every generator key as `key value` lines
pub fn print_config<W: Write>(config: &Configuration, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "********* Configuration *********")?;
    for (key, value) in entries_with_prefix(config, keys::NAMESPACE) {
        writeln!(out, "{} {}", key, value)?;
    }
    writeln!(out, "*********************************")?;
    Ok(())
}
