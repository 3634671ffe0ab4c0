// Configuration validation
//
// Checks that the typed generator keys hold values their consumers can parse.
// Keys are optional here; presence of required keys is the consumer's check.

use crate::error::{ConfigError, Result};
use crate::keys;
use crate::Configuration;
use tracing::warn;

const MAX_REASONABLE_THREADS: i64 = 1024;

pub fn validate_config(config: &Configuration) -> Result<()> {
    validate_positive(config, keys::SCALE_FACTOR)?;
    validate_threads(config)?;

    let delta = config.get_int_or(keys::DELTA_TIME, 0)?;
    if delta < 0 {
        return Err(ConfigError::invalid(
            keys::DELTA_TIME,
            &delta.to_string(),
            "must not be negative",
        ));
    }

    for key in [keys::COMPRESSED, keys::UPDATE_STREAMS, keys::EXPORT_TEXT] {
        config.get_bool_or(key, false)?;
    }

    if let Some(dir) = config.get(keys::OUTPUT_DIR) {
        if dir.trim().is_empty() {
            return Err(ConfigError::invalid(
                keys::OUTPUT_DIR,
                dir,
                "must not be empty",
            ));
        }
    }

    Ok(())
}

fn validate_positive(config: &Configuration, key: &str) -> Result<i64> {
    let value = config.get_int_or(key, 1)?;
    if value <= 0 {
        return Err(ConfigError::invalid(
            key,
            &value.to_string(),
            "must be greater than 0",
        ));
    }
    Ok(value)
}

fn validate_threads(config: &Configuration) -> Result<()> {
    let threads = validate_positive(config, keys::NUM_THREADS)?;
    if threads > MAX_REASONABLE_THREADS {
        warn!(
            num_threads = threads,
            "numThreads is very large; writers may contend for the filesystem"
        );
    }
    Ok(())
}
