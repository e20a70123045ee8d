// Tunable loading shared by the player and bear configs
//
// Configs are plain structs with a `pub const` baseline. Files only need to
// name the fields they override; everything else falls back to the baseline
// through `#[serde(default)]`.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::BehaviorError;

/// Consistency checks run after every load
pub trait Validate {
    fn validate(&self) -> Result<(), BehaviorError>;
}

/// Parse and validate a config from RON text
pub fn from_ron_str<T>(source: &str) -> Result<T, BehaviorError>
where
    T: DeserializeOwned + Validate,
{
    let config: T = ron::from_str(source)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a config file
pub fn load<T, P>(path: P) -> Result<T, BehaviorError>
where
    T: DeserializeOwned + Validate,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let config = from_ron_str(&source)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Fail with `InvalidConfig` unless `value` is finite and strictly positive
pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<(), BehaviorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::InvalidConfig(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("speed", 1.0).is_ok());
        assert!(ensure_positive("speed", 0.0).is_err());
        assert!(ensure_positive("speed", f32::NAN).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result: Result<crate::game::bear::BearConfig, _> =
            load("/definitely/not/here/bear.ron");
        assert!(matches!(result, Err(BehaviorError::Io(_))));
    }
}
