use thiserror::Error;

/// Rejected building configuration.
///
/// Empty prefab pools are never an error; only values that would make the
/// grid scan ill-defined are rejected here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("window interval must be at least 1")]
    ZeroWindowInterval,

    #[error("sign height interval must be at least 1")]
    ZeroSignHeightInterval,

    #[error("sign spawn chance {0} is outside [0, 1]")]
    SpawnChanceOutOfRange(f32),

    #[error("sign wall offset {0} is outside (0, 1]")]
    WallOffsetOutOfRange(f32),
}
