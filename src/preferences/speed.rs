//! Playback speed preference.

use super::{PreferenceError, PreferenceStore, SharedPreferences, SpeedError};

/// Preference key holding the speed factor.
pub const SPEED_KEY: &str = "playback_speed";

/// Lower bound for keyboard speed stepping.
pub const MIN_SPEED: f64 = 0.1;

/// Upper bound for keyboard speed stepping.
pub const MAX_SPEED: f64 = 16.0;

/// Multiplier applied by one speed step.
const SPEED_STEP: f64 = 1.25;

/// Validate user speed input: a finite decimal greater than zero.
///
/// # Examples
///
/// ```
/// use subfollow::preferences::parse_speed;
///
/// assert_eq!(parse_speed(" 1.5 ").unwrap(), 1.5);
/// assert!(parse_speed("fast").is_err());
/// assert!(parse_speed("0").is_err());
/// ```
pub fn parse_speed(input: &str) -> Result<f64, SpeedError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| SpeedError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(SpeedError::NotANumber(trimmed.to_string()));
    }
    if value <= 0.0 {
        return Err(SpeedError::NotPositive(trimmed.to_string()));
    }
    Ok(value)
}

/// One step faster, capped at [`MAX_SPEED`].
pub fn speed_up(speed: f64) -> f64 {
    (speed * SPEED_STEP).min(MAX_SPEED)
}

/// One step slower, floored at [`MIN_SPEED`].
pub fn speed_down(speed: f64) -> f64 {
    (speed / SPEED_STEP).max(MIN_SPEED)
}

/// Persist `speed` under [`SPEED_KEY`].
///
/// Written with the shortest text that reads back as the same `f64`, so
/// whatever [`parse_speed`] accepted survives the round trip.
pub fn store_speed(
    store: &mut dyn PreferenceStore,
    speed: f64,
    ttl: chrono::Duration,
) -> Result<(), PreferenceError> {
    store.set(SPEED_KEY, &speed.to_string(), ttl)
}

/// Where the engine reads the speed factor from on every tick.
pub trait SpeedSource {
    /// Current speed factor. Always positive.
    fn speed_factor(&self) -> f64;
}

/// A speed that never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedSpeed(pub f64);

impl SpeedSource for FixedSpeed {
    fn speed_factor(&self) -> f64 {
        self.0
    }
}

/// Speed read from a preference store, with a fallback for missing,
/// expired or invalid values.
pub struct StoredSpeed {
    store: SharedPreferences,
    fallback: f64,
}

impl StoredSpeed {
    pub fn new(store: SharedPreferences, fallback: f64) -> Self {
        let fallback = if fallback.is_finite() && fallback > 0.0 {
            fallback
        } else {
            1.0
        };
        Self { store, fallback }
    }
}

impl SpeedSource for StoredSpeed {
    fn speed_factor(&self) -> f64 {
        let Some(raw) = self.store.borrow().get(SPEED_KEY) else {
            return self.fallback;
        };
        match parse_speed(&raw) {
            Ok(speed) => speed,
            Err(e) => {
                tracing::debug!("ignoring stored speed: {}", e);
                self.fallback
            }
        }
    }
}
