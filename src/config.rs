use std::env;
use std::time::Duration;

use tracing::warn;

use crate::optimizer::CutConfig;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub runner: RunnerConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(env_string)
    }

    /// Creates a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            optimizer: OptimizerConfig::from_lookup(&lookup),
            runner: RunnerConfig::from_lookup(&lookup),
        }
    }
}

/// Configuration of the cutting algorithm.
#[derive(Clone, Debug, Default)]
pub struct OptimizerConfig {
    cut: CutConfig,
}

impl OptimizerConfig {
    const ALLOW_ROTATION_VAR: &'static str = "CUT_IT_NOW_ALLOW_ROTATION";
    const MAX_SHEETS_VAR: &'static str = "CUT_IT_NOW_MAX_SHEETS";

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let allow_rotation = lookup(Self::ALLOW_ROTATION_VAR)
            .and_then(|raw| parse_bool(&raw, Self::ALLOW_ROTATION_VAR))
            .unwrap_or(CutConfig::DEFAULT_ALLOW_ROTATION);

        let max_sheets = load_with_warning(
            lookup(Self::MAX_SHEETS_VAR),
            Self::MAX_SHEETS_VAR,
            CutConfig::DEFAULT_MAX_SHEETS,
            |value| value >= 1,
            "must be at least 1",
        );

        let cut = CutConfig::builder()
            .allow_rotation(allow_rotation)
            .max_sheets(max_sheets)
            .build();

        Self { cut }
    }

    /// Returns the configured CutConfig.
    pub fn cut_config(&self) -> CutConfig {
        self.cut
    }
}

/// Configuration of the async runner.
#[derive(Clone, Debug, Default)]
pub struct RunnerConfig {
    deadline: Option<Duration>,
}

impl RunnerConfig {
    const DEADLINE_VAR: &'static str = "CUT_IT_NOW_DEADLINE_MS";

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        // 0 disables the deadline
        let millis = load_with_warning(
            lookup(Self::DEADLINE_VAR),
            Self::DEADLINE_VAR,
            0u64,
            |_| true,
            "",
        );
        Self {
            deadline: (millis > 0).then(|| Duration::from_millis(millis)),
        }
    }

    /// Deadline for a single run, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!("Access to {} failed: {}. Using default value.", name, err);
            None
        }
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            warn!(
                "Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}

fn load_with_warning<T>(
    raw: Option<String>,
    var_name: &str,
    default: T,
    validator: impl Fn(T) -> bool,
    invalid_hint: &str,
) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if validator(value) => value,
        Ok(_) => {
            warn!(
                "{} contains invalid value '{}': {}. Using {}.",
                var_name, raw, invalid_hint, default
            );
            default
        }
        Err(err) => {
            warn!(
                "Could not parse {} ('{}') as number: {}. Using {}.",
                var_name, raw, err, default
            );
            default
        }
    }
}
