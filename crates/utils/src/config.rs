//! Library settings
//!
//! Values come from the built-in defaults, optionally overridden by a JSON
//! document or by `AMALFI_*` environment variables.

use crate::resilience::RetryConfig;
use amalfi_core::constants::{
    AMALFI_MAX_CONCURRENCY_VAR, AMALFI_MAX_RETRIES_VAR, AMALFI_MEMO_CAPACITY_VAR,
    AMALFI_RETRY_BASE_DELAY_MS_VAR, AMALFI_RETRY_JITTER_VAR, AMALFI_RETRY_MAX_DELAY_MS_VAR,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RETRIES, DEFAULT_MEMO_CAPACITY,
    DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_JITTER, DEFAULT_RETRY_MAX_DELAY_MS,
};
use amalfi_core::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Retry policy as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_factor: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            jitter_factor: DEFAULT_RETRY_JITTER,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        RetryConfig {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            jitter_factor: settings.jitter_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub retry: RetrySettings,
    /// Entries kept by a [`Memo`](crate::Memo) built from these settings
    pub memo_capacity: usize,
    /// In-flight limit for bounded fan-outs such as `amap_buffered`
    pub max_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retry: RetrySettings::default(),
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("decoding settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults overridden by any `AMALFI_*` variable that is set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        override_from(&lookup, AMALFI_MAX_RETRIES_VAR, &mut settings.retry.max_retries)?;
        override_from(
            &lookup,
            AMALFI_RETRY_BASE_DELAY_MS_VAR,
            &mut settings.retry.base_delay_ms,
        )?;
        override_from(
            &lookup,
            AMALFI_RETRY_MAX_DELAY_MS_VAR,
            &mut settings.retry.max_delay_ms,
        )?;
        override_from(&lookup, AMALFI_RETRY_JITTER_VAR, &mut settings.retry.jitter_factor)?;
        override_from(&lookup, AMALFI_MEMO_CAPACITY_VAR, &mut settings.memo_capacity)?;
        override_from(&lookup, AMALFI_MAX_CONCURRENCY_VAR, &mut settings.max_concurrency)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.memo_capacity == 0 {
            return Err(Error::configuration("memo_capacity must be greater than zero"));
        }
        if self.max_concurrency == 0 {
            return Err(Error::configuration(
                "max_concurrency must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.retry.jitter_factor) {
            return Err(Error::configuration(format!(
                "retry.jitter_factor must be within [0, 1], got {}",
                self.retry.jitter_factor
            )));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(Error::configuration(format!(
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }
        Ok(())
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::from(&self.retry)
    }
}

fn override_from<L, T>(lookup: &L, name: &str, target: &mut T) -> Result<()>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(name) {
        *target = raw
            .trim()
            .parse::<T>()
            .map_err(|e| Error::configuration(format!("invalid value {raw:?} for {name}: {e}")))?;
    }
    Ok(())
}
