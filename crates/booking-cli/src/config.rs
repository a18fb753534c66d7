//! Store configuration overrides.
//!
//! The day snapshot carries the store's bed count and operating hours. They can
//! be overridden, in increasing precedence, by environment variables (a `.env`
//! file is honored) and by the `--total-beds` flag.

use anyhow::{Context, Result};
use booking_engine::adapter::parse_time;
use booking_engine::StoreConfig;
use tracing::debug;

pub const ENV_TOTAL_BEDS: &str = "BOOKING_TOTAL_BEDS";
pub const ENV_DAY_START: &str = "BOOKING_DAY_START";
pub const ENV_DAY_END: &str = "BOOKING_DAY_END";

/// Apply environment and flag overrides to `store` using the process environment.
pub fn apply_overrides(store: &mut StoreConfig, total_beds_flag: Option<u32>) -> Result<()> {
    apply_overrides_from(store, |key| std::env::var(key).ok(), total_beds_flag)
}

/// Same as [`apply_overrides`], reading variables through `lookup`.
pub fn apply_overrides_from(
    store: &mut StoreConfig,
    lookup: impl Fn(&str) -> Option<String>,
    total_beds_flag: Option<u32>,
) -> Result<()> {
    if let Some(raw) = lookup(ENV_TOTAL_BEDS) {
        store.total_beds = raw
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TOTAL_BEDS} must be a bed count, got '{raw}'"))?;
        debug!(total_beds = store.total_beds, "total_beds from environment");
    }
    if let Some(raw) = lookup(ENV_DAY_START) {
        store.day_start =
            parse_time(&raw).with_context(|| format!("Invalid {ENV_DAY_START}"))?;
    }
    if let Some(raw) = lookup(ENV_DAY_END) {
        store.day_end = parse_time(&raw).with_context(|| format!("Invalid {ENV_DAY_END}"))?;
    }
    if let Some(beds) = total_beds_flag {
        store.total_beds = beds;
    }

    store.validate().context("Invalid store configuration")?;
    Ok(())
}
