// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use log::LevelFilter;

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_EXECUTION_ENV: &str = "AWS_EXECUTION_ENV";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const REMEDIATE_PROVISIONED_CONCURRENCY: &str = "REMEDIATE_PROVISIONED_CONCURRENCY";

const NOT_AVAILABLE: &str = "N/A";

/// Function settings, read once at cold start.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub region: String,
    pub execution_env: String,
    pub log_level: LevelFilter,
    /// Delete provisioned concurrency configurations instead of only
    /// reporting them.
    pub remediate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            region: NOT_AVAILABLE.to_owned(),
            execution_env: NOT_AVAILABLE.to_owned(),
            log_level: LevelFilter::Info,
            remediate: false,
        }
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Settings {
            region: lookup(AWS_REGION).unwrap_or(defaults.region),
            execution_env: lookup(AWS_EXECUTION_ENV).unwrap_or(defaults.execution_env),
            log_level: lookup(LOG_LEVEL)
                .and_then(|level| LevelFilter::from_str(level.trim()).ok())
                .unwrap_or(defaults.log_level),
            remediate: lookup(REMEDIATE_PROVISIONED_CONCURRENCY)
                .map(|value| is_enabled(&value))
                .unwrap_or(defaults.remediate),
        }
    }
}
