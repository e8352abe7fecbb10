// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod aws;
pub mod clients;
pub mod dispatch;
mod errors;
pub mod evaluation;
pub mod events;
pub mod handler;
pub mod parameters;
pub mod rules;
pub mod settings;

pub use crate::errors::{Error, Result};
pub use crate::evaluation::{ComplianceType, Evaluation};
pub use crate::events::{ConfigEvent, InvokingEvent, MessageType, LAMBDA_FUNCTION};
pub use crate::handler::ConfigRuleHandler;
pub use crate::parameters::{ParameterValue, RuleParameters};
pub use crate::settings::Settings;
