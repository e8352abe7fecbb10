// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Payloads AWS Config hands to a custom rule function.
//!
//! The outer [`ConfigEvent`] envelope carries the invoking event and the rule
//! parameters as JSON strings, so they are parsed in a second step.

use std::collections::HashMap;
use std::fmt::Formatter;

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::parameters::RuleParameters;

pub const LAMBDA_FUNCTION: &str = "AWS::Lambda::Function";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEvent {
    pub invoking_event: String,
    #[serde(default)]
    pub rule_parameters: Option<String>,
    pub result_token: String,
    #[serde(default)]
    pub event_left_scope: bool,
    #[serde(default)]
    pub execution_role_arn: Option<String>,
    #[serde(default)]
    pub config_rule_arn: Option<String>,
    #[serde(default)]
    pub config_rule_name: Option<String>,
    #[serde(default)]
    pub config_rule_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ConfigEvent {
    pub fn invoking_event(&self) -> Result<InvokingEvent> {
        InvokingEvent::from_json(&self.invoking_event)
    }

    pub fn rule_parameters(&self) -> Result<RuleParameters> {
        match &self.rule_parameters {
            Some(parameters) => RuleParameters::from_json(parameters),
            None => Ok(RuleParameters::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MessageType {
    #[serde(rename = "ConfigurationItemChangeNotification")]
    ItemChange,
    #[serde(rename = "OversizedConfigurationItemChangeNotification")]
    OversizedItemChange,
    #[serde(rename = "ScheduledNotification")]
    ScheduledNotification,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::ItemChange => "ConfigurationItemChangeNotification",
            MessageType::OversizedItemChange => "OversizedConfigurationItemChangeNotification",
            MessageType::ScheduledNotification => "ScheduledNotification",
        }
    }

    pub fn from_tag(tag: &str) -> Option<MessageType> {
        match tag {
            "ConfigurationItemChangeNotification" => Some(MessageType::ItemChange),
            "OversizedConfigurationItemChangeNotification" => {
                Some(MessageType::OversizedItemChange)
            }
            "ScheduledNotification" => Some(MessageType::ScheduledNotification),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reason a rule was invoked, discriminated by `messageType`.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokingEvent {
    Change(ChangeEvent),
    OversizedChange(OversizedChangeEvent),
    Periodic(PeriodicEvent),
    /// Any other `messageType`, or none at all. Carries the raw tag.
    Unrecognized(Option<String>),
}

impl InvokingEvent {
    /// Parses an invoking event. An unknown or missing discriminator is not
    /// an error. Only a change notification needs its body, so a malformed
    /// change body fails while oversized and scheduled bodies are best effort.
    pub fn from_json(content: &str) -> Result<InvokingEvent> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let tag = value
            .get("messageType")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        let event = match tag.as_deref().and_then(MessageType::from_tag) {
            Some(MessageType::ItemChange) => InvokingEvent::Change(serde_json::from_value(value)?),
            Some(MessageType::OversizedItemChange) => InvokingEvent::OversizedChange(
                lenient_body(MessageType::OversizedItemChange, value),
            ),
            Some(MessageType::ScheduledNotification) => {
                InvokingEvent::Periodic(lenient_body(MessageType::ScheduledNotification, value))
            }
            None => InvokingEvent::Unrecognized(tag),
        };
        Ok(event)
    }

    pub fn message_type(&self) -> Option<MessageType> {
        match self {
            InvokingEvent::Change(_) => Some(MessageType::ItemChange),
            InvokingEvent::OversizedChange(_) => Some(MessageType::OversizedItemChange),
            InvokingEvent::Periodic(_) => Some(MessageType::ScheduledNotification),
            InvokingEvent::Unrecognized(_) => None,
        }
    }
}

fn lenient_body<T: DeserializeOwned + Default>(
    message_type: MessageType,
    value: serde_json::Value,
) -> T {
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!("Ignoring unreadable {} body: {}", message_type, err);
        T::default()
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub configuration_item: ConfigurationItem,
    pub notification_creation_time: Option<DateTime<Utc>>,
    pub record_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OversizedChangeEvent {
    pub configuration_item_summary: Option<ConfigurationItemSummary>,
    pub notification_creation_time: Option<DateTime<Utc>>,
    pub record_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodicEvent {
    #[serde(alias = "accountId")]
    pub aws_account_id: Option<String>,
    pub notification_creation_time: Option<DateTime<Utc>>,
    pub record_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ConfigurationItemStatus {
    #[serde(rename = "OK")]
    Ok,
    ResourceDiscovered,
    ResourceNotRecorded,
    ResourceDeleted,
    ResourceDeletedNotRecorded,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    pub availability_zone: Option<String>,
    pub aws_account_id: Option<String>,
    pub aws_region: Option<String>,
    pub configuration_item_capture_time: Option<DateTime<Utc>>,
    pub configuration_item_status: Option<ConfigurationItemStatus>,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: String,
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationItemSummary {
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    pub availability_zone: Option<String>,
    pub aws_account_id: Option<String>,
    pub aws_region: Option<String>,
    pub configuration_item_capture_time: Option<DateTime<Utc>>,
    pub configuration_item_status: Option<ConfigurationItemStatus>,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
    pub change_type: Option<String>,
    pub configuration_item_version: Option<String>,
    pub configuration_state_id: Option<i64>,
    pub configuration_state_md5_hash: Option<String>,
    pub resource_creation_time: Option<DateTime<Utc>>,
}
