// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use log::{debug, warn};

use crate::clients::{list_all_resources, ResourceEnumerator};
use crate::errors::Result;
use crate::evaluation::Evaluation;
use crate::events::InvokingEvent;
use crate::parameters::RuleParameters;
use crate::rules::ConfigRule;

/// Routes the invoking event to the rule. Oversized change notifications and
/// unrecognized message types evaluate nothing.
pub async fn evaluate_compliance(
    rule: &dyn ConfigRule,
    enumerator: &dyn ResourceEnumerator,
    invoking_event: &InvokingEvent,
    parameters: &RuleParameters,
) -> Result<Vec<Evaluation>> {
    match invoking_event {
        InvokingEvent::Change(event) => {
            debug!("Change event found");
            rule.evaluate_change(&event.configuration_item, parameters)
                .await
        }
        InvokingEvent::OversizedChange(event) => {
            debug!(
                "Oversized change event found for {:?}, nothing to evaluate",
                event
                    .configuration_item_summary
                    .as_ref()
                    .and_then(|summary| summary.resource_id.as_deref())
            );
            Ok(vec![])
        }
        InvokingEvent::Periodic(event) => {
            debug!("Periodic event found");
            let resources = list_all_resources(enumerator, rule.resource_type()).await?;
            rule.evaluate_periodic(event, parameters, &resources).await
        }
        InvokingEvent::Unrecognized(message_type) => {
            warn!("Unrecognized message type {:?}, nothing to evaluate", message_type);
            Ok(vec![])
        }
    }
}
