// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::{debug, info};

use crate::clients::{ResourceEnumerator, ResultReporter};
use crate::dispatch::evaluate_compliance;
use crate::errors::Result;
use crate::evaluation::Evaluation;
use crate::events::ConfigEvent;
use crate::rules::ConfigRule;

/// A rule wired to its collaborators. Built once per cold start and reused
/// for every invocation.
pub struct ConfigRuleHandler {
    rule: Box<dyn ConfigRule>,
    enumerator: Arc<dyn ResourceEnumerator>,
    reporter: Arc<dyn ResultReporter>,
}

impl ConfigRuleHandler {
    pub fn new(
        rule: Box<dyn ConfigRule>,
        enumerator: Arc<dyn ResourceEnumerator>,
        reporter: Arc<dyn ResultReporter>,
    ) -> Self {
        ConfigRuleHandler {
            rule,
            enumerator,
            reporter,
        }
    }

    pub fn rule(&self) -> &dyn ConfigRule {
        self.rule.as_ref()
    }

    /// Evaluates the invocation and reports the verdicts exactly once. Any
    /// error before the report means nothing is reported.
    pub async fn handle(&self, event: &ConfigEvent) -> Result<Vec<Evaluation>> {
        let invoking_event = event.invoking_event()?;
        let parameters = event.rule_parameters()?;
        info!(
            "Evaluating {} for {} ({})",
            self.rule.name(),
            event.config_rule_name.as_deref().unwrap_or("unnamed rule"),
            invoking_event
                .message_type()
                .map(|message_type| message_type.as_str())
                .unwrap_or("unrecognized message type")
        );

        let evaluations = evaluate_compliance(
            self.rule.as_ref(),
            self.enumerator.as_ref(),
            &invoking_event,
            &parameters,
        )
        .await?;
        debug!("{}", serde_json::to_string(&evaluations)?);

        self.reporter
            .report(&evaluations, &event.result_token)
            .await?;
        Ok(evaluations)
    }
}
