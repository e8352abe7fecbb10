// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Flags functions that have provisioned concurrency configured.
//!
//! With remediation enabled the rule deletes every configuration it finds and
//! reports the function as compliant once all deletions succeed. A failed
//! deletion keeps the function non-compliant and is recorded on its
//! evaluation; the remaining functions are still evaluated.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};

use crate::clients::{FunctionInspector, ProvisionedConcurrencyConfig, ResourceIdentifier};
use crate::errors::{Error, Result};
use crate::evaluation::{ComplianceType, Evaluation};
use crate::events::PeriodicEvent;
use crate::parameters::RuleParameters;
use crate::rules::{evaluable_resources, skip_on_failure, ConfigRule};

pub struct NoProvisionedConcurrency {
    inspector: Arc<dyn FunctionInspector>,
    remediate: bool,
}

impl NoProvisionedConcurrency {
    pub fn new(inspector: Arc<dyn FunctionInspector>, remediate: bool) -> Self {
        NoProvisionedConcurrency {
            inspector,
            remediate,
        }
    }

    /// Deletes every configuration, returning the deletions that failed.
    async fn remove_provisioned_concurrency(
        &self,
        function_name: &str,
        configs: &[ProvisionedConcurrencyConfig],
    ) -> Vec<Error> {
        let mut failures = Vec::new();
        for config in configs {
            let qualifier = config.qualifier();
            if let Err(err) = self
                .inspector
                .delete_provisioned_concurrency_config(function_name, qualifier)
                .await
            {
                warn!(
                    "Could not remove provisioned concurrency from {}:{}: {}",
                    function_name, qualifier, err
                );
                failures.push(err);
            }
        }
        failures
    }
}

pub fn concurrency_compliance(configs: &[ProvisionedConcurrencyConfig]) -> ComplianceType {
    if configs.is_empty() {
        ComplianceType::Compliant
    } else {
        ComplianceType::NonCompliant
    }
}

#[async_trait]
impl ConfigRule for NoProvisionedConcurrency {
    fn name(&self) -> &str {
        "function-no-provisioned-concurrency"
    }

    async fn evaluate_periodic(
        &self,
        _event: &PeriodicEvent,
        _parameters: &RuleParameters,
        resources: &[ResourceIdentifier],
    ) -> Result<Vec<Evaluation>> {
        let mut results = Vec::new();
        for (resource_id, function_name) in evaluable_resources(resources) {
            info!("Checking compliance of {}", function_name);
            let configs = match skip_on_failure(
                function_name,
                self.inspector
                    .provisioned_concurrency_configs(function_name)
                    .await,
            ) {
                Some(configs) => configs,
                None => continue,
            };
            info!("PC Config: {:?}", configs);

            let mut compliance = concurrency_compliance(&configs);
            let mut annotation = None;
            if compliance == ComplianceType::NonCompliant {
                info!("{} is non-compliant", function_name);
                annotation = Some(format!(
                    "{} provisioned concurrency configuration(s) present",
                    configs.len()
                ));

                if self.remediate {
                    let failures = self
                        .remove_provisioned_concurrency(function_name, &configs)
                        .await;
                    match failures.first() {
                        None => {
                            compliance = ComplianceType::Compliant;
                            annotation = Some("Provisioned concurrency removed".to_owned());
                            info!(
                                "Provisioned Concurrency has been removed from {}. This resource is now compliant.",
                                function_name
                            );
                        }
                        Some(failure) => annotation = Some(failure.to_string()),
                    }
                }
            } else {
                info!("{} is compliant", function_name);
            }

            let mut evaluation =
                Evaluation::new(self.resource_type(), resource_id, compliance, Utc::now());
            if let Some(annotation) = annotation {
                evaluation = evaluation.with_annotation(annotation);
            }
            results.push(evaluation);
        }

        Ok(results)
    }
}
