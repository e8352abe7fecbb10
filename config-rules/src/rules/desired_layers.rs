// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;

use crate::clients::{FunctionInspector, ResourceIdentifier};
use crate::errors::{Error, Result};
use crate::evaluation::{ComplianceType, Evaluation};
use crate::events::PeriodicEvent;
use crate::parameters::{ParameterValue, RuleParameters};
use crate::rules::{evaluable_resources, skip_on_failure, ConfigRule};

pub const REQUIRED_LAYER_ARNS: &str = "requiredLayerArns";

/// Checks every function has the layer ARNs named by `requiredLayerArns`.
pub struct DesiredLayerVersion {
    inspector: Arc<dyn FunctionInspector>,
}

impl DesiredLayerVersion {
    pub fn new(inspector: Arc<dyn FunctionInspector>) -> Self {
        DesiredLayerVersion { inspector }
    }
}

pub fn missing_layers<'r>(required: &'r ParameterValue, attached: &[String]) -> Vec<&'r str> {
    required
        .items()
        .into_iter()
        .filter(|layer| !attached.iter().any(|arn| arn == layer))
        .collect()
}

/// A list needs every layer attached. A scalar needs to be one of them.
pub fn layer_compliance(required: &ParameterValue, attached: &[String]) -> ComplianceType {
    match required {
        ParameterValue::List(_) => {
            if missing_layers(required, attached).is_empty() {
                ComplianceType::Compliant
            } else {
                ComplianceType::NonCompliant
            }
        }
        ParameterValue::Scalar(layer) => {
            if attached.iter().any(|arn| arn == layer) {
                ComplianceType::Compliant
            } else {
                ComplianceType::NonCompliant
            }
        }
    }
}

#[async_trait]
impl ConfigRule for DesiredLayerVersion {
    fn name(&self) -> &str {
        "function-desired-layer-version"
    }

    async fn evaluate_periodic(
        &self,
        _event: &PeriodicEvent,
        parameters: &RuleParameters,
        resources: &[ResourceIdentifier],
    ) -> Result<Vec<Evaluation>> {
        let required = parameters
            .value(REQUIRED_LAYER_ARNS)
            .ok_or_else(|| Error::MissingParameter(REQUIRED_LAYER_ARNS.to_owned()))?;

        let mut results = Vec::new();
        for (resource_id, function_name) in evaluable_resources(resources) {
            info!("Checking compliance of {}", function_name);
            let configuration = match skip_on_failure(
                function_name,
                self.inspector.function_configuration(function_name).await,
            ) {
                Some(configuration) => configuration,
                None => continue,
            };

            let compliance = layer_compliance(&required, &configuration.layer_arns);
            let mut evaluation =
                Evaluation::new(self.resource_type(), resource_id, compliance, Utc::now());

            let missing = missing_layers(&required, &configuration.layer_arns);
            if !missing.is_empty() {
                let missing = missing.join(", ");
                info!("Missing layers: {}", missing);
                evaluation = evaluation.with_annotation(format!("Missing layers: {missing}"));
            }
            results.push(evaluation);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attached(arns: &[&str]) -> Vec<String> {
        arns.iter().map(|arn| arn.to_string()).collect()
    }

    #[test]
    fn list_requires_every_layer() {
        let required = ParameterValue::List(vec!["L1".into(), "L2".into()]);
        assert_eq!(layer_compliance(&required, &attached(&["L1"])), ComplianceType::NonCompliant);
        assert_eq!(
            layer_compliance(&required, &attached(&["L1", "L2", "L3"])),
            ComplianceType::Compliant
        );
        assert_eq!(missing_layers(&required, &attached(&["L1"])), vec!["L2"]);
    }

    #[test]
    fn scalar_requires_the_one_layer() {
        let required = ParameterValue::Scalar("L1".into());
        assert_eq!(layer_compliance(&required, &attached(&["L1"])), ComplianceType::Compliant);
        assert_eq!(layer_compliance(&required, &attached(&["L2"])), ComplianceType::NonCompliant);
        assert_eq!(layer_compliance(&required, &[]), ComplianceType::NonCompliant);
    }
}
