// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::clients::{FunctionInspector, ResourceIdentifier};
use crate::errors::Result;
use crate::evaluation::{ComplianceType, Evaluation};
use crate::events::PeriodicEvent;
use crate::parameters::RuleParameters;
use crate::rules::{evaluable_resources, skip_on_failure, ConfigRule};

pub const OTHER_DEPRECATED_RUNTIMES: &str = "otherDeprecatedRuntimes";

// https://docs.aws.amazon.com/lambda/latest/dg/lambda-runtimes.html#runtime-support-policy
pub const DEPRECATED_RUNTIME_IDENTIFIERS: &[&str] = &[
    "python3.6",
    "python2.7",
    "dotnetcore2.1",
    "ruby2.5",
    "nodejs10.x",
    "nodejs8.10",
    "nodejs4.3",
    "nodejs6.10",
    "dotnetcore1.0",
    "dotnetcore2.0",
    "nodejs4.3-edge",
    "nodejs",
];

/// Runtimes that make a function non-compliant for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList(Vec<String>);

impl DenyList {
    pub fn builtin() -> DenyList {
        DenyList(
            DEPRECATED_RUNTIME_IDENTIFIERS
                .iter()
                .map(|runtime| runtime.to_string())
                .collect(),
        )
    }

    /// The built-in list plus any `otherDeprecatedRuntimes`.
    pub fn for_parameters(parameters: &RuleParameters) -> DenyList {
        let mut deny_list = DenyList::builtin();
        if let Some(other) = parameters.value(OTHER_DEPRECATED_RUNTIMES) {
            deny_list
                .0
                .extend(other.items().into_iter().map(str::to_owned));
        }
        deny_list
    }

    pub fn contains(&self, runtime: &str) -> bool {
        self.0.iter().any(|deprecated| deprecated == runtime)
    }

    pub fn runtimes(&self) -> &[String] {
        &self.0
    }
}

pub fn runtime_compliance(deny_list: &DenyList, runtime: &str) -> ComplianceType {
    if deny_list.contains(runtime) {
        ComplianceType::NonCompliant
    } else {
        ComplianceType::Compliant
    }
}

pub struct NoDeprecatedRuntimes {
    inspector: Arc<dyn FunctionInspector>,
}

impl NoDeprecatedRuntimes {
    pub fn new(inspector: Arc<dyn FunctionInspector>) -> Self {
        NoDeprecatedRuntimes { inspector }
    }
}

#[async_trait]
impl ConfigRule for NoDeprecatedRuntimes {
    fn name(&self) -> &str {
        "function-no-deprecated-runtimes"
    }

    async fn evaluate_periodic(
        &self,
        _event: &PeriodicEvent,
        parameters: &RuleParameters,
        resources: &[ResourceIdentifier],
    ) -> Result<Vec<Evaluation>> {
        let deny_list = DenyList::for_parameters(parameters);
        debug!("Deprecated runtimes: {}", deny_list.runtimes().join(", "));

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
            // Container image functions have no runtime
            let runtime = match configuration.runtime {
                Some(runtime) => runtime,
                None => continue,
            };

            let compliance = runtime_compliance(&deny_list, &runtime);
            let mut evaluation =
                Evaluation::new(self.resource_type(), resource_id, compliance, Utc::now());
            if compliance == ComplianceType::NonCompliant {
                evaluation = evaluation.with_annotation(format!("Runtime {runtime} is deprecated"));
            }
            results.push(evaluation);
        }

        Ok(results)
    }
}
