// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use aws_config::BehaviorVersion;
use config_rules::aws::{AwsConfigClient, AwsLambdaClient};
use config_rules::clients::FunctionInspector;
use config_rules::rules::ConfigRule;
use config_rules::{ComplianceType, ConfigEvent, ConfigRuleHandler, Evaluation, Settings};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{error, info};
use serde::Serialize;
use simple_logger::SimpleLogger;

#[derive(Debug, Serialize, PartialEq)]
pub struct RuleOutput {
    pub rule: String,
    pub evaluated: usize,
    pub compliant: usize,
    pub non_compliant: usize,
}

impl RuleOutput {
    pub fn new(rule: &str, evaluations: &[Evaluation]) -> Self {
        let count = |compliance: ComplianceType| {
            evaluations
                .iter()
                .filter(|evaluation| evaluation.compliance_type == compliance)
                .count()
        };
        RuleOutput {
            rule: rule.to_owned(),
            evaluated: evaluations.len(),
            compliant: count(ComplianceType::Compliant),
            non_compliant: count(ComplianceType::NonCompliant),
        }
    }
}

/// Sets up logging and the SDK clients, then serves invocations with the
/// rule returned by `build_rule`.
pub async fn run<F>(build_rule: F) -> Result<(), Error>
where
    F: FnOnce(&Settings, Arc<dyn FunctionInspector>) -> Box<dyn ConfigRule>,
{
    let settings = Settings::from_env();
    SimpleLogger::new().with_level(settings.log_level).init()?;
    info!(
        "Starting in region {} on {}",
        settings.region, settings.execution_env
    );

    // No extra configuration is needed as long as the function's role has
    // the config:ListDiscoveredResources, config:PutEvaluations and lambda
    // read permissions attached.
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let config_client = Arc::new(AwsConfigClient::new(&sdk_config));
    let lambda_client = Arc::new(AwsLambdaClient::new(&sdk_config));

    let handler = ConfigRuleHandler::new(
        build_rule(&settings, lambda_client),
        config_client.clone(),
        config_client,
    );
    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ConfigEvent>| async move {
        call_config_rule(handler, event).await
    }))
    .await
}

pub async fn call_config_rule(
    handler: &ConfigRuleHandler,
    event: LambdaEvent<ConfigEvent>,
) -> Result<RuleOutput, Error> {
    let rule = handler.rule().name().to_owned();
    info!(
        "Request {} for rule {}",
        event.context.request_id,
        event
            .payload
            .config_rule_name
            .as_deref()
            .unwrap_or(rule.as_str())
    );

    let evaluations = handler.handle(&event.payload).await.map_err(|err| {
        // In case of failure, log a detailed error to CloudWatch.
        error!("{} failed with error: {}", rule, err);
        err
    })?;

    Ok(RuleOutput::new(&rule, &evaluations))
}
