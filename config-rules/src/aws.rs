// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! AWS SDK implementations of the rule collaborators.

use async_trait::async_trait;
use aws_sdk_config::error::DisplayErrorContext;
use aws_sdk_config::primitives::DateTime;
use aws_sdk_config::types::{
    ComplianceType as SdkComplianceType, Evaluation as SdkEvaluation, ResourceType,
};
use aws_types::SdkConfig;
use log::{error, info};

use crate::clients::{
    FunctionConfiguration, FunctionInspector, ProvisionedConcurrencyConfig, ResourceEnumerator,
    ResourceIdentifier, ResourcePage, ResultReporter,
};
use crate::errors::{Error, Result};
use crate::evaluation::{ComplianceType, Evaluation};

/// `PutEvaluations` accepts at most this many evaluations per request.
pub const MAX_EVALUATIONS_PER_REQUEST: usize = 100;

#[derive(Debug, Clone)]
pub struct AwsConfigClient {
    client: aws_sdk_config::Client,
}

impl AwsConfigClient {
    pub fn new(config: &SdkConfig) -> Self {
        AwsConfigClient {
            client: aws_sdk_config::Client::new(config),
        }
    }
}

fn to_sdk_compliance(compliance: ComplianceType) -> SdkComplianceType {
    match compliance {
        ComplianceType::Compliant => SdkComplianceType::Compliant,
        ComplianceType::NonCompliant => SdkComplianceType::NonCompliant,
        ComplianceType::NotApplicable => SdkComplianceType::NotApplicable,
    }
}

fn to_sdk_evaluation(evaluation: &Evaluation) -> Result<SdkEvaluation> {
    SdkEvaluation::builder()
        .compliance_resource_type(&evaluation.resource_type)
        .compliance_resource_id(&evaluation.resource_id)
        .compliance_type(to_sdk_compliance(evaluation.compliance_type))
        .ordering_timestamp(DateTime::from_millis(
            evaluation.ordering_timestamp.timestamp_millis(),
        ))
        .set_annotation(evaluation.annotation.clone())
        .build()
        .map_err(|err| {
            Error::InvalidEvaluation(format!("{}: {}", evaluation.resource_id, err))
        })
}

/// Splits evaluations into request sized batches. No evaluations still makes
/// one (empty) batch so the invocation is always reported.
pub fn evaluation_batches(evaluations: Vec<SdkEvaluation>) -> Vec<Vec<SdkEvaluation>> {
    if evaluations.is_empty() {
        return vec![vec![]];
    }
    evaluations
        .chunks(MAX_EVALUATIONS_PER_REQUEST)
        .map(<[SdkEvaluation]>::to_vec)
        .collect()
}

#[async_trait]
impl ResourceEnumerator for AwsConfigClient {
    async fn list(&self, resource_type: &str, next_token: Option<&str>) -> Result<ResourcePage> {
        let output = self
            .client
            .list_discovered_resources()
            .resource_type(ResourceType::from(resource_type))
            .set_next_token(next_token.map(str::to_owned))
            .send()
            .await
            .map_err(|err| Error::Enumeration(DisplayErrorContext(err).to_string()))?;

        let resource_identifiers = output.resource_identifiers.map(|identifiers| {
            identifiers
                .into_iter()
                .map(|identifier| ResourceIdentifier {
                    resource_id: identifier.resource_id,
                    resource_name: identifier.resource_name,
                    resource_type: identifier
                        .resource_type
                        .map(|resource_type| resource_type.as_str().to_owned()),
                })
                .collect()
        });

        Ok(ResourcePage {
            resource_identifiers,
            next_token: output.next_token,
        })
    }
}

#[async_trait]
impl ResultReporter for AwsConfigClient {
    async fn report(&self, evaluations: &[Evaluation], result_token: &str) -> Result<()> {
        let evaluations = evaluations
            .iter()
            .map(to_sdk_evaluation)
            .collect::<Result<Vec<_>>>()?;

        for batch in evaluation_batches(evaluations) {
            let size = batch.len();
            let output = self
                .client
                .put_evaluations()
                .set_evaluations(Some(batch))
                .result_token(result_token)
                .send()
                .await
                .map_err(|err| {
                    let message = DisplayErrorContext(err).to_string();
                    error!("failed to put evaluations with error: {}", &message);
                    Error::Report(message)
                })?;

            for failed in output.failed_evaluations.unwrap_or_default() {
                error!(
                    "AWS Config rejected the evaluation for {}",
                    failed.compliance_resource_id()
                );
            }
            info!("Reported {} evaluation(s)", size);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AwsLambdaClient {
    client: aws_sdk_lambda::Client,
}

impl AwsLambdaClient {
    pub fn new(config: &SdkConfig) -> Self {
        AwsLambdaClient {
            client: aws_sdk_lambda::Client::new(config),
        }
    }
}

fn inspection_error(function_name: &str, message: String) -> Error {
    Error::Inspection {
        resource: function_name.to_owned(),
        message,
    }
}

#[async_trait]
impl FunctionInspector for AwsLambdaClient {
    async fn function_configuration(&self, function_name: &str) -> Result<FunctionConfiguration> {
        let output = self
            .client
            .get_function_configuration()
            .function_name(function_name)
            .send()
            .await
            .map_err(|err| {
                inspection_error(
                    function_name,
                    aws_sdk_lambda::error::DisplayErrorContext(err).to_string(),
                )
            })?;

        Ok(FunctionConfiguration {
            runtime: output.runtime.map(|runtime| runtime.as_str().to_owned()),
            layer_arns: output
                .layers
                .unwrap_or_default()
                .into_iter()
                .filter_map(|layer| layer.arn)
                .collect(),
        })
    }

    async fn provisioned_concurrency_configs(
        &self,
        function_name: &str,
    ) -> Result<Vec<ProvisionedConcurrencyConfig>> {
        let mut configs = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .client
                .list_provisioned_concurrency_configs()
                .function_name(function_name)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|err| {
                    inspection_error(
                        function_name,
                        aws_sdk_lambda::error::DisplayErrorContext(err).to_string(),
                    )
                })?;

            configs.extend(
                output
                    .provisioned_concurrency_configs
                    .unwrap_or_default()
                    .into_iter()
                    .map(|config| ProvisionedConcurrencyConfig {
                        function_arn: config.function_arn,
                        requested_concurrent_executions: config
                            .requested_provisioned_concurrent_executions,
                        status: config.status.map(|status| status.as_str().to_owned()),
                    }),
            );

            match output.next_marker {
                Some(next) if !next.is_empty() => marker = Some(next),
                _ => break,
            }
        }
        Ok(configs)
    }

    async fn delete_provisioned_concurrency_config(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<()> {
        self.client
            .delete_provisioned_concurrency_config()
            .function_name(function_name)
            .qualifier(qualifier)
            .send()
            .await
            .map_err(|err| Error::Remediation {
                resource: format!("{function_name}:{qualifier}"),
                message: aws_sdk_lambda::error::DisplayErrorContext(err).to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn evaluations(count: usize) -> Vec<SdkEvaluation> {
        (0..count)
            .map(|i| {
                to_sdk_evaluation(&Evaluation::new(
                    "AWS::Lambda::Function",
                    &format!("function-{i}"),
                    ComplianceType::Compliant,
                    Utc::now(),
                ))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_evaluations_still_make_one_request() {
        let batches = evaluation_batches(vec![]);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].is_empty());
    }

    #[test]
    fn evaluations_are_batched_by_request_limit() {
        let batches = evaluation_batches(evaluations(250));
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(batches[2][0].compliance_resource_id(), "function-200");
    }

    #[test]
    fn sdk_evaluation_keeps_annotation() {
        let evaluation = Evaluation::new(
            "AWS::Lambda::Function",
            "orders",
            ComplianceType::NonCompliant,
            Utc::now(),
        )
        .with_annotation("Runtime nodejs10.x is deprecated");
        let sdk = to_sdk_evaluation(&evaluation).unwrap();
        assert_eq!(sdk.compliance_type(), &SdkComplianceType::NonCompliant);
        assert_eq!(sdk.annotation(), Some("Runtime nodejs10.x is deprecated"));
    }
}
