// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod deprecated_runtimes;
pub mod desired_layers;
pub mod provisioned_concurrency;

pub use deprecated_runtimes::NoDeprecatedRuntimes;
pub use desired_layers::DesiredLayerVersion;
pub use provisioned_concurrency::NoProvisionedConcurrency;

use async_trait::async_trait;
use log::{debug, warn};

use crate::clients::ResourceIdentifier;
use crate::errors::{Error, Result};
use crate::evaluation::Evaluation;
use crate::events::{ConfigurationItem, PeriodicEvent, LAMBDA_FUNCTION};
use crate::parameters::RuleParameters;

/// A custom AWS Config rule.
#[async_trait]
pub trait ConfigRule: Send + Sync {
    fn name(&self) -> &str;

    /// The only resource type this rule evaluates.
    fn resource_type(&self) -> &str {
        LAMBDA_FUNCTION
    }

    /// Change notifications are validated but produce no verdicts.
    async fn evaluate_change(
        &self,
        item: &ConfigurationItem,
        _parameters: &RuleParameters,
    ) -> Result<Vec<Evaluation>> {
        ensure_resource_type(self.resource_type(), item)?;
        Ok(vec![])
    }

    async fn evaluate_periodic(
        &self,
        event: &PeriodicEvent,
        parameters: &RuleParameters,
        resources: &[ResourceIdentifier],
    ) -> Result<Vec<Evaluation>>;
}

pub fn ensure_resource_type(expected: &str, item: &ConfigurationItem) -> Result<()> {
    if item.resource_type != expected {
        return Err(Error::InvalidResourceType {
            expected: expected.to_owned(),
            actual: item.resource_type.clone(),
        });
    }
    Ok(())
}

/// `(resource id, function name)` for every resource with a non-empty id.
pub(crate) fn evaluable_resources<'r>(
    resources: &'r [ResourceIdentifier],
) -> impl Iterator<Item = (&'r str, &'r str)> + Send + 'r {
    resources.iter().filter_map(|resource| {
        let id = resource.resource_id.as_deref().filter(|id| !id.is_empty());
        match (id, resource.function_name()) {
            (Some(id), Some(name)) => Some((id, name)),
            _ => {
                debug!("Skipping resource without id {:?}", resource.resource_name);
                None
            }
        }
    })
}

/// A failed lookup skips the resource instead of failing the batch.
pub(crate) fn skip_on_failure<T>(function_name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Skipping {}: {}", function_name, err);
            None
        }
    }
}
