// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Collaborators the rules talk to. The AWS SDK backed implementations live
//! in [`crate::aws`].

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result};
use crate::evaluation::Evaluation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
}

impl ResourceIdentifier {
    /// Name used to address the function, falling back to its id.
    pub fn function_name(&self) -> Option<&str> {
        self.resource_name
            .as_deref()
            .or(self.resource_id.as_deref())
    }
}

/// One page of a discovered-resources listing. `resource_identifiers` is
/// `None` when the service returned no list at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePage {
    pub resource_identifiers: Option<Vec<ResourceIdentifier>>,
    pub next_token: Option<String>,
}

#[async_trait]
pub trait ResourceEnumerator: Send + Sync {
    async fn list(&self, resource_type: &str, next_token: Option<&str>) -> Result<ResourcePage>;
}

/// Follows `next_token` until the listing is exhausted.
pub async fn list_all_resources(
    enumerator: &dyn ResourceEnumerator,
    resource_type: &str,
) -> Result<Vec<ResourceIdentifier>> {
    let mut resources: Option<Vec<ResourceIdentifier>> = None;
    let mut next_token: Option<String> = None;
    let mut page_count = 0;

    loop {
        let page = enumerator.list(resource_type, next_token.as_deref()).await?;
        page_count += 1;
        if let Some(identifiers) = page.resource_identifiers {
            resources.get_or_insert_with(Vec::new).extend(identifiers);
        }
        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    let resources = resources.ok_or_else(|| Error::NoResourcesFound(resource_type.to_owned()))?;
    debug!(
        "Found {} {} resources across {} page(s)",
        resources.len(),
        resource_type,
        page_count
    );
    Ok(resources)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionConfiguration {
    pub runtime: Option<String>,
    pub layer_arns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionedConcurrencyConfig {
    pub function_arn: Option<String>,
    pub requested_concurrent_executions: Option<i32>,
    pub status: Option<String>,
}

impl ProvisionedConcurrencyConfig {
    /// Version or alias the configuration is attached to, i.e. the last
    /// segment of the qualified function ARN.
    pub fn qualifier(&self) -> &str {
        self.function_arn
            .as_deref()
            .and_then(|arn| arn.rsplit(':').next())
            .unwrap_or("1")
    }
}

#[async_trait]
pub trait FunctionInspector: Send + Sync {
    async fn function_configuration(&self, function_name: &str) -> Result<FunctionConfiguration>;

    async fn provisioned_concurrency_configs(
        &self,
        function_name: &str,
    ) -> Result<Vec<ProvisionedConcurrencyConfig>>;

    async fn delete_provisioned_concurrency_config(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<()>;
}

#[async_trait]
pub trait ResultReporter: Send + Sync {
    async fn report(&self, evaluations: &[Evaluation], result_token: &str) -> Result<()>;
}
