// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use config_rules::clients::{
    FunctionConfiguration, FunctionInspector, ProvisionedConcurrencyConfig, ResourceEnumerator,
    ResourceIdentifier, ResourcePage, ResultReporter,
};
use config_rules::{ConfigEvent, Error, Evaluation, Result, LAMBDA_FUNCTION};

pub fn read_from_resource_file(path: &str) -> String {
    let mut resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    resource.push(path);
    let mut content = String::new();
    let mut reader = BufReader::new(File::open(resource.as_path()).unwrap());
    reader.read_to_string(&mut content).unwrap();

    content
}

pub fn config_event(invoking_event: &str, rule_parameters: &str) -> ConfigEvent {
    ConfigEvent {
        invoking_event: invoking_event.to_string(),
        rule_parameters: Some(rule_parameters.to_string()),
        result_token: "myResultToken".to_string(),
        event_left_scope: false,
        execution_role_arn: None,
        config_rule_arn: None,
        config_rule_name: Some("test-rule".to_string()),
        config_rule_id: None,
        account_id: Some("123456789012".to_string()),
        version: Some("1.0".to_string()),
    }
}

pub fn function(id: &str) -> ResourceIdentifier {
    ResourceIdentifier {
        resource_id: Some(id.to_string()),
        resource_name: Some(id.to_string()),
        resource_type: Some(LAMBDA_FUNCTION.to_string()),
    }
}

pub fn function_without_id(name: &str) -> ResourceIdentifier {
    ResourceIdentifier {
        resource_id: None,
        resource_name: Some(name.to_string()),
        resource_type: Some(LAMBDA_FUNCTION.to_string()),
    }
}

pub fn resource_ids(evaluations: &[Evaluation]) -> Vec<&str> {
    evaluations.iter().map(|e| e.resource_id.as_str()).collect()
}

/// Serves `pages` in order, addressed by `page-N` tokens.
#[derive(Default)]
pub struct FakeEnumerator {
    pages: Vec<ResourcePage>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeEnumerator {
    pub fn with_resources(resources: Vec<ResourceIdentifier>) -> Self {
        Self::with_pages(vec![resources])
    }

    pub fn with_pages(pages: Vec<Vec<ResourceIdentifier>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, resources)| ResourcePage {
                resource_identifiers: Some(resources),
                next_token: if index + 1 < count {
                    Some(format!("page-{}", index + 1))
                } else {
                    None
                },
            })
            .collect();
        FakeEnumerator {
            pages,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn without_resource_list() -> Self {
        FakeEnumerator {
            pages: vec![ResourcePage::default()],
            calls: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ResourceEnumerator for FakeEnumerator {
    async fn list(&self, resource_type: &str, next_token: Option<&str>) -> Result<ResourcePage> {
        self.calls
            .lock()
            .unwrap()
            .push((resource_type.to_string(), next_token.map(str::to_string)));
        let index = match next_token {
            None => 0,
            Some(token) => token
                .trim_start_matches("page-")
                .parse::<usize>()
                .map_err(|e| Error::Enumeration(e.to_string()))?,
        };
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Enumeration(format!("no page {index}")))
    }
}

#[derive(Default)]
pub struct FakeInspector {
    configurations: HashMap<String, FunctionConfiguration>,
    concurrency: HashMap<String, Vec<ProvisionedConcurrencyConfig>>,
    failing_lookups: HashSet<String>,
    failing_deletes: HashSet<String>,
    pub deleted: Mutex<Vec<(String, String)>>,
}

impl FakeInspector {
    pub fn with_layers(mut self, function_name: &str, layers: &[&str]) -> Self {
        let configuration = self
            .configurations
            .entry(function_name.to_string())
            .or_default();
        configuration.layer_arns = layers.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_runtime(mut self, function_name: &str, runtime: Option<&str>) -> Self {
        let configuration = self
            .configurations
            .entry(function_name.to_string())
            .or_default();
        configuration.runtime = runtime.map(str::to_string);
        self
    }

    pub fn with_provisioned_concurrency(mut self, function_name: &str, qualifiers: &[&str]) -> Self {
        let configs = qualifiers
            .iter()
            .map(|qualifier| ProvisionedConcurrencyConfig {
                function_arn: Some(format!(
                    "arn:aws:lambda:us-east-1:123456789012:function:{function_name}:{qualifier}"
                )),
                requested_concurrent_executions: Some(5),
                status: Some("READY".to_string()),
            })
            .collect();
        self.concurrency.insert(function_name.to_string(), configs);
        self
    }

    pub fn failing_lookup(mut self, function_name: &str) -> Self {
        self.failing_lookups.insert(function_name.to_string());
        self
    }

    pub fn failing_delete(mut self, function_name: &str) -> Self {
        self.failing_deletes.insert(function_name.to_string());
        self
    }

    pub fn deletions(&self) -> Vec<(String, String)> {
        self.deleted.lock().unwrap().clone()
    }

    fn check_lookup(&self, function_name: &str) -> Result<()> {
        if self.failing_lookups.contains(function_name) {
            return Err(Error::Inspection {
                resource: function_name.to_string(),
                message: "ResourceNotFoundException".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FunctionInspector for FakeInspector {
    async fn function_configuration(&self, function_name: &str) -> Result<FunctionConfiguration> {
        self.check_lookup(function_name)?;
        Ok(self
            .configurations
            .get(function_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn provisioned_concurrency_configs(
        &self,
        function_name: &str,
    ) -> Result<Vec<ProvisionedConcurrencyConfig>> {
        self.check_lookup(function_name)?;
        Ok(self
            .concurrency
            .get(function_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_provisioned_concurrency_config(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<()> {
        if self.failing_deletes.contains(function_name) {
            return Err(Error::Remediation {
                resource: format!("{function_name}:{qualifier}"),
                message: "AccessDeniedException".to_string(),
            });
        }
        self.deleted
            .lock()
            .unwrap()
            .push((function_name.to_string(), qualifier.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub reports: Mutex<Vec<(Vec<Evaluation>, String)>>,
    pub fail: bool,
}

impl RecordingReporter {
    pub fn failing() -> Self {
        RecordingReporter {
            reports: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn reports(&self) -> Vec<(Vec<Evaluation>, String)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultReporter for RecordingReporter {
    async fn report(&self, evaluations: &[Evaluation], result_token: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Report("ThrottlingException".to_string()));
        }
        self.reports
            .lock()
            .unwrap()
            .push((evaluations.to_vec(), result_token.to_string()));
        Ok(())
    }
}
