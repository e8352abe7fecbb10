// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing incoming JSON context {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid resource type `{actual}`, this rule only evaluates `{expected}`")]
    InvalidResourceType { expected: String, actual: String },
    #[error("No {0} resources found")]
    NoResourcesFound(String),
    #[error("Could not list discovered resources. Error = `{0}`")]
    Enumeration(String),
    #[error("Could not retrieve properties of resource `{resource}`. Error = `{message}`")]
    Inspection { resource: String, message: String },
    #[error("Remediation failed for resource `{resource}`. Error = `{message}`")]
    Remediation { resource: String, message: String },
    #[error("Required rule parameter `{0}` is missing")]
    MissingParameter(String),
    #[error("Could not build evaluation for resource `{0}`")]
    InvalidEvaluation(String),
    #[error("Could not report evaluations to AWS Config. Error = `{0}`")]
    Report(String),
}

pub type Result<R> = std::result::Result<R, Error>;
