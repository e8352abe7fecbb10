// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Formatter;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Longest annotation AWS Config accepts on an evaluation.
pub const MAX_ANNOTATION_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceType {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "NON_COMPLIANT")]
    NonCompliant,
    #[serde(rename = "NOT_APPLICABLE")]
    NotApplicable,
}

impl std::fmt::Display for ComplianceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceType::Compliant => f.write_str("COMPLIANT")?,
            ComplianceType::NonCompliant => f.write_str("NON_COMPLIANT")?,
            ComplianceType::NotApplicable => f.write_str("NOT_APPLICABLE")?,
        }
        Ok(())
    }
}

/// The verdict for a single resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    #[serde(rename = "ComplianceResourceType")]
    pub resource_type: String,
    #[serde(rename = "ComplianceResourceId")]
    pub resource_id: String,
    #[serde(rename = "ComplianceType")]
    pub compliance_type: ComplianceType,
    #[serde(rename = "OrderingTimestamp")]
    pub ordering_timestamp: DateTime<Utc>,
    #[serde(rename = "Annotation", skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Evaluation {
    pub fn new(
        resource_type: &str,
        resource_id: &str,
        compliance_type: ComplianceType,
        ordering_timestamp: DateTime<Utc>,
    ) -> Evaluation {
        Evaluation {
            resource_type: resource_type.to_owned(),
            resource_id: resource_id.to_owned(),
            compliance_type,
            ordering_timestamp,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Evaluation {
        let annotation = annotation.into();
        let annotation = if annotation.chars().count() > MAX_ANNOTATION_LEN {
            annotation.chars().take(MAX_ANNOTATION_LEN).collect()
        } else {
            annotation
        };
        self.annotation = Some(annotation);
        self
    }
}
