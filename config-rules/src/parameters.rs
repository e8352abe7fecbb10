// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::errors::Result;

/// Key/value parameters configured on the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleParameters(HashMap<String, String>);

impl RuleParameters {
    /// Parses the `ruleParameters` string of the envelope. Blank input is an
    /// empty map; non-string values keep their JSON text; nulls are dropped.
    pub fn from_json(content: &str) -> Result<RuleParameters> {
        if content.trim().is_empty() {
            return Ok(RuleParameters::default());
        }

        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let parameters = map
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((name, s)),
                other => Some((name, other.to_string())),
            })
            .collect();
        Ok(RuleParameters(parameters))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn value(&self, name: &str) -> Option<ParameterValue> {
        self.get(name).map(ParameterValue::parse)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleParameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RuleParameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A parameter value is a list when it contains a comma, otherwise a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParameterValue {
    pub fn parse(raw: &str) -> ParameterValue {
        if raw.contains(',') {
            ParameterValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )
        } else {
            ParameterValue::Scalar(raw.trim().to_owned())
        }
    }

    pub fn items(&self) -> Vec<&str> {
        match self {
            ParameterValue::Scalar(item) => vec![item.as_str()],
            ParameterValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("L1", ParameterValue::Scalar("L1".to_string()))]
    #[case("  L1 ", ParameterValue::Scalar("L1".to_string()))]
    #[case("L1,L2", ParameterValue::List(vec!["L1".to_string(), "L2".to_string()]))]
    #[case("L1, L2,   L3", ParameterValue::List(vec!["L1".to_string(), "L2".to_string(), "L3".to_string()]))]
    #[case("L1,", ParameterValue::List(vec!["L1".to_string()]))]
    fn parse_parameter_value(#[case] raw: &str, #[case] expected: ParameterValue) {
        assert_eq!(ParameterValue::parse(raw), expected);
    }

    #[test]
    fn blank_parameters_are_empty() -> Result<()> {
        assert_eq!(RuleParameters::from_json("")?, RuleParameters::default());
        assert_eq!(RuleParameters::from_json("  ")?, RuleParameters::default());
        assert_eq!(RuleParameters::from_json("{}")?, RuleParameters::default());
        Ok(())
    }

    #[test]
    fn non_string_values_keep_their_json_text() -> Result<()> {
        let parameters = RuleParameters::from_json(
            r#"{"otherDeprecatedRuntimes":"python2.6","maxCount":3,"unset":null}"#,
        )?;
        assert_eq!(parameters.get("otherDeprecatedRuntimes"), Some("python2.6"));
        assert_eq!(parameters.get("maxCount"), Some("3"));
        assert_eq!(parameters.get("unset"), None);
        Ok(())
    }

    #[test]
    fn parameters_must_be_an_object() {
        assert!(RuleParameters::from_json("[\"a\"]").is_err());
    }
}
