// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use config_rules::rules::NoProvisionedConcurrency;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    config_rules_lambda::run(|settings, inspector| {
        Box::new(NoProvisionedConcurrency::new(inspector, settings.remediate))
    })
    .await
}
