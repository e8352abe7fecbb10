// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use config_rules::rules::DesiredLayerVersion;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    config_rules_lambda::run(|_settings, inspector| Box::new(DesiredLayerVersion::new(inspector)))
        .await
}
