// Unless explicitly stated otherwise all files in this repository are licensed under the Apache License, Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2024 Datadog, Inc.

use anyhow::Result;
use report_model::model::message::Message;
use std::path::Path;

/// A parser for one analyzer output format.
pub trait OutputParser {
    /// Parse the given analyzer result file and return the diagnostics
    /// found in it.
    fn parse_file(&mut self, analyzer_result: &Path) -> Result<Vec<Message>>;
}
