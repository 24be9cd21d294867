// Unless explicitly stated otherwise all files in this repository are licensed under the Apache License, Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2024 Datadog, Inc.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One step of a diagnostic, anchored at a source position.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq, Builder)]
pub struct Event {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path.display(),
            self.line,
            self.column,
            self.message
        )
    }
}

/// One diagnostic produced by an analyzer, with its optional steps,
/// notes, macro expansions and fixits.
///
/// SpotBugs never emits macro expansions; the field exists because the
/// report-detail view has rows for them.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq, Builder)]
pub struct Message {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    pub message: String,
    /// The checker (bug pattern, rule) that produced the diagnostic.
    pub checker: String,
    #[serde(default)]
    #[builder(default)]
    pub report_hash: Option<String>,
    #[serde(default)]
    #[builder(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    #[builder(default)]
    pub notes: Vec<Event>,
    #[serde(default)]
    #[builder(default)]
    pub macro_expansions: Vec<Event>,
    #[serde(default)]
    #[builder(default)]
    pub fixits: Vec<Event>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}]",
            self.path.display(),
            self.line,
            self.column,
            self.message,
            self.checker
        )
    }
}
