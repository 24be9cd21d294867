use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of rows that make up a report-detail view.
///
/// Consumers index rows by position, so both the discriminants and the
/// order of [`ReportField::ALL`] are part of the contract: codes are the
/// contiguous range 0..=8 in declared order and never change for the
/// lifetime of the process. Being a fieldless enum, the table cannot be
/// extended or reassigned at runtime; the only possible misuse left is
/// looking up an unknown name or code, which fails with
/// [`ReportFieldError`].
#[derive(Copy, Clone, Deserialize, Debug, Serialize, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ReportField {
    #[serde(rename = "SEVERITY_LEVEL")]
    SeverityLevel = 0,
    #[serde(rename = "DETECTION_STATUS")]
    DetectionStatus = 1,
    #[serde(rename = "REPORT")]
    Report = 2,
    #[serde(rename = "REPORT_STEPS")]
    ReportSteps = 3,
    #[serde(rename = "BUG")]
    Bug = 4,
    #[serde(rename = "MACRO_EXPANSION")]
    MacroExpansion = 5,
    #[serde(rename = "MACRO_EXPANSION_ITEM")]
    MacroExpansionItem = 6,
    #[serde(rename = "NOTE")]
    Note = 7,
    #[serde(rename = "NOTE_ITEM")]
    NoteItem = 8,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ReportFieldError {
    #[error("unknown report field name `{0}`")]
    UnknownName(String),
    #[error("report field code out of range: {0}")]
    UnknownCode(u8),
}

impl ReportField {
    /// Every field, in code order.
    pub const ALL: [ReportField; 9] = [
        ReportField::SeverityLevel,
        ReportField::DetectionStatus,
        ReportField::Report,
        ReportField::ReportSteps,
        ReportField::Bug,
        ReportField::MacroExpansion,
        ReportField::MacroExpansionItem,
        ReportField::Note,
        ReportField::NoteItem,
    ];

    /// The fixed integer code of this field.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The canonical name of this field.
    pub fn name(self) -> &'static str {
        match self {
            Self::SeverityLevel => "SEVERITY_LEVEL",
            Self::DetectionStatus => "DETECTION_STATUS",
            Self::Report => "REPORT",
            Self::ReportSteps => "REPORT_STEPS",
            Self::Bug => "BUG",
            Self::MacroExpansion => "MACRO_EXPANSION",
            Self::MacroExpansionItem => "MACRO_EXPANSION_ITEM",
            Self::Note => "NOTE",
            Self::NoteItem => "NOTE_ITEM",
        }
    }
}

impl TryFrom<&str> for ReportField {
    type Error = ReportFieldError;

    fn try_from(s: &str) -> Result<Self, ReportFieldError> {
        match s.to_uppercase().as_str() {
            "SEVERITY_LEVEL" => Ok(ReportField::SeverityLevel),
            "DETECTION_STATUS" => Ok(ReportField::DetectionStatus),
            "REPORT" => Ok(ReportField::Report),
            "REPORT_STEPS" => Ok(ReportField::ReportSteps),
            "BUG" => Ok(ReportField::Bug),
            "MACRO_EXPANSION" => Ok(ReportField::MacroExpansion),
            "MACRO_EXPANSION_ITEM" => Ok(ReportField::MacroExpansionItem),
            "NOTE" => Ok(ReportField::Note),
            "NOTE_ITEM" => Ok(ReportField::NoteItem),
            _ => Err(ReportFieldError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for ReportField {
    type Error = ReportFieldError;

    fn try_from(code: u8) -> Result<Self, ReportFieldError> {
        ReportField::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or(ReportFieldError::UnknownCode(code))
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::SeverityLevel => write!(f, "severity_level"),
            Self::DetectionStatus => write!(f, "detection_status"),
            Self::Report => write!(f, "report"),
            Self::ReportSteps => write!(f, "report_steps"),
            Self::Bug => write!(f, "bug"),
            Self::MacroExpansion => write!(f, "macro_expansion"),
            Self::MacroExpansionItem => write!(f, "macro_expansion_item"),
            Self::Note => write!(f, "note"),
            Self::NoteItem => write!(f, "note_item"),
        }
    }
}
