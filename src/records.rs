//! Import kinds and the normalized record shapes the adapters produce.
//!
//! The four kinds share one submission pipeline; everything downstream of the
//! adapters treats a batch as an opaque JSON array ([`RecordBatch`]) and only
//! the adapter layer knows the concrete record types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four data types the platform accepts, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Department,
    CostCenter,
    Employee,
    Absence,
}

impl ImportKind {
    /// Fixed processing order: departments first, absences last.
    pub const ALL: [ImportKind; 4] = [
        ImportKind::Department,
        ImportKind::CostCenter,
        ImportKind::Employee,
        ImportKind::Absence,
    ];
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Department => write!(f, "departments"),
            ImportKind::CostCenter => write!(f, "cost centers"),
            ImportKind::Employee => write!(f, "employees"),
            ImportKind::Absence => write!(f, "absences"),
        }
    }
}

/// A batch already erased to its wire form: a JSON array of records.
pub type RecordBatch = serde_json::Value;

/// Serializes a typed batch into its opaque wire form.
pub fn to_batch<T: Serialize>(records: &[T]) -> serde_json::Result<RecordBatch> {
    serde_json::to_value(records)
}

/// An organizational unit. `names` is keyed by language code; a BTreeMap
/// keeps dry-run dumps stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub external_id: String,
    pub names: BTreeMap<String, String>,
}

/// A cost center. Same shape as a department; sources commonly return none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCenter {
    pub external_id: String,
    pub names: BTreeMap<String, String>,
}

/// One span of an employee's department or supervisor history.
/// An open span has no `endDate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySpan {
    pub external_id: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One employment record. Dates are `YYYY-MM-DD` strings, passed through to
/// the wire without local interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    pub call_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_phone_number: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departments: Vec<HistorySpan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supervisors: Vec<HistorySpan>,
}

/// One absence period reported by an hour-tracking source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    pub external_id: String,
    pub start_date: String,
    pub end_date: String,
}
