//! Generic construction of import mutations.
//!
//! The four import operations differ only in three wire identifiers, so a
//! single mutation template covers all of them. The identifiers follow one
//! naming convention (operation `import<Plural>`, variable = lowercase
//! plural, element type `<Singular>Input`), pinned in an explicit table so
//! each derived name stays a valid wire identifier.

use serde_json::Value;

use crate::records::{ImportKind, RecordBatch};

/// The wire identifiers one import kind resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindNames {
    /// Mutation name; also the `data` field holding the job handle.
    pub operation: &'static str,
    /// Name of the batch variable.
    pub variable: &'static str,
    /// Declared element type of the batch variable.
    pub element_type: &'static str,
}

/// Resolves an import kind to its wire identifiers.
pub const fn names(kind: ImportKind) -> KindNames {
    match kind {
        ImportKind::Department => KindNames {
            operation: "importDepartments",
            variable: "departments",
            element_type: "DepartmentInput",
        },
        ImportKind::CostCenter => KindNames {
            operation: "importCostCenters",
            variable: "costCenters",
            element_type: "CostCenterInput",
        },
        ImportKind::Employee => KindNames {
            operation: "importEmployees",
            variable: "employees",
            element_type: "EmployeeInput",
        },
        ImportKind::Absence => KindNames {
            operation: "importAbsences",
            variable: "absences",
            element_type: "AbsenceInput",
        },
    }
}

/// A transport-agnostic request: operation text plus variable bindings.
/// Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDocument {
    /// Which `data` field carries the response payload.
    pub operation: &'static str,
    pub query: String,
    pub variables: Value,
}

/// Instantiates the shared mutation template for one kind and batch.
/// Pure: identical inputs produce byte-identical documents.
pub fn build(kind: ImportKind, organization_id: &str, batch: &RecordBatch) -> RequestDocument {
    let KindNames {
        operation,
        variable,
        element_type,
    } = names(kind);

    let query = format!(
        "mutation {operation}(
    $organizationExternalId: ID!
    ${variable}: [{element_type}!]!
) {{
    {operation}(
        organizationExternalId: $organizationExternalId
        {variable}: ${variable}
    ) {{
        messageId
    }}
}}"
    );

    let mut bindings = serde_json::Map::new();
    bindings.insert(
        "organizationExternalId".to_string(),
        Value::String(organization_id.to_string()),
    );
    bindings.insert(variable.to_string(), batch.clone());

    RequestDocument {
        operation,
        query,
        variables: Value::Object(bindings),
    }
}
