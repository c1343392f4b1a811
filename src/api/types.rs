//! Tipos de dados do envelope GraphQL e dos registros de status da API de RH.
//!
//! Todas as structs derivam `Serialize`/`Deserialize` para conversão JSON
//! conforme o formato esperado pelo endpoint `/hr` da plataforma.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador opaco de correlação de um lote submetido. Emitido pela
/// plataforma, nunca construído localmente.
pub type JobHandle = String;

/// Envelope de requisição: texto da operação + bindings de variáveis.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: serde_json::Value,
}

/// Envelope de resposta: `data` em caso de sucesso, ou uma lista `errors`
/// quando a operação foi rejeitada pelo lado remoto.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// Uma entrada da lista `errors`, com as posições de origem no documento.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<ErrorLocation>,
}

/// Posição linha/coluna de um erro dentro do documento enviado.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Estado de processamento de um lote, conforme reportado pela plataforma.
///
/// `Unknown` e `InProgress` são transitórios; `Failure` e `Done` são
/// terminais e absorventes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Unknown,
    InProgress,
    Failure,
    Done,
}

impl ImportStatus {
    /// O polling encerra quando todos os lotes atingem um estado terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, ImportStatus::Failure | ImportStatus::Done)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::Unknown => write!(f, "UNKNOWN"),
            ImportStatus::InProgress => write!(f, "IN_PROGRESS"),
            ImportStatus::Failure => write!(f, "FAILURE"),
            ImportStatus::Done => write!(f, "DONE"),
        }
    }
}

/// Status de processamento de uma submissão, obtido via polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub message_id: JobHandle,
    pub import_type: String,
    pub import_status: ImportStatus,
    pub timestamp: String,
    /// Presente quando `import_status` é `Failure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Problemas não fatais, um por registro afetado.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Aviso não fatal apontando o registro externo que o causou.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub warning: String,
    pub external_id: String,
}
