//! Configuração do hrsync carregada de `hrsync.toml`.
//!
//! O arquivo declara uma lista de conexões (tenants), cada uma com endpoint,
//! credenciais e a fonte de dados correspondente. A validação acontece antes
//! de qualquer atividade de rede; campo obrigatório ausente é erro fatal.

use std::path::Path;

use serde::Deserialize;

use crate::error::SyncError;
use crate::logger::Level;

/// Configuração de nível superior.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Continua com as demais conexões quando uma falha por causa restrita
    /// a ela (fonte de dados ou erro de aplicação). Desligado por padrão:
    /// a primeira falha encerra a execução.
    #[serde(default)]
    pub continue_on_error: bool,

    /// Parâmetros do loop de polling de status.
    #[serde(default)]
    pub poll: PollConfig,

    /// Conexões a sincronizar, processadas em sequência.
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// Cadência e orçamento do polling.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Intervalo entre rodadas, em milissegundos.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Número máximo de rodadas. Ausente, o polling segue até a plataforma
    /// responder um estado terminal para todos os lotes.
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

// Intervalo padrão entre rodadas: 1000ms.
fn default_interval_ms() -> u64 {
    1000
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_rounds: None,
        }
    }
}

/// Uma conexão: um tenant da plataforma e sua fonte de dados.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Nome da conexão, usado em logs e no filtro `--connection`.
    pub name: String,

    /// URL base do servidor da API (sem o sufixo do endpoint).
    pub api_server: String,

    pub client_id: String,
    pub client_secret: String,

    /// Identificador externo da organização na plataforma.
    pub organization_id: String,

    /// Arquivo de log próprio da conexão. Sem ele, só stdout.
    #[serde(default)]
    pub log_file: Option<String>,

    /// Severidade mínima persistida no arquivo ("debug" a "critical").
    #[serde(default)]
    pub log_level: Option<String>,

    /// Fonte dos registros desta conexão.
    pub source: SourceConfig,
}

/// Seleção da fonte de dados no arquivo de configuração.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    /// Dados de demonstração embutidos.
    Sample,
    /// Lotes lidos de arquivos JSON em um diretório.
    JsonFile { path: String },
}

impl SyncConfig {
    /// Carrega e valida a configuração do caminho fornecido.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: SyncConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejeita campos obrigatórios vazios apontando a conexão ofensora.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.connections.is_empty() {
            return Err(SyncError::Config("no connections configured".into()));
        }

        for connection in &self.connections {
            let name = if connection.name.is_empty() {
                "<unnamed>"
            } else {
                connection.name.as_str()
            };

            let required = [
                ("name", &connection.name),
                ("api_server", &connection.api_server),
                ("client_id", &connection.client_id),
                ("client_secret", &connection.client_secret),
                ("organization_id", &connection.organization_id),
            ];
            for (field, value) in required {
                if value.is_empty() {
                    return Err(SyncError::Config(format!(
                        "{field} missing in connection '{name}'"
                    )));
                }
            }

            if let Some(level) = &connection.log_level {
                if Level::parse(level).is_none() {
                    return Err(SyncError::Config(format!(
                        "unknown log_level '{level}' in connection '{name}'"
                    )));
                }
            }
        }

        Ok(())
    }
}
