//! Log de execução com escopo de conexão.
//!
//! O [`Logger`] é um valor explícito passado a cada componente; nada de
//! estado global mutável. Toda mensagem é ecoada no stdout (quem executa
//! manualmente quer ver tudo); eventos com severidade igual ou acima do
//! limiar também são anexados ao arquivo de log da conexão.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Severidade de um evento de log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Notice,
    Error,
    Critical,
}

impl Level {
    /// Interpreta o valor `log_level` da configuração.
    pub fn parse(value: &str) -> Option<Level> {
        match value.to_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "notice" => Some(Level::Notice),
            "error" => Some(Level::Error),
            "critical" => Some(Level::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Notice => write!(f, "NOTICE"),
            Level::Error => write!(f, "ERROR"),
            Level::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Gravador de log de uma conexão: destino e limiar próprios.
#[derive(Debug, Clone)]
pub struct Logger {
    file: Option<PathBuf>,
    threshold: Level,
}

impl Logger {
    pub fn new(file: Option<PathBuf>, threshold: Level) -> Self {
        Self { file, threshold }
    }

    /// Monta o logger a partir dos campos opcionais da conexão.
    /// Sem `log_level` configurado, o limiar é NOTICE.
    pub fn for_connection(log_file: Option<&str>, log_level: Option<&str>) -> Self {
        let threshold = log_level.and_then(Level::parse).unwrap_or(Level::Notice);
        Self::new(log_file.map(PathBuf::from), threshold)
    }

    /// Registra um evento: sempre no stdout, e no arquivo quando a
    /// severidade alcança o limiar.
    pub fn write(&self, level: Level, message: &str) {
        println!("{message}");

        if level >= self.threshold {
            if let Some(path) = &self.file {
                let stamp = Local::now().format("%d.%m.%Y %H:%M:%S");
                let line = format!("\n{stamp}: {:<8} {message}", level.to_string());
                let appended = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .and_then(|mut file| file.write_all(line.as_bytes()));
                if let Err(e) = appended {
                    eprintln!("failed to write log file {}: {e}", path.display());
                }
            }
        }
    }
}
