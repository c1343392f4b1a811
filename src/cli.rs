//! Interface de linha de comando do hrsync baseada em clap.
//!
//! Flags para suprimir cada tipo de importação individualmente, restringir a
//! execução a uma conexão nomeada e rodar em modo dry-run (somente leitura).

use std::path::PathBuf;

use clap::Parser;

use crate::records::ImportKind;

/// hrsync — importa dados de RH de sistemas externos para a plataforma remota.
#[derive(Debug, Parser)]
#[command(name = "hrsync", version, about)]
pub struct Cli {
    /// Não importa departamentos.
    #[arg(long)]
    pub skip_departments: bool,

    /// Não importa centros de custo.
    #[arg(long)]
    pub skip_cost_centers: bool,

    /// Não importa funcionários.
    #[arg(long)]
    pub skip_employees: bool,

    /// Não importa ausências.
    #[arg(long)]
    pub skip_absences: bool,

    /// Processa somente a conexão com este nome.
    #[arg(long)]
    pub connection: Option<String>,

    /// Apenas lê e exibe os dados; nenhuma chamada à API é feita.
    #[arg(long)]
    pub dry_run: bool,

    /// Caminho do arquivo de configuração.
    #[arg(long, default_value = "hrsync.toml")]
    pub config: PathBuf,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Tipos de importação habilitados, na ordem fixa de submissão.
    pub fn enabled_kinds(&self) -> Vec<ImportKind> {
        ImportKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ImportKind::Department => !self.skip_departments,
                ImportKind::CostCenter => !self.skip_cost_centers,
                ImportKind::Employee => !self.skip_employees,
                ImportKind::Absence => !self.skip_absences,
            })
            .collect()
    }
}
