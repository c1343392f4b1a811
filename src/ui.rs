//! Saída de terminal — spinner do polling e resumo colorido.
//!
//! Usa `indicatif` para o spinner e `console` para estilização com cores.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{ImportStatus, JobStatus};

/// Indicador visual do loop de polling.
pub struct PollProgress {
    pb: ProgressBar,
}

impl PollProgress {
    /// Inicia o spinner anunciando quantos lotes estão pendentes.
    pub fn start(total: usize) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("processing {total} import(s)..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Atualiza a mensagem com o número da rodada corrente.
    pub fn round(&self, round: u32) {
        self.pb
            .set_message(format!("processing... round {round}"));
    }

    /// Encerra e limpa o spinner.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

/// Imprime uma linha colorida por status terminal: verde para sucesso limpo,
/// amarelo para sucesso com avisos, vermelho para falha.
pub fn print_summary(statuses: &[JobStatus]) {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    let yellow = Style::new().yellow();

    for status in statuses {
        match status.import_status {
            ImportStatus::Done if status.warnings.is_empty() => {
                println!(
                    "  {} {} {}",
                    green.apply_to("✓"),
                    status.import_type,
                    status.message_id
                );
            }
            ImportStatus::Done => {
                println!(
                    "  {} {} {} ({} warning(s))",
                    yellow.apply_to("!"),
                    status.import_type,
                    status.message_id,
                    status.warnings.len()
                );
            }
            ImportStatus::Failure => {
                println!(
                    "  {} {} {}",
                    red.apply_to("✗"),
                    status.import_type,
                    status.message_id
                );
            }
            // Não deveria aparecer depois do polling; mostrado mesmo assim.
            ImportStatus::Unknown | ImportStatus::InProgress => {
                println!(
                    "  {} {} {}",
                    yellow.apply_to("?"),
                    status.import_type,
                    status.message_id
                );
            }
        }
    }
}
