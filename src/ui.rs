//! Interface de terminal do retoque — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`BatchProgress`] é o colaborador de
//! observabilidade passado explicitamente aos componentes do lote;
//! não há logger global.

use std::path::Path;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::runner::BatchSummary;

/// Indicador visual de progresso para a execução de um lote no terminal.
///
/// Exibe um spinner animado durante o processamento e mensagens coloridas
/// para sucesso (verde), falha (vermelho) e retentativa (amarelo).
pub struct BatchProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
    // Estilo amarelo para retentativas e avisos.
    yellow: Style,
}

impl BatchProgress {
    /// Inicia o spinner para um lote com o total de imagens encontradas.
    pub fn start(total: usize) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("{total} image(s) found"));
        pb.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(pb)
    }

    /// Progresso silencioso, sem saída no terminal (usado em testes).
    #[allow(dead_code)]
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(pb: ProgressBar) -> Self {
        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Atualiza a mensagem do spinner para a imagem em processamento.
    pub fn processing(&self, path: &Path) {
        self.pb
            .set_message(format!("Processing {}", path.display()));
    }

    /// Exibe o aviso de retentativa com tentativa, limite, erro e atraso.
    pub fn retry(&self, description: &str, attempt: u32, max: u32, reason: &str, delay: Duration) {
        self.pb.println(format!(
            "  {} {description} failed on attempt {attempt}/{max} ({reason}). Retrying in {:.1}s.",
            self.yellow.apply_to("↻"),
            delay.as_secs_f64()
        ));
    }

    /// Informa quantas imagens foram puladas pelo modo resume.
    pub fn resume_skipped(&self, skipped: usize) {
        self.pb.println(format!(
            "  {} Resume mode: {skipped} image(s) already have outputs and will be skipped.",
            self.yellow.apply_to("→")
        ));
    }

    /// Exibe um caminho de saída recém-salvo.
    pub fn saved(&self, path: &Path) {
        self.pb.println(format!(
            "  {} Saved {}",
            self.green.apply_to("✓"),
            path.display()
        ));
    }

    /// Exibe a falha definitiva de um alvo; o lote continua com o próximo.
    pub fn target_failed(&self, path: &Path, reason: &str) {
        self.pb.println(format!(
            "  {} {reason}. Skipping {}.",
            self.red.apply_to("✗"),
            path.display()
        ));
    }

    /// Mensagem informativa avulsa.
    pub fn info(&self, message: &str) {
        self.pb.println(format!("  {message}"));
    }

    /// Encerra o spinner sem exibir placar (lote vazio).
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }

    /// Finaliza o spinner e exibe o placar do lote.
    pub fn finish(&self, summary: &BatchSummary) {
        self.pb.finish_and_clear();
        if summary.failed == 0 {
            println!(
                "  {} Done: {} succeeded, {} skipped.",
                self.green.apply_to("✓"),
                summary.succeeded,
                summary.skipped
            );
        } else {
            println!(
                "  {} Done: {} succeeded, {} failed, {} skipped.",
                self.yellow.apply_to("!"),
                summary.succeeded,
                summary.failed,
                summary.skipped
            );
        }
    }

    /// Imprime o resumo do lote formatado em JSON com estilo colorido.
    pub fn print_summary(&self, summary: &BatchSummary) {
        println!();
        println!("{}", self.green.apply_to("─── Batch Summary ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(summary).unwrap_or_default()
        );
    }
}
