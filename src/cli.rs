//! Interface de linha de comando do retoque baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, prompts)
//! e flags globais (--model, --api-key, --max-retries, --max-sleep,
//! --verbose).

use clap::{Parser, Subcommand};

/// retoque — Retoque de fotos em lote via API Gemini.
#[derive(Debug, Parser)]
#[command(name = "retoque", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Nome do modelo Gemini a usar nesta sessão.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Chave da API Google. Padrão: variável GOOGLE_API_KEY ou retoque.toml.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Número máximo de tentativas por imagem quando a API falha.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Tempo máximo de espera (em segundos) entre retentativas.
    #[arg(long, global = true)]
    pub max_sleep: Option<u64>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Processa uma imagem ou pasta de imagens pela API Gemini.
    Run {
        /// Caminho para uma imagem ou pasta contendo imagens.
        #[arg(long, short)]
        input: String,

        /// Diretório onde salvar as imagens geradas.
        #[arg(long, short)]
        output_dir: Option<String>,

        /// Identificador do prompt dentro do catálogo de prompts.
        #[arg(long)]
        prompt_id: Option<String>,

        /// Texto de prompt inline. Tem precedência sobre id/arquivo.
        #[arg(long)]
        prompt_text: Option<String>,

        /// Caminho para um arquivo de texto com o prompt completo.
        #[arg(long)]
        prompt_file: Option<String>,

        /// Foto de exemplo de entrada (par com --sample-output).
        #[arg(long)]
        sample_input: Option<String>,

        /// Foto de exemplo refinada correspondente a --sample-input.
        #[arg(long)]
        sample_output: Option<String>,

        /// Quando --input é uma pasta, usa apenas os arquivos diretos (sem recursão).
        #[arg(long, default_value_t = false)]
        top_level_only: bool,

        /// Processa cada N-ésima imagem quando --input é uma pasta.
        #[arg(long, default_value_t = 1)]
        stride: usize,

        /// Pula imagens cujas saídas já existem (útil após uma execução interrompida).
        #[arg(long, default_value_t = false)]
        resume: bool,
    },

    /// Lista os IDs de prompt disponíveis no catálogo.
    Prompts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_subcommand() {
        let cli = Cli::parse_from(["retoque", "run", "--input", "photos/"]);
        match cli.command {
            Command::Run {
                input,
                stride,
                resume,
                top_level_only,
                ..
            } => {
                assert_eq!(input, "photos/");
                assert_eq!(stride, 1);
                assert!(!resume);
                assert!(!top_level_only);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "retoque",
            "--model",
            "gemini-test",
            "--max-retries",
            "5",
            "--max-sleep",
            "10",
            "--verbose",
            "prompts",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("gemini-test"));
        assert_eq!(cli.max_retries, Some(5));
        assert_eq!(cli.max_sleep, Some(10));
        assert!(matches!(cli.command, Command::Prompts));
    }

    #[test]
    fn cli_parses_resume_and_stride() {
        let cli = Cli::parse_from([
            "retoque", "run", "-i", "wedding/", "--stride", "3", "--resume",
        ]);
        match cli.command {
            Command::Run { stride, resume, .. } => {
                assert_eq!(stride, 3);
                assert!(resume);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_sample_pair() {
        let cli = Cli::parse_from([
            "retoque",
            "run",
            "-i",
            "a.jpg",
            "--sample-input",
            "before.jpg",
            "--sample-output",
            "after.jpg",
        ]);
        match cli.command {
            Command::Run {
                sample_input,
                sample_output,
                ..
            } => {
                assert_eq!(sample_input.as_deref(), Some("before.jpg"));
                assert_eq!(sample_output.as_deref(), Some("after.jpg"));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
