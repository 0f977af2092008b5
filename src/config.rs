//! Configuração do retoque carregada a partir de `retoque.toml`.
//!
//! A struct [`RetoqueConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `GOOGLE_API_KEY` tem precedência sobre o arquivo,
//! e a flag `--api-key` sobre ambas.

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Configuração de nível superior carregada de `retoque.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RetoqueConfig {
    /// Chave da API Google (Gemini).
    #[serde(default)]
    pub api_key: String,

    /// Modelo Gemini padrão quando não especificado via CLI.
    #[serde(default = "default_model")]
    pub model: String,

    /// Diretório padrão para as imagens geradas.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Diretório do catálogo de prompts (arquivos `.txt`).
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,

    /// Prompt padrão quando nenhum id/texto/arquivo é informado.
    #[serde(default = "default_prompt_id")]
    pub default_prompt_id: String,

    /// Máximo de tentativas por imagem antes de desistir dela.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Atraso base em milissegundos para o backoff exponencial.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Teto do atraso em milissegundos entre retentativas.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Fator de crescimento do backoff por tentativa.
    #[serde(default = "default_multiplier")]
    pub backoff_multiplier: f64,

    /// Fração do atraso adicionada como jitter aleatório, em [0, 1).
    #[serde(default = "default_jitter_ratio")]
    pub jitter_ratio: f64,
}

// Valor padrão para o modelo de geração de imagens.
fn default_model() -> String {
    "gemini-3-pro-image-preview".to_string()
}

fn default_output_dir() -> String {
    "outputs".to_string()
}

fn default_prompts_dir() -> String {
    "prompts".to_string()
}

fn default_prompt_id() -> String {
    "korean_wedding_soft_refine".to_string()
}

// Valor padrão para tentativas máximas: 10.
fn default_max_retries() -> u32 {
    10
}

// Valor padrão para o atraso base: 1000ms.
fn default_base_delay_ms() -> u64 {
    1000
}

// Valor padrão para o teto do atraso: 30s.
fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_jitter_ratio() -> f64 {
    0.1
}

impl Default for RetoqueConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            output_dir: default_output_dir(),
            prompts_dir: default_prompts_dir(),
            default_prompt_id: default_prompt_id(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_multiplier(),
            jitter_ratio: default_jitter_ratio(),
        }
    }
}

impl RetoqueConfig {
    /// Carrega a configuração de `retoque.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let path = Path::new("retoque.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<RetoqueConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para a chave API.
        if let Ok(key) = std::env::var("GOOGLE_API_KEY")
            && !key.is_empty()
        {
            config.api_key = key;
        }

        Ok(config)
    }

    /// Resolve a chave da API: flag de CLI > ambiente > arquivo.
    pub fn resolve_api_key(&self, cli_key: Option<String>) -> Result<String> {
        if let Some(key) = cli_key
            && !key.is_empty()
        {
            return Ok(key);
        }
        if self.api_key.is_empty() {
            bail!("Google API key is missing. Provide --api-key or set GOOGLE_API_KEY.");
        }
        Ok(self.api_key.clone())
    }

    /// Política de retentativas derivada da configuração, com overrides da
    /// CLI para o número de tentativas e o teto de espera (em segundos).
    pub fn retry_policy(&self, max_retries: Option<u32>, max_sleep_secs: Option<u64>) -> RetryPolicy {
        RetryPolicy {
            max_attempts: max_retries.unwrap_or(self.max_retries),
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: max_sleep_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| Duration::from_millis(self.max_delay_ms)),
            multiplier: self.backoff_multiplier,
            jitter_ratio: self.jitter_ratio,
        }
    }
}
