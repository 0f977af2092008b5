//! Tipos de dados para requisições e respostas da API Gemini.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato esperado pelo endpoint `models/*:generateContent`.
//! Os nomes de campo seguem o padrão camelCase do protocolo via
//! `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para o endpoint `generateContent` da API Gemini.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Lista de conteúdos enviados ao modelo (imagens e texto).
    pub contents: Vec<Content>,
}

/// Um bloco de conteúdo composto por uma ou mais partes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Partes que compõem este conteúdo, na ordem em que o modelo as lê.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Uma parte de conteúdo: texto ou dados binários embutidos.
///
/// Exatamente um dos campos deve estar presente; campos `None` são
/// omitidos da serialização via `skip_serializing_if`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Conteúdo textual (prompt ou resposta em texto).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Dados de imagem embutidos, serializados como `inlineData` no JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Cria uma parte textual.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Cria uma parte de imagem embutida com dados codificados em base64.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }
}

/// Dados binários embutidos em uma parte, codificados em base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Tipo MIME dos dados (ex.: "image/png").
    pub mime_type: String,
    /// Payload codificado em base64 padrão.
    pub data: String,
}

/// Resposta retornada pelo endpoint `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidatos gerados pelo modelo (normalmente um único).
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Estatísticas de uso de tokens, quando reportadas pela API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Partes do primeiro candidato, ou vazio se não houver candidatos.
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }
}

/// Um candidato de resposta gerado pelo modelo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Conteúdo gerado. Pode estar ausente em respostas bloqueadas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Motivo da parada da geração (ex.: "STOP", "MAX_TOKENS").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Estatísticas de consumo de tokens para uma chamada à API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens consumidos pelo prompt (texto e imagens de entrada).
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Total de tokens da requisição e resposta.
    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_roundtrip() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("image/jpeg", "aGVsbG8="),
                    Part::text("soften the lighting"),
                ],
            }],
        };
        let json = serde_json::to_string(&req).unwrap();
        let parsed: GenerateContentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.contents.len(), 1);
        assert_eq!(parsed.contents[0].parts.len(), 2);
        assert_eq!(
            parsed.contents[0].parts[1].text.as_deref(),
            Some("soften the lighting")
        );
    }

    #[test]
    fn inline_data_field_renames_correctly() {
        let part = Part::inline_data("image/png", "AAAA");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains(r#""inlineData""#));
        assert!(json.contains(r#""mimeType""#));
        assert!(!json.contains("inline_data"));
    }

    #[test]
    fn text_part_omits_absent_fields() {
        let part = Part::text("hello");
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn response_deserialize_from_api_format() {
        let api_json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your retouched photo."},
                        {"inlineData": {"mimeType": "image/png", "data": "aW1n"}}
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 290, "totalTokenCount": 1620}
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(api_json).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
        let parts = resp.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1].inline_data.as_ref().unwrap().mime_type,
            "image/png"
        );
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, 1620);
    }

    #[test]
    fn response_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
        assert!(resp.parts().is_empty());
    }
}
