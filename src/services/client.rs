//! HTTP client for the postal-code lookup, the activity-code search, and
//! the submission endpoint

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;

use super::traits::ServicesApi;
use crate::state::{CepAddress, CepLookup, CnaeSuggestion};

/// Errors surfaced by the service clients
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("could not read attachment {path}: {source}")]
    Attachment {
        path: String,
        source: std::io::Error,
    },
}

/// One attached document of the submission payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field the attachment belongs to
    pub field: String,
    pub file_name: String,
    /// Read from disk when the payload is sent
    pub path: String,
}

/// The serialized form, sent as a single multipart request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub texts: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

/// Postal-code service wire format
#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: bool,
}

/// Activity-code search wire format
#[derive(Debug, Deserialize)]
struct CnaeItem {
    id: String,
    descricao: String,
}

/// Submission endpoint wire format; anything that does not decode into this
/// shape with `status == "success"` is treated as failure
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    id: String,
}

/// reqwest-backed implementation of [`ServicesApi`]
pub struct HttpServices {
    http: reqwest::Client,
    backend_url: String,
    cep_url: String,
}

impl HttpServices {
    pub fn new(backend_url: String, cep_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            cep_url: cep_url.trim_end_matches('/').to_string(),
        }
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

/// Content type of an attachment, by file extension
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ServicesApi for HttpServices {
    async fn lookup_cep(&self, cep: &str) -> Result<CepLookup, ServiceError> {
        let url = format!("{}/ws/{}/json/", self.cep_url, cep);
        let response: CepResponse = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        if response.erro {
            return Ok(CepLookup::NotFound);
        }
        Ok(CepLookup::Found(CepAddress {
            rua: response.logradouro,
            bairro: response.bairro,
            cidade: response.localidade,
            uf: response.uf,
        }))
    }

    async fn search_cnae(&self, query: &str) -> Result<Vec<CnaeSuggestion>, ServiceError> {
        let url = format!("{}/api/cnae", self.backend_url);
        let items: Vec<CnaeItem> = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        Ok(items
            .into_iter()
            .map(|item| CnaeSuggestion {
                code: item.id,
                description: item.descricao,
            })
            .collect())
    }

    async fn submit(&self, payload: SubmissionPayload) -> Result<String, ServiceError> {
        let mut form = multipart::Form::new();
        for (name, value) in payload.texts {
            form = form.text(name, value);
        }
        for file in payload.files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| ServiceError::Attachment {
                    path: file.path.clone(),
                    source,
                })?;
            let part = multipart::Part::bytes(bytes)
                .file_name(file.file_name.clone())
                .mime_str(content_type_for(&file.file_name))
                .map_err(transport)?;
            form = form.part(file.field, part);
        }

        let url = format!("{}/submit", self.backend_url);
        let response: SubmitResponse = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        if response.status == "success" && !response.id.is_empty() {
            Ok(response.id)
        } else {
            Err(ServiceError::UnexpectedResponse(format!(
                "status {:?}",
                response.status
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod wire_formats {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cep_response_maps_fields() {
            let body = r#"{
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            }"#;
            let parsed: CepResponse = serde_json::from_str(body).unwrap();
            assert!(!parsed.erro);
            assert_eq!(parsed.logradouro, "Avenida Paulista");
            assert_eq!(parsed.localidade, "São Paulo");
        }

        #[test]
        fn test_cep_error_flag() {
            let parsed: CepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
            assert!(parsed.erro);
            assert!(parsed.logradouro.is_empty());
        }

        #[test]
        fn test_cnae_items_decode_in_order() {
            let body = r#"[
                {"id": "6201-5/01", "descricao": "Desenvolvimento de programas sob encomenda"},
                {"id": "6202-3/00", "descricao": "Desenvolvimento de programas customizáveis"}
            ]"#;
            let parsed: Vec<CnaeItem> = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.len(), 2);
            assert_eq!(parsed[0].id, "6201-5/01");
        }

        #[test]
        fn test_submit_response_tolerates_missing_fields() {
            let parsed: SubmitResponse = serde_json::from_str("{}").unwrap();
            assert!(parsed.status.is_empty());
            assert!(parsed.id.is_empty());
        }
    }

    mod content_types {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_known_extensions() {
            assert_eq!(content_type_for("rg.pdf"), "application/pdf");
            assert_eq!(content_type_for("foto.JPG"), "image/jpeg");
            assert_eq!(content_type_for("scan.webp"), "image/webp");
        }

        #[test]
        fn test_unknown_extension_falls_back() {
            assert_eq!(content_type_for("arquivo.doc"), "application/octet-stream");
            assert_eq!(content_type_for("sem_extensao"), "application/octet-stream");
        }
    }
}
