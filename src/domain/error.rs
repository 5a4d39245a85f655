//! Pipeline error taxonomy.

use thiserror::Error;

/// Shown to users for every terminal failure except a revoked key
pub const GENERIC_FAILURE_MESSAGE: &str =
    "La génération du contenu a échoué. Veuillez réessayer.";

/// Shown to users when the upstream reports the key as revoked
pub const REVOKED_KEY_GUIDANCE: &str = "La clé API de génération a été révoquée (signalée comme divulguée). \
     Créez une nouvelle clé et renseignez-la dans HIKMA_API_KEY ou dans .hikma/config.yaml.";

/// Errors raised by the content pipeline
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Corpus resource '{resource}' unavailable: {reason}")]
    CorpusUnavailable { resource: String, reason: String },

    #[error("No API key configured for the generation endpoint (set HIKMA_API_KEY)")]
    MissingCredential,

    #[error("Generation API key was revoked: {message}")]
    CredentialRevoked { message: String },

    #[error("Generation request failed{}: {message}", fmt_status(.status))]
    GenerationFailed { status: Option<u16>, message: String },

    #[error("Generated response has an invalid shape: {0}")]
    InvalidGenerationShape(String),

    #[error("Generated response does not match {{content, source}}: {0}")]
    SchemaViolation(String),
}

impl ContentError {
    /// Text the UI shows for a terminal failure
    pub fn user_message(&self) -> &'static str {
        match self {
            ContentError::CredentialRevoked { .. } => REVOKED_KEY_GUIDANCE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    pub(crate) fn corpus(resource: &str, reason: impl std::fmt::Display) -> Self {
        ContentError::CorpusUnavailable {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}
