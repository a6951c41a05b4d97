use serde::Serialize;

/// Body of every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
            details: None,
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            ok: false,
            error: Some(error),
            details: None,
        }
    }

    pub fn with_details(self, details: String) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}
