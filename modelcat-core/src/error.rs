//! Error types for catalog requests and page loads.

/// A failed catalog API request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {code} {reason}")]
    Status {
        url: String,
        code: u16,
        reason: String,
    },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Why a page (or one panel of it) has nothing to render.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Transport, HTTP status or decoding failure.
    #[error("data unavailable: {0}")]
    Unavailable(#[from] ClientError),

    /// The request succeeded but returned zero records.
    #[error("no results")]
    Empty,

    /// A required page identifier was not supplied.
    #[error("missing required input: {0}")]
    MissingInput(&'static str),
}

/// The region a [`PageError`] replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Catalog,
    Details,
    Performance,
    Comparison,
}

impl PageError {
    /// User-facing text shown in place of the panel's content.
    pub fn message(&self, panel: Panel) -> &'static str {
        match (panel, self) {
            (Panel::Catalog, PageError::Empty) => "No models found matching the criteria.",
            (Panel::Catalog, _) => "Failed to load models. Please try again.",
            (Panel::Details, PageError::MissingInput(_)) => "No model ID provided.",
            (Panel::Details, _) => "Failed to load model details. Please try again.",
            (Panel::Performance, PageError::Empty) => {
                "No performance metrics available for this model."
            }
            (Panel::Performance, PageError::MissingInput(_)) => "No model ID provided.",
            (Panel::Performance, _) => "Failed to load performance metrics. Please try again.",
            (Panel::Comparison, PageError::Unavailable(_)) => {
                "Failed to load comparison data. Please try again."
            }
            (Panel::Comparison, _) => "Please select two models to compare.",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PageError::Empty)
    }
}
