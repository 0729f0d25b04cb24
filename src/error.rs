use thiserror::Error;

/// Domain errors raised by the dashboard core.
///
/// The type is `Clone` so a failed result can sit in a visualization slot and be
/// rendered as that lane's error state while every other lane keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashError {
    /// A control value does not match any known category of its dataset.
    #[error("unknown {control} {value:?}")]
    Lookup { control: String, value: String },

    /// A dataset is missing a required column or holds malformed values.
    #[error("dataset `{dataset}`: {detail}")]
    Schema { dataset: String, detail: String },

    /// A control change could not be interpreted (unknown name, bad value).
    #[error("invalid control `{name}`: {detail}")]
    InvalidControl { name: String, detail: String },

    /// The figure cannot be produced by the requested renderer.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl DashError {
    pub fn lookup(control: impl Into<String>, value: impl Into<String>) -> Self {
        DashError::Lookup {
            control: control.into(),
            value: value.into(),
        }
    }

    pub fn schema(dataset: impl Into<String>, detail: impl Into<String>) -> Self {
        DashError::Schema {
            dataset: dataset.into(),
            detail: detail.into(),
        }
    }

    /// True for errors caused by a control value rather than by the data.
    pub fn is_lookup(&self) -> bool {
        matches!(self, DashError::Lookup { .. })
    }
}
