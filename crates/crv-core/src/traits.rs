use crate::error::Result;

/// Validate structural integrity of a configuration or construction input.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
