use crate::error::{CoreError, CoreResult};

/// Editable form state that turns into an entity on submission.
///
/// A successful [`Draft::submit`] hands back the built entity and resets the
/// draft to its default (empty) values. A failed submission leaves the draft
/// untouched so the user can keep editing.
pub trait Draft: Default {
    /// The entity produced by this draft.
    type Output;

    /// Check that all required fields are filled in.
    fn validate(&self) -> CoreResult<()>;

    /// Build the entity from the current field values.
    fn build(&self) -> Self::Output;

    /// Validate, build, and reset the draft.
    fn submit(&mut self) -> CoreResult<Self::Output> {
        self.validate()?;
        let output = self.build();
        *self = Self::default();
        Ok(output)
    }
}

/// Fail with [`CoreError::MissingField`] when `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        Err(CoreError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        assert_eq!(require("name", ""), Err(CoreError::MissingField("name")));
        assert_eq!(require("name", "  \t"), Err(CoreError::MissingField("name")));
        assert!(require("name", "Vega").is_ok());
    }
}
