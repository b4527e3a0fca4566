//! Request field validators.
//!
//! Both checks are pure functions over the request form and report the
//! first failure only.

use crate::protocol::{ElbError, ElbResult, FormValues};

/// Fail on the first field in `required` that is missing or empty.
pub fn required(form: &FormValues, required: &[&str]) -> ElbResult<()> {
    match required.iter().find(|field| !form.has(field)) {
        Some(field) => Err(ElbError::required(field)),
        None => Ok(()),
    }
}

/// For every `(a, b)` pair, exactly one of the two fields must be set.
pub fn composition(form: &FormValues, pairs: &[(&str, &str)]) -> ElbResult<()> {
    for (a, b) in pairs {
        match (form.has(a), form.has(b)) {
            (true, true) => {
                return Err(ElbError::Validation(format!(
                    "Only one of {} or {} may be specified",
                    a, b
                )))
            }
            (false, false) => {
                return Err(ElbError::Validation(format!(
                    "Either {} or {} must be specified",
                    a, b
                )))
            }
            _ => {}
        }
    }
    Ok(())
}
