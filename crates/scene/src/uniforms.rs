//! Index-addressed uniform updates.
//!
//! The external UI wires one slider per uniform variable at load time and
//! addresses them positionally: program N's variables are only reachable
//! through index N. That contract is preserved here; the index is merely
//! bounds-checked instead of trusted.

use std::fmt;

use crate::SceneDocument;

/// Errors when addressing a uniform variable.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Program index outside `0..count`
    ProgramIndexOutOfRange { index: usize, count: usize },
    /// No variable with that name in the addressed program
    UnknownVariable { program: String, name: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::ProgramIndexOutOfRange { index, count } => {
                write!(f, "program index {} out of range ({} programs)", index, count)
            }
            LookupError::UnknownVariable { program, name } => {
                write!(f, "program '{}' has no variable '{}'", program, name)
            }
        }
    }
}

impl std::error::Error for LookupError {}

impl SceneDocument {
    /// Set the current value of one uniform variable.
    ///
    /// The program is addressed by position, the variable by name (first
    /// match wins). The value is clamped to the variable's declared
    /// `[min, max]` range; the UI widget's own range is not trusted.
    /// On error the document is left untouched.
    pub fn update_uniform(
        &mut self,
        program_index: usize,
        name: &str,
        value: f32,
    ) -> Result<(), LookupError> {
        let count = self.programs.len();
        let program = self
            .programs
            .get_mut(program_index)
            .ok_or(LookupError::ProgramIndexOutOfRange {
                index: program_index,
                count,
            })?;

        let program_name = program.name.clone();
        let var = program
            .variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or(LookupError::UnknownVariable {
                program: program_name,
                name: name.to_string(),
            })?;

        // The parser guarantees min <= max, but documents can also arrive
        // through serde; the max/min chain never panics on crossed or NaN
        // bounds the way `f32::clamp` would.
        var.value = value.max(var.min).min(var.max);
        Ok(())
    }

    /// Read the current value of one uniform variable, addressed the same
    /// way as [`SceneDocument::update_uniform`].
    pub fn uniform_value(&self, program_index: usize, name: &str) -> Result<f32, LookupError> {
        let program =
            self.programs
                .get(program_index)
                .ok_or(LookupError::ProgramIndexOutOfRange {
                    index: program_index,
                    count: self.programs.len(),
                })?;

        program
            .variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
            .ok_or(LookupError::UnknownVariable {
                program: program.name.clone(),
                name: name.to_string(),
            })
    }
}
