//! The student entity and its field checks.
//!
//! A [`Student`] can only be obtained through validation: every constructor
//! and setter runs the same checks, so an instance always holds a well-formed
//! id and a non-blank, trimmed name and program.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{CoreError, ValidationErrors};

/// Pattern every student id must match: exactly nine ASCII digits.
pub const ID_PATTERN: &str = "^[0-9]{9}$";

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_regex() -> &'static Regex {
    ID_RE.get_or_init(|| {
        Regex::new(ID_PATTERN)
            .unwrap_or_else(|error| panic!("student id regex failed to compile: {error}"))
    })
}

/// Rejects a missing or blank id without checking its format.
pub fn require_id(id: Option<&str>) -> Result<&str, CoreError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(CoreError::BlankId),
    }
}

/// Validates a raw id. Ids are never trimmed; surrounding whitespace fails the pattern.
pub fn check_id(id: Option<&str>) -> Result<String, CoreError> {
    let id = require_id(id)?;
    if !id_regex().is_match(id) {
        return Err(CoreError::MalformedId {
            value: id.to_string(),
        });
    }
    Ok(id.to_string())
}

/// Validates a raw name and returns it trimmed.
pub fn check_name(name: Option<&str>) -> Result<String, CoreError> {
    non_blank(name).ok_or(CoreError::BlankName)
}

/// Validates a raw program and returns it trimmed.
pub fn check_program(program: Option<&str>) -> Result<String, CoreError> {
    non_blank(program).ok_or(CoreError::BlankProgram)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// A registered student.
///
/// ## Invariants
/// - `id` matches [`ID_PATTERN`].
/// - `name` and `program` are non-empty and carry no surrounding whitespace.
///
/// Equality and hashing consider only `id`: two students with the same id are
/// the same entity whatever their other fields say.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    id: String,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "carrera")]
    program: String,
}

impl Student {
    /// Builds a student, failing on the first invalid field.
    pub fn new(id: &str, name: &str, program: &str) -> Result<Self, CoreError> {
        Ok(Student {
            id: check_id(Some(id))?,
            name: check_name(Some(name))?,
            program: check_program(Some(program))?,
        })
    }

    /// Builds a student from possibly-missing fields, reporting every invalid
    /// field rather than only the first.
    pub fn from_fields(
        id: Option<&str>,
        name: Option<&str>,
        program: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let id = check_id(id).map_err(|e| errors.push(e)).ok();
        let name = check_name(name).map_err(|e| errors.push(e)).ok();
        let program = check_program(program).map_err(|e| errors.push(e)).ok();

        match (id, name, program) {
            (Some(id), Some(name), Some(program)) => Ok(Student { id, name, program }),
            _ => Err(errors),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Replaces the id. On error the student is left unchanged.
    pub fn set_id(&mut self, id: &str) -> Result<(), CoreError> {
        self.id = check_id(Some(id))?;
        Ok(())
    }

    /// Replaces the name, storing it trimmed. On error the student is left unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<(), CoreError> {
        self.name = check_name(Some(name))?;
        Ok(())
    }

    /// Replaces the program, storing it trimmed. On error the student is left unchanged.
    pub fn set_program(&mut self, program: &str) -> Result<(), CoreError> {
        self.program = check_program(Some(program))?;
        Ok(())
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
