//! Student request types.
//!
//! Binding a [`CreateStudentRequest`] into a [`Student`] runs in two phases:
//!
//! 1. Every field present in the body is checked the way the entity's setter
//!    would check it. The first rejection aborts binding and the body is
//!    treated as unreadable ([`BindingError::Rejected`]).
//! 2. The bound values are validated as a whole, reporting every absent
//!    field and every malformed id ([`BindingError::Invalid`]).

use serde::{Deserialize, Deserializer};

use registro_core::student::{check_name, check_program, require_id};
use registro_core::{CoreError, Student, ValidationErrors};

/// Body of `POST /estudiantes`.
///
/// Each field is `None` when absent from the body and `Some(None)` when sent
/// as `null`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub nombre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub carrera: Option<Option<String>>,
}

/// Marks a field as present, keeping an explicit `null` apart from absence.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Why a request could not become a [`Student`].
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// A field present in the body was refused outright.
    #[error("could not bind field '{field}'")]
    Rejected {
        field: &'static str,
        #[source]
        source: CoreError,
    },

    /// The bound payload failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl BindingError {
    fn rejected(source: CoreError) -> Self {
        BindingError::Rejected {
            field: source.field().unwrap_or("body"),
            source,
        }
    }
}

impl CreateStudentRequest {
    /// Binds and validates the request into the entity.
    pub fn into_student(self) -> Result<Student, BindingError> {
        if let Some(id) = &self.id {
            require_id(id.as_deref()).map_err(BindingError::rejected)?;
        }
        if let Some(nombre) = &self.nombre {
            check_name(nombre.as_deref()).map_err(BindingError::rejected)?;
        }
        if let Some(carrera) = &self.carrera {
            check_program(carrera.as_deref()).map_err(BindingError::rejected)?;
        }

        Ok(Student::from_fields(
            self.id.flatten().as_deref(),
            self.nombre.flatten().as_deref(),
            self.carrera.flatten().as_deref(),
        )?)
    }
}
