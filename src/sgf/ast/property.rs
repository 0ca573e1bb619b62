//! Properties and their validation status

use super::value::PropertyValue;
use crate::sgf::registry::{self, PropertyType};
use crate::sgf::validation::{Outcome, ShapeError};
use serde::Serialize;
use std::fmt;

/// Where a property stands with respect to its registry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationStatus {
    NotValidated,
    /// At least one value needs board context to be checked, none failed
    Deferred,
    Valid,
    Invalid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStatus::NotValidated => "not-validated",
            ValidationStatus::Deferred => "deferred",
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
        };
        write!(f, "{}", name)
    }
}

/// Why a property is invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ValidationError {
    #[error("property {identity} can only have one value, found {count}")]
    TooManyValues { identity: String, count: usize },
    #[error("property {identity} needs at least one value")]
    NoValues { identity: String },
    #[error("value {index} of property {identity} is invalid: {source}")]
    InvalidValue {
        identity: String,
        index: usize,
        #[source]
        source: ShapeError,
    },
}

/// A property: an identity with its values.
///
/// The registry type is resolved once, when the property is created. The status is
/// recomputed every time a value is added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    identity: String,
    #[serde(rename = "type")]
    kind: &'static PropertyType,
    values: Vec<PropertyValue>,
    status: ValidationStatus,
    #[serde(skip)]
    error: Option<ValidationError>,
}

impl Property {
    pub fn new(identity: impl Into<String>) -> Self {
        let identity = identity.into();
        let kind = registry::lookup(&identity);
        Property {
            identity,
            kind,
            values: Vec::new(),
            status: ValidationStatus::NotValidated,
            error: None,
        }
    }

    /// Build a property from raw value texts, validating as they are added
    pub fn with_values<I, S>(identity: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut property = Property::new(identity);
        for raw in values {
            property.add_value(PropertyValue::new(raw));
        }
        property
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn kind(&self) -> &'static PropertyType {
        self.kind
    }

    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// The first value, if any
    pub fn value(&self) -> Option<&PropertyValue> {
        self.values.first()
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// Why the property is invalid, when it is
    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Attach a value and revalidate the whole property
    pub fn add_value(&mut self, mut value: PropertyValue) -> ValidationStatus {
        value.attach(self.kind.shape());
        self.values.push(value);
        self.revalidate()
    }

    /// Recompute the status from the cardinality and every value.
    ///
    /// Invalid if the arity is wrong or any value fails, else deferred if any value is
    /// deferred, else valid.
    pub fn revalidate(&mut self) -> ValidationStatus {
        let (status, error) = match self.check() {
            Ok(status) => (status, None),
            Err(error) => (ValidationStatus::Invalid, Some(error)),
        };
        self.status = status;
        self.error = error;
        status
    }

    fn check(&self) -> Result<ValidationStatus, ValidationError> {
        let cardinality = self.kind.cardinality;
        if self.values.is_empty() && !cardinality.allows_none() {
            return Err(ValidationError::NoValues {
                identity: self.identity.clone(),
            });
        }
        if self.values.len() > 1 && !cardinality.allows_many() {
            return Err(ValidationError::TooManyValues {
                identity: self.identity.clone(),
                count: self.values.len(),
            });
        }

        let mut status = ValidationStatus::Valid;
        for (index, value) in self.values.iter().enumerate() {
            match value.validate() {
                Outcome::Valid => {}
                Outcome::Deferred => status = ValidationStatus::Deferred,
                Outcome::Invalid(source) => {
                    return Err(ValidationError::InvalidValue {
                        identity: self.identity.clone(),
                        index,
                        source,
                    })
                }
            }
        }
        Ok(status)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)?;
        for value in &self.values {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
