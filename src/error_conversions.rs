//! Error conversion glue between the `data` layer and the service errors.
//!
//! The domain layer must not depend on service error types, so the
//! conversions live here and are only compiled with the `client` feature.

use crate::domain::filter::FilterError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(FormError::Constraint(val))
    }
}

impl From<FilterError> for ServiceError {
    fn from(val: FilterError) -> Self {
        ServiceError::Form(FormError::Filter(val))
    }
}
