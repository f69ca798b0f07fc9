//! # Survey Core
//!
//! Validation of submitted survey forms. Takes the decoded field mapping of a
//! request and produces a typed record or a tagged failure.

pub mod error;
pub mod fields;
pub mod form;
pub mod validator;

pub use error::{FailureKind, Result, SubmissionError};
pub use form::{RawForm, ValidatedSubmission};
pub use validator::{FormValidator, parse_age};
