//! JSON session documents.

pub mod session;
