//! Service layer.

pub mod scan;
