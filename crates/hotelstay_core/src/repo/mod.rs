//! Collection layer over the key-value medium.
//!
//! # Responsibility
//! - Map storage keys to typed record arrays.
//! - Keep JSON encoding details out of the record store service.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   storage transport errors.

pub mod collection;
