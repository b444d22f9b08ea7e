//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the insert DTO the repositories
//! accept.

pub mod entitlement;
pub mod lecture;
