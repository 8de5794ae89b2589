//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for full replacement (PUT)
//! - A `Deserialize` patch DTO (all `Option` fields) merged over the stored row

pub mod category;
pub mod expense;
pub mod note;
