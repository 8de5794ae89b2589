//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement operations
//! run inside a single transaction; returning early drops it and rolls back.

pub mod category_repo;
pub mod expense_repo;
pub mod note_repo;

pub use category_repo::CategoryRepo;
pub use expense_repo::ExpenseRepo;
pub use note_repo::NoteRepo;
