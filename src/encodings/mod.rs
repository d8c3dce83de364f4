//! Objects used to encode the semantics into circumscription problems.

mod clause_groups;
pub use clause_groups::ClauseGroup;

mod semantics_encoding;
pub use semantics_encoding::SemanticsEncoding;

mod var_allocator;
pub use var_allocator::VarAllocator;
