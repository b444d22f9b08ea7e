//! Repository layer: one struct of associated query functions per table.

pub mod entitlement_repo;
pub mod lecture_repo;

pub use entitlement_repo::EntitlementRepo;
pub use lecture_repo::LectureRepo;
