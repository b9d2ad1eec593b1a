//! Aggregate repository - read-modify-write over whole-record snapshots.

mod aggregate_repository;

pub use aggregate_repository::{AggregateRepository, RecordVersion};
