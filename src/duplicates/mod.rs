//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size + extension grouping
//! - Filename grouping
//! - Duplicate group management

pub mod groups;

pub use groups::{
    group_by_name, group_by_size, DuplicateGroup, DuplicateMode, GroupingStats, NameGroup,
    SizeGroup, SizeKey,
};
