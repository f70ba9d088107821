//! coursetree: a course catalog held in a binary search tree.
//!
//! Catalog files are loaded in two phases (parse, then validate
//! prerequisites against the whole batch) into a fresh index, which only
//! replaces the live one when it holds at least one course.
//!
//! Layers, inside out: [`domain`], [`application`], [`infrastructure`], [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
