//! Joint Activity Graph projects.
//!
//! A project is a tree of nodes stored as flat rows keyed by `id` with a
//! nullable `parentId`; the root is the node whose `projectId` equals its own
//! id. Writes flatten the nested tree parent-first; reads re-nest the rows
//! with the shared [`crate::tree`] utility.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
