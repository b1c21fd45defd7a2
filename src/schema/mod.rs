//! Table lifecycle: creating and dropping the relational schema.
//!
//! Tables are created parents first and dropped in the exact reverse
//! order. The DDL lives in `sql/<table>/{create,drop}.sql` and is embedded
//! at compile time.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
