// ABOUTME: MariaDB/MySQL connectivity module
// ABOUTME: Exports the connection descriptor, catalog model and session abstraction

pub mod catalog;
pub mod connection;
pub mod session;
pub mod values;

pub use catalog::{Column, Quoting, Schema, Table};
pub use connection::{connect, ConnectionDescriptor};
pub use session::{MySqlSession, Session};
pub use values::Record;
