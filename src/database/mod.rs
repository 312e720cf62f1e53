//! MiniArc database layer.
//!
//! SQLite connection management and schema migrations for the optional
//! session store.
//!
//! ```no_run
//! use miniarc::database::Database;
//!
//! let db = Database::open("session.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
