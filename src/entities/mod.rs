//! Entity module - plain data records for the client → store → employee
//! hierarchy and the sales facts attached to it.

pub mod client;
pub mod employee;
pub mod goal;
pub mod node;
pub mod sale;
pub mod store;

pub use client::Client;
pub use employee::Employee;
pub use goal::GoalField;
pub use node::NodeRef;
pub use sale::{NewSale, Sale};
pub use store::Store;
