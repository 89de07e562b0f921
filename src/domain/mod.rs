//! Domain logic exposed over the MCP protocol
//!
//! Provides the `current_date` tool: computing the payload and registering it.

pub mod current_date;
pub mod tools;
