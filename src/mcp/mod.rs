//! Model Context Protocol (MCP) server handling and JSON-RPC implementations
//!
//! Shared by both transports: JSON-RPC framing helpers, method routing, and the
//! per-exchange transport context.

pub mod context;
pub mod rpc;
pub mod server;
