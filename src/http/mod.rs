//! HTTP transport layer for the Model Context Protocol
//!
//! Exposes the single `POST /mcp` endpoint.

pub mod handlers;
