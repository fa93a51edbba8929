//! Settings models shared by the client and the command line tool.

pub mod config;
