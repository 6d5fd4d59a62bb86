//! IPv4 CIDR block parsing and subnet arithmetic.

pub mod ipv4;

pub use ipv4::{range_summary, InvalidCidrBlock, Ipv4CidrBlock};
