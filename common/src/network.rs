pub mod cidr;
pub mod interface;
pub mod ipv4;
pub mod pair;
pub mod port;
pub mod range;
pub mod rule;
