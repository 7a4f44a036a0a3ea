pub mod changelog;
pub mod resolve;
