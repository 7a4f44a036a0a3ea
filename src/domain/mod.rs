pub mod category;
pub mod change;
pub mod changelog;
pub mod commit;
pub mod pull_request;
