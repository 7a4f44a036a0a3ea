pub mod gh;
pub mod git;
pub mod github;
