pub mod code_review;
pub mod version_control;

pub use code_review::CodeReviewService;
pub use version_control::VersionControlService;
