pub mod orchestration;

pub use orchestration::{BumpWorkflow, BumpWorkflowArgs};
