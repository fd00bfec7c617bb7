pub mod job_model;

pub use job_model::{JobModel, JobRow};
