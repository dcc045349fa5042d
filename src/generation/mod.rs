pub mod controller;

pub use controller::{JobController, JobPhase, PollOutcome};
