pub mod controller;
pub mod error;
pub mod state;

pub use controller::WorkflowController;
pub use error::{Operation, ValidationError, WorkflowError};
pub use state::{SessionSnapshot, Stage, StatusMessage};
