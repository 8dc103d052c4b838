pub mod capture;
pub mod sim;

pub use capture::{AudioRef, CaptureDevice};
pub use sim::SimulatedMicrophone;
