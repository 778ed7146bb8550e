pub mod asset;
pub mod catalog;
pub mod config;
pub mod custody;
pub mod fraction;
pub mod gate;
pub mod kyc;
pub mod loan;
pub mod money;
pub mod notice;
pub mod processing;
pub mod range;
pub mod route;
pub mod session;
pub mod sim;
pub mod stepper;

pub use config::Config;
pub use notice::{Notice, NoticeLevel};
pub use stepper::{StepStatus, Stepper};
