//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod account;
pub mod instructor;
pub mod privileges;
pub mod student;
pub mod transition;

pub use account::*;
pub use instructor::*;
pub use privileges::*;
pub use student::*;
pub use transition::*;
