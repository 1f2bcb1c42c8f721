//! Business logic services

pub mod accounts_service;
pub mod cascade;
pub mod course_service;
pub mod instructor_service;
pub mod student_service;

pub use accounts_service::AccountsService;
pub use cascade::{CascadePlan, Mutation};
pub use course_service::CourseService;
pub use instructor_service::InstructorService;
pub use student_service::StudentService;
