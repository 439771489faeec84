//! sea-orm entities for the employee directory.

pub mod department;
pub mod employee;

pub use department::Entity as Department;
pub use employee::Entity as Employee;
