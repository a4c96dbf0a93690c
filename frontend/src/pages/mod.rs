pub mod employees;
pub mod leaves_admin;
pub mod leaves_employee;
pub mod onboarding;
pub mod profile;
pub mod salary;
