pub mod employee_id;
pub mod validators;
