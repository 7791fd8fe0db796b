pub mod benefit;
pub mod department;
pub mod employee;
pub mod employee_benefit;
pub mod payroll;
