use utoipa::OpenApi;

use crate::api::benefit::{BenefitTypeCount, CreateBenefit, UpdateBenefit};
use crate::api::department::{CreateDepartment, DepartmentRead, UpdateDepartment};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::employee_benefit::{CreateEmployeeBenefit, UpdateEmployeeBenefit};
use crate::api::payroll::{CreatePayroll, UpdatePayroll};
use crate::model::benefit::Benefit;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::employee_benefit::EmployeeBenefit;
use crate::model::payroll::Payroll;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR Records Backend

Record keeping for employees, departments, benefits, benefit assignments and
payroll entries.

### Endpoints
- **Employee**: CRUD plus name/position search, department and admission-date
  filters, count and pagination
- **Department**: CRUD with eager-loaded manager/employees, lookups by name,
  location, description, extension, manager and employee set
- **Benefit**: CRUD plus type/amount/status lookups, amount-range and combined
  filters, sorting and grouped counts
- **EmployeeBenefit**: benefit-to-employee assignments with referential checks
- **Payroll**: payroll entries per employee

### Response format
JSON bodies; 404 carries `{"message": "..."}`, storage failures surface as a
generic 500.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::search_employees,
        crate::api::employee::search_employees_by_name,
        crate::api::employee::search_employees_by_position,
        crate::api::employee::get_employees_by_department,
        crate::api::employee::get_employees_by_admission_range,
        crate::api::employee::count_employees,
        crate::api::employee::get_employees_paginated,

        crate::api::department::list_departments,
        crate::api::department::create_department,
        crate::api::department::get_department,
        crate::api::department::update_department,
        crate::api::department::delete_department,
        crate::api::department::get_department_by_name,
        crate::api::department::search_departments_by_name,
        crate::api::department::search_departments_by_location,
        crate::api::department::search_departments_by_description,
        crate::api::department::get_department_by_extension,
        crate::api::department::get_department_by_manager,
        crate::api::department::get_departments_by_employees,
        crate::api::department::count_departments,
        crate::api::department::get_departments_paginated,

        crate::api::benefit::list_benefits,
        crate::api::benefit::create_benefit,
        crate::api::benefit::get_benefit,
        crate::api::benefit::update_benefit,
        crate::api::benefit::delete_benefit,
        crate::api::benefit::search_benefits_by_name,
        crate::api::benefit::search_benefits_by_description,
        crate::api::benefit::get_benefits_by_type,
        crate::api::benefit::get_benefits_by_amount,
        crate::api::benefit::get_benefits_by_active,
        crate::api::benefit::get_benefits_by_amount_range,
        crate::api::benefit::get_benefits_sorted,
        crate::api::benefit::count_benefits,
        crate::api::benefit::count_benefits_by_type,
        crate::api::benefit::get_benefits_paginated,
        crate::api::benefit::filter_benefits,

        crate::api::employee_benefit::list_employee_benefits,
        crate::api::employee_benefit::create_employee_benefit,
        crate::api::employee_benefit::get_employee_benefit,
        crate::api::employee_benefit::update_employee_benefit,
        crate::api::employee_benefit::delete_employee_benefit,
        crate::api::employee_benefit::count_employee_benefits,
        crate::api::employee_benefit::get_employee_benefits_paginated,

        crate::api::payroll::list_payrolls,
        crate::api::payroll::create_payroll,
        crate::api::payroll::get_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::delete_payroll,
        crate::api::payroll::count_payrolls,
        crate::api::payroll::get_payrolls_paginated,
    ),
    components(schemas(
        Employee,
        Department,
        Benefit,
        EmployeeBenefit,
        Payroll,
        CreateEmployee,
        UpdateEmployee,
        CreateDepartment,
        UpdateDepartment,
        DepartmentRead,
        CreateBenefit,
        UpdateBenefit,
        BenefitTypeCount,
        CreateEmployeeBenefit,
        UpdateEmployeeBenefit,
        CreatePayroll,
        UpdatePayroll,
    )),
    tags(
        (name = "Employee", description = "Employee records"),
        (name = "Department", description = "Departments, managers and memberships"),
        (name = "Benefit", description = "Benefit catalog"),
        (name = "EmployeeBenefit", description = "Benefit assignments"),
        (name = "Payroll", description = "Payroll entries"),
    )
)]
pub struct ApiDoc;
