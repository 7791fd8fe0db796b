use actix_web::web;

use crate::api::{benefit, department, employee, employee_benefit, payroll};

/// Fixed-path routes are registered before `/{id}` so they are matched first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            .service(
                web::resource("/search").route(web::get().to(employee::search_employees)),
            )
            .service(
                web::resource("/search/{name}")
                    .route(web::get().to(employee::search_employees_by_name)),
            )
            .service(
                web::resource("/position/{position}")
                    .route(web::get().to(employee::search_employees_by_position)),
            )
            .service(
                web::resource("/department/{department_id}")
                    .route(web::get().to(employee::get_employees_by_department)),
            )
            .service(
                web::resource("/admission-date-range")
                    .route(web::get().to(employee::get_employees_by_admission_range)),
            )
            .service(web::resource("/count").route(web::get().to(employee::count_employees)))
            .service(
                web::resource("/paginated")
                    .route(web::get().to(employee::get_employees_paginated)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    cfg.service(
        web::scope("/departments")
            .service(
                web::resource("")
                    .route(web::get().to(department::list_departments))
                    .route(web::post().to(department::create_department)),
            )
            .service(
                web::resource("/name/{name}")
                    .route(web::get().to(department::get_department_by_name)),
            )
            .service(
                web::resource("/search/name/{name}")
                    .route(web::get().to(department::search_departments_by_name)),
            )
            .service(
                web::resource("/search/location/{location}")
                    .route(web::get().to(department::search_departments_by_location)),
            )
            .service(
                web::resource("/search/description/{description}")
                    .route(web::get().to(department::search_departments_by_description)),
            )
            .service(
                web::resource("/extension/{extension}")
                    .route(web::get().to(department::get_department_by_extension)),
            )
            .service(
                web::resource("/manager/{manager_id}")
                    .route(web::get().to(department::get_department_by_manager)),
            )
            .service(
                web::resource("/by-employees")
                    .route(web::get().to(department::get_departments_by_employees)),
            )
            .service(web::resource("/count").route(web::get().to(department::count_departments)))
            .service(
                web::resource("/paginated")
                    .route(web::get().to(department::get_departments_paginated)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(department::get_department))
                    .route(web::put().to(department::update_department))
                    .route(web::delete().to(department::delete_department)),
            ),
    );

    cfg.service(
        web::scope("/benefits")
            .service(
                web::resource("")
                    .route(web::get().to(benefit::list_benefits))
                    .route(web::post().to(benefit::create_benefit)),
            )
            .service(
                web::resource("/name/{name}")
                    .route(web::get().to(benefit::search_benefits_by_name)),
            )
            .service(
                web::resource("/description/{description}")
                    .route(web::get().to(benefit::search_benefits_by_description)),
            )
            .service(
                web::resource("/type/{type}")
                    .route(web::get().to(benefit::get_benefits_by_type)),
            )
            .service(
                web::resource("/amount/{amount}")
                    .route(web::get().to(benefit::get_benefits_by_amount)),
            )
            .service(
                web::resource("/active/{active}")
                    .route(web::get().to(benefit::get_benefits_by_active)),
            )
            .service(
                web::resource("/by-amount-range")
                    .route(web::get().to(benefit::get_benefits_by_amount_range)),
            )
            .service(web::resource("/sorted").route(web::get().to(benefit::get_benefits_sorted)))
            .service(web::resource("/count").route(web::get().to(benefit::count_benefits)))
            .service(
                web::resource("/count-by-type")
                    .route(web::get().to(benefit::count_benefits_by_type)),
            )
            .service(
                web::resource("/paginated").route(web::get().to(benefit::get_benefits_paginated)),
            )
            .service(web::resource("/filter").route(web::get().to(benefit::filter_benefits)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(benefit::get_benefit))
                    .route(web::put().to(benefit::update_benefit))
                    .route(web::delete().to(benefit::delete_benefit)),
            ),
    );

    cfg.service(
        web::scope("/employee-benefits")
            .service(
                web::resource("")
                    .route(web::get().to(employee_benefit::list_employee_benefits))
                    .route(web::post().to(employee_benefit::create_employee_benefit)),
            )
            .service(
                web::resource("/count")
                    .route(web::get().to(employee_benefit::count_employee_benefits)),
            )
            .service(
                web::resource("/paginated")
                    .route(web::get().to(employee_benefit::get_employee_benefits_paginated)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee_benefit::get_employee_benefit))
                    .route(web::put().to(employee_benefit::update_employee_benefit))
                    .route(web::delete().to(employee_benefit::delete_employee_benefit)),
            ),
    );

    cfg.service(
        web::scope("/pay_rolls")
            .service(
                web::resource("")
                    .route(web::get().to(payroll::list_payrolls))
                    .route(web::post().to(payroll::create_payroll)),
            )
            .service(web::resource("/count").route(web::get().to(payroll::count_payrolls)))
            .service(
                web::resource("/paginated")
                    .route(web::get().to(payroll::get_payrolls_paginated)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(payroll::get_payroll))
                    .route(web::put().to(payroll::update_payroll))
                    .route(web::delete().to(payroll::delete_payroll)),
            ),
    );
}
