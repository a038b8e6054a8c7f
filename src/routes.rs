use crate::{
    api::{attendance, dashboard, employee, health},
    config::Config,
    docs::ApiDoc,
    error::ApiError,
};
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Malformed bodies get the same {"detail": ...} shape as every other 400
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("JSON parse error - {err}")).into()
    }));

    cfg.service(health::health);

    cfg.service(
        // wildcard {_:.*} so the UI's JS/CSS assets resolve
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
    );

    // Paths are registered without a trailing slash, NormalizePath::trim strips it
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{employee_id}/attendance
                    .service(
                        web::resource("/{employee_id}/attendance")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::mark_attendance)),
                    ),
            )
            .service(
                web::resource("/dashboard").route(web::get().to(dashboard::dashboard_summary)),
            ),
    );
}
