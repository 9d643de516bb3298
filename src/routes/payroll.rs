use actix_web::web;

use crate::handlers::payroll;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payroll")
            .route("/preview", web::post().to(payroll::preview))
            .route("/lines/resolve", web::post().to(payroll::resolve_line))
            .route("/prorate", web::post().to(payroll::prorate))
            .route("/rates/effective", web::post().to(payroll::effective_rates))
            .route("/slips", web::post().to(payroll::create_slip))
            .route("/slips", web::get().to(payroll::list_slips))
            .route("/slips/{id}", web::get().to(payroll::get_slip))
            .route(
                "/slips/{id}/status",
                web::put().to(payroll::update_slip_status),
            )
            .route("/slips/{id}", web::delete().to(payroll::delete_slip)),
    );
}
