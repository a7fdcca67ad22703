use crate::{
    api::{employee_deduction_incentive as adjustments, error::ApiError, index},
    store::AdjustmentStore,
};
use actix_web::web;

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 100 * 1024;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| ApiError::bad_request(err).into())
}

pub fn configure<S: AdjustmentStore>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(index).service(
        web::scope("/employeeDeductionIncentive")
            // /employeeDeductionIncentive
            .service(
                web::resource("")
                    .route(web::get().to(adjustments::list_records::<S>))
                    .route(web::post().to(adjustments::create_record::<S>)),
            )
            // /employeeDeductionIncentive/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(adjustments::get_records::<S>))
                    .route(web::put().to(adjustments::update_record::<S>))
                    .route(web::delete().to(adjustments::delete_record::<S>)),
            ),
    );
}
