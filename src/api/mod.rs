use actix_web::{Responder, get};

pub mod employee_deduction_incentive;
pub mod error;

#[get("/")]
pub async fn index() -> impl Responder {
    "API is running"
}
