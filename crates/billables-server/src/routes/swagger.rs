//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{ServiceRecordPage, ServiceRecordRequest, ServiceRecordResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::service_record::list_services,
        super::service_record::get_service,
        super::service_record::paid_between,
        super::service_record::started_between,
        super::service_record::ended_between,
        super::service_record::list_pending,
        super::service_record::list_cancelled,
        super::service_record::list_completed,
        super::service_record::create_service,
        super::service_record::update_service,
        super::service_record::delete_service,
        super::service_record::cancel_service,
        super::service_record::reactivate_service,
    ),
    info(
        title = "Billables API",
        version = "0.1.0",
        description = "Billable service records with payment reconciliation.\n\nStatus is derived from payments; cancellation and reactivation are explicit actions.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Services", description = "Service records - engagements, payments and status"),
    ),
    components(
        schemas(
            ServiceRecordRequest,
            ServiceRecordResponse,
            ServiceRecordPage,
        )
    ),
)]
pub struct ApiDoc;
