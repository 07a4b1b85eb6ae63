use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::middleware::request_trace::TraceId;

/// Fields of one `request_completed` event.
///
/// `route` is the matched pattern (`/parcels/{id}/cancel`), so parcel and
/// user ids never reach the access log.
struct Completed {
    method: String,
    route: String,
    trace_id: String,
    bearer: bool,
}

impl Completed {
    fn emit(&self, status: StatusCode, duration_us: u64) {
        let code = status.as_u16();
        if status.is_server_error() {
            error!(http.method = %self.method, http.route = %self.route, http.status_code = code, duration_us, bearer = self.bearer, trace_id = %self.trace_id, "request_completed");
        } else if status.is_client_error() {
            warn!(http.method = %self.method, http.route = %self.route, http.status_code = code, duration_us, bearer = self.bearer, trace_id = %self.trace_id, "request_completed");
        } else {
            info!(http.method = %self.method, http.route = %self.route, http.status_code = code, duration_us, bearer = self.bearer, trace_id = %self.trace_id, "request_completed");
        }
    }
}

/// Access log: one `request_completed` event per request, levelled by status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let completed = Completed {
            method: req.method().to_string(),
            route: req
                .match_pattern()
                .unwrap_or_else(|| "unmatched".to_string()),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|t| t.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            bearer: req.headers().contains_key(header::AUTHORIZATION),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            completed.emit(status, duration_us);
            result
        })
    }
}
