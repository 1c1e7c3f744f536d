//! Optional Prometheus middleware exposing `/metrics`.
//!
//! [`MetricsLayer`] wraps the app whether or not a registry was built, so
//! the app type stays the same in both cases.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::warn;

/// Metric namespace for HTTP request counters and histograms.
pub(crate) const METRICS_NAMESPACE: &str = "complaints";
/// Path the Prometheus text exposition is served on.
pub(crate) const METRICS_ENDPOINT: &str = "/metrics";

/// Build the Prometheus middleware, logging and disabling it on failure.
pub(crate) fn build_prometheus() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(err) => {
            warn!(error = %err, "prometheus metrics disabled");
            None
        }
    }
}

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |metrics| Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            Self::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            Self::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
