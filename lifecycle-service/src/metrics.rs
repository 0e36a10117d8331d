use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, TextEncoder};

static WEBHOOK_EVENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "lifecycle_service_webhook_events_total",
            "Stream lifecycle webhook events handled by lifecycle-service",
        ),
        &["event", "outcome"],
    )
    .expect("failed to create lifecycle_service_webhook_events_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register lifecycle_service_webhook_events_total");
    counter
});

static SIGNATURE_VERIFICATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "lifecycle_service_signature_verifications_total",
            "Channel signature verification outcomes",
        ),
        &["outcome"],
    )
    .expect("failed to create lifecycle_service_signature_verifications_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register lifecycle_service_signature_verifications_total");
    counter
});

static ARCHIVE_REPORTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "lifecycle_service_archive_reports_total",
            "Archive ingestion report outcomes",
        ),
        &["outcome"],
    )
    .expect("failed to create lifecycle_service_archive_reports_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register lifecycle_service_archive_reports_total");
    counter
});

pub fn record_webhook_event(event: &str, outcome: &str) {
    WEBHOOK_EVENTS_TOTAL
        .with_label_values(&[event, outcome])
        .inc();
}

pub fn record_signature_verification(outcome: &str) {
    SIGNATURE_VERIFICATIONS_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

pub fn record_archive_report(outcome: &str) {
    ARCHIVE_REPORTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
