//! Top-level event dispatch and the function's single error boundary.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;

use crate::error::DispatchError;
use crate::event::{BatchMessage, BatchRecord, InboundEvent};
use crate::handlers::{ScheduleHandler, UserHandler};
use crate::response::Response;
use crate::router::Router;
use crate::users::UserService;

pub const UNSUPPORTED_EVENT: &str = "Tipo de evento no soportado";
pub const BATCH_PROCESSED: &str = "Mensajes de SQS procesados";
pub const INTERNAL_ERROR: &str = "Error interno en el servidor";

/// Work done for each decoded SQS message body.
#[async_trait]
pub trait RecordProcessor: Send + Sync {
    async fn process(&self, record: &BatchRecord, message: &Value) -> anyhow::Result<()>;
}

/// Default processor: logs the message and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecordProcessor;

#[async_trait]
impl RecordProcessor for LogRecordProcessor {
    async fn process(&self, record: &BatchRecord, message: &Value) -> anyhow::Result<()> {
        tracing::info!(
            message_id = record.message_id.as_deref().unwrap_or_default(),
            body = %message,
            "sqs message received"
        );
        Ok(())
    }
}

/// Entry point for every invocation. Built once per process and shared across invocations.
#[derive(Clone)]
pub struct Dispatcher {
    router: Router,
    schedules: ScheduleHandler,
    processor: Arc<dyn RecordProcessor>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Router::default(), ScheduleHandler::default())
    }
}

impl Dispatcher {
    pub fn new(router: Router, schedules: ScheduleHandler) -> Self {
        Self {
            router,
            schedules,
            processor: Arc::new(LogRecordProcessor),
        }
    }

    /// Default routes and schedules over the given user service.
    pub fn with_service(service: UserService) -> Self {
        Self::new(
            Router::new(UserHandler::new(service)),
            ScheduleHandler::default(),
        )
    }

    pub fn with_record_processor(mut self, processor: Arc<dyn RecordProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Handle one raw event. Never fails: errors become `500` responses.
    pub async fn dispatch(&self, raw: Value) -> Response {
        match self.try_dispatch(raw).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(error = %err, "event dispatch failed");
                internal_error(&err)
            }
        }
    }

    async fn try_dispatch(&self, raw: Value) -> Result<Response, DispatchError> {
        let event = InboundEvent::classify(raw).map_err(DispatchError::MalformedEnvelope)?;
        tracing::debug!(kind = event.kind(), "classified event");

        match event {
            InboundEvent::Http(request) => Ok(self.router.route(&request).await),
            InboundEvent::Scheduled(trigger) => Ok(self.schedules.handle(&trigger)),
            InboundEvent::Batch(batch) => self.process_batch(batch).await,
            InboundEvent::Unknown => {
                tracing::warn!("unsupported event shape");
                Ok(Response::message(StatusCode::BAD_REQUEST, UNSUPPORTED_EVENT))
            }
        }
    }

    /// Records are handled in order; the first failure aborts the rest of the batch.
    async fn process_batch(&self, batch: BatchMessage) -> Result<Response, DispatchError> {
        tracing::info!(records = batch.records.len(), "processing sqs batch");

        for (index, record) in batch.records.iter().enumerate() {
            let message: Value = serde_json::from_str(&record.body)
                .map_err(|source| DispatchError::RecordBody { index, source })?;
            self.processor
                .process(record, &message)
                .await
                .map_err(DispatchError::RecordProcessor)?;
        }

        Ok(Response::message(StatusCode::OK, BATCH_PROCESSED))
    }
}

fn internal_error(err: &DispatchError) -> Response {
    let detail = err.to_string();
    let message = if detail.is_empty() {
        INTERNAL_ERROR.to_string()
    } else {
        format!("{INTERNAL_ERROR}, {detail}")
    };
    Response::message(StatusCode::INTERNAL_SERVER_ERROR, &message)
}
