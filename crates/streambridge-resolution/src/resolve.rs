//! The resolve callback handed to the consensus collaborator.

use crate::bind::bind;
use crate::error::{EngineError, ResolveError};
use async_trait::async_trait;
use streambridge_core::{decode, DatasetSchema, ParamData};
use tracing::debug;

/// Name of the resolution type this bridge feeds. The listener broadcasts
/// encoded bodies under this name; the host registers [`resolve`] for it.
pub const RESOLUTION_NAME: &str = "stream_event_resolution";

/// Caller identity attributed to every execution submitted by the bridge,
/// so deployed datasets can restrict their callables to it.
pub const CALLER_IDENTITY: &str = "streambridge";

/// One execution request against the target dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub dataset_id: String,
    pub callable: String,
    /// Positional arguments matching the callable's declared parameter
    /// list; `None` is the null placeholder for an unmatched parameter.
    pub args: Vec<Option<ParamData>>,
    /// Always [`CALLER_IDENTITY`] for bridge-originated executions.
    pub caller: String,
    /// Content-derived event identifier; the engine's idempotency key.
    pub tx_id: String,
}

/// The live execution engine, as seen from the resolve callback.
/// Implemented by the host; read-only schema access plus execution.
#[async_trait]
pub trait DatasetEngine: Send + Sync {
    /// Fetch the current schema of a dataset.
    async fn schema(&self, dataset_id: &str) -> Result<DatasetSchema, EngineError>;

    /// Submit one execution request.
    async fn execute(&self, req: ExecutionRequest) -> Result<(), EngineError>;
}

/// Resolve an agreed encoded body: decode, bind against the live schema,
/// and submit exactly one execution request.
pub async fn resolve(engine: &dyn DatasetEngine, body: &[u8]) -> Result<(), ResolveError> {
    let event = decode(body)?;
    debug!(
        dataset_id = %event.dataset_id,
        callable = %event.callable,
        "resolving agreed event"
    );

    let schema = engine.schema(&event.dataset_id).await?;
    let args = bind(&schema, &event.callable, &event.values)?;

    engine
        .execute(ExecutionRequest {
            tx_id: event.event_id(),
            dataset_id: event.dataset_id,
            callable: event.callable,
            args,
            caller: CALLER_IDENTITY.to_string(),
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use streambridge_core::{
        encode, event_id, ActionDef, ParamValue, StreamEvent,
    };

    /// Engine double that records execution requests.
    struct RecordingEngine {
        schema: DatasetSchema,
        executed: Mutex<Vec<ExecutionRequest>>,
    }

    impl RecordingEngine {
        fn with_action(params: &[&str]) -> Self {
            Self {
                schema: DatasetSchema {
                    procedures: vec![],
                    actions: vec![ActionDef {
                        name: "record".into(),
                        parameters: params.iter().map(|p| p.to_string()).collect(),
                    }],
                },
                executed: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl DatasetEngine for RecordingEngine {
        async fn schema(&self, _dataset_id: &str) -> Result<DatasetSchema, EngineError> {
            Ok(self.schema.clone())
        }

        async fn execute(&self, req: ExecutionRequest) -> Result<(), EngineError> {
            self.executed.lock().unwrap().push(req);
            Ok(())
        }
    }

    fn sample_event() -> StreamEvent {
        StreamEvent::new(
            vec![
                ParamValue::new("a", ParamData::scalar("3")),
                ParamValue::new("c", ParamData::scalar("4")),
            ],
            "xds1",
            "record",
            100,
            5,
            "chain-1",
        )
    }

    #[tokio::test]
    async fn resolve_executes_bound_call() {
        let engine = RecordingEngine::with_action(&["$a", "$b"]);
        let body = encode(&sample_event());

        resolve(&engine, &body).await.unwrap();

        let executed = engine.executed.lock().unwrap();
        assert_eq!(executed.len(), 1);
        let req = &executed[0];
        assert_eq!(req.dataset_id, "xds1");
        assert_eq!(req.callable, "record");
        assert_eq!(req.args, vec![Some(ParamData::scalar("3")), None]);
        assert_eq!(req.caller, CALLER_IDENTITY);
        assert_eq!(req.tx_id, event_id(100, 5, "chain-1"));
    }

    #[tokio::test]
    async fn resolve_rejects_malformed_body() {
        let engine = RecordingEngine::with_action(&["$a"]);
        let err = resolve(&engine, &[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, ResolveError::Codec(_)));
        assert!(engine.executed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_surfaces_missing_target() {
        let engine = RecordingEngine::with_action(&["$a"]);
        let mut event = sample_event();
        event.callable = "missing".into();
        let err = resolve(&engine, &encode(&event)).await.unwrap_err();
        assert!(matches!(err, ResolveError::Bind(_)));
        assert!(engine.executed.lock().unwrap().is_empty());
    }
}
