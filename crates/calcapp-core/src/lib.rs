//! Expression evaluation pipeline and persisted evaluation history.
//!
//! This crate holds both halves of calcapp:
//!
//! - the server-side boundary pipeline: request validation, delegation to an
//!   external evaluation engine, and a masking response mapper
//! - the client-side session: a bounded, persisted history log and the
//!   submission controller that drives one evaluation at a time
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use calcapp_core::{EvaluateService, EvaluationDelegate, FakeEngine};
//!
//! # async fn example() {
//! let engine = Arc::new(FakeEngine::new().with_answer("2 + 2 * 3", "8"));
//! let service = EvaluateService::new(EvaluationDelegate::new(engine));
//!
//! let response = service.handle_body(br#"{"expression": " 2 + 2 * 3 "}"#).await;
//! assert_eq!(response.status, 200);
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `CALCAPP_ENGINE` | Engine kind: `command`, `http` or `fake` (default: `command`) |
//! | `CALCAPP_ENGINE_COMMAND` | Program for the command engine (default: `qalc`) |
//! | `CALCAPP_ENGINE_URL` | Endpoint for the http engine |
//! | `CALCAPP_ENGINE_TIMEOUT_SECS` | Per-call engine deadline, `0` disables (default: 10) |

pub mod controller;
pub mod delegate;
pub mod engine;
pub mod errors;
pub mod history;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod response;
pub mod transport;
pub mod validate;

pub use controller::{ControllerState, IgnoreReason, SubmissionController, SubmitOutcome};
pub use delegate::EvaluationDelegate;
pub use engine::{
    CommandEngine, EngineConfig, EngineKind, EvaluationEngine, FakeEngine, HttpEngine,
};
pub use errors::{DelegationError, StorageError, TransportError, ValidationError};
pub use history::{DurableStorage, FileStorage, HistoryStore, HydrationPhase, MemoryStorage, Persistence};
pub use model::{
    EvaluationRequest, EvaluationResult, HistoryEntry, HISTORY_CAPACITY, HISTORY_STORAGE_KEY,
    MAX_EXPRESSION_CHARS,
};
pub use notify::{NoticeLevel, Notifier, RecordingNotifier};
pub use pipeline::EvaluateService;
pub use response::{
    map_outcome, BoundaryResponse, ErrorResponse, EvaluateError, FailureKind, ResponseBody,
    DELEGATION_FAILURE_MESSAGE,
};
pub use transport::{BoundaryReply, EvaluateTransport, HttpTransport};
pub use validate::{
    expression_len, trim_expression, validate_body, validate_expression, validate_payload,
};
