//! Text object motions: keystroke capture and execution

mod executor;
mod input;
mod request;
mod session;

pub use executor::{ExecutionReport, MotionError, MotionExecutor, DEFAULT_HIGHLIGHT_TIMEOUT};
pub use input::{DirectInput, InteractiveInput, Step, CANCEL_CHAR};
pub use request::{parse_count, MotionRequest, Operation, OperationPrefix, ParseError};
pub use session::{CaptureInput, CaptureSession, MotionRouter, OnCancel, OnComplete};
