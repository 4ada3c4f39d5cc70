//! Capturing keyboard input for a pending motion
//!
//! A [`CaptureSession`] owns one parser plus the context overrides it made
//! when it started. It ends exactly once, by completing or cancelling; in
//! both cases it is torn down before the caller's continuation runs, so no
//! continuation can observe a half-active capture.
//!
//! [`MotionRouter`] holds at most one session and routes input to it.

use super::input::{DirectInput, InteractiveInput, Step};
use super::request::{MotionRequest, ParseError};
use crate::host::{keys, ContextKeys, Subscription};

/// Called with the parsed motion
pub type OnComplete = Box<dyn FnOnce(MotionRequest) + Send>;
/// Called when the motion is abandoned
pub type OnCancel = Box<dyn FnOnce() + Send>;

/// Input delivered to the active session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureInput {
    /// A raw typed character
    Char(char),
    /// Explicit abort (Esc)
    Cancel,
    /// A cursor or selection moved by some other means
    SelectionChanged,
}

#[derive(Debug)]
enum Parser {
    Direct(DirectInput),
    Interactive(InteractiveInput),
}

impl Parser {
    fn feed(self, c: char) -> Step<Parser> {
        match self {
            Parser::Direct(input) => match input.feed(c) {
                Step::Pending(next) => Step::Pending(Parser::Direct(next)),
                Step::Complete(request) => Step::Complete(request),
                Step::Cancel => Step::Cancel,
            },
            Parser::Interactive(input) => match input.feed(c) {
                Step::Pending(next) => Step::Pending(Parser::Interactive(next)),
                Step::Complete(request) => Step::Complete(request),
                Step::Cancel => Step::Cancel,
            },
        }
    }

    fn pending_keys(&self) -> String {
        match self {
            Parser::Direct(input) => input.pending_keys(),
            Parser::Interactive(input) => input.pending_keys().to_string(),
        }
    }
}

pub struct CaptureSession {
    parser: Option<Parser>,
    on_complete: Option<OnComplete>,
    on_cancel: Option<OnCancel>,
    subscriptions: Vec<Subscription>,
}

impl CaptureSession {
    fn start(
        parser: Parser,
        context: &ContextKeys,
        on_complete: OnComplete,
        on_cancel: OnCancel,
    ) -> Self {
        tracing::debug!(keys = %parser.pending_keys(), "motion capture started");
        Self {
            parser: Some(parser),
            on_complete: Some(on_complete),
            on_cancel: Some(on_cancel),
            subscriptions: vec![
                context.scoped(keys::CAPTURING, true),
                context.scoped(keys::MODAL_LAYERS, false),
                context.scoped(keys::TEXT_INPUT, false),
            ],
        }
    }

    /// Start a capture whose operation is already known, e.g. `"di"`
    pub fn direct(
        prefix: &str,
        context: &ContextKeys,
        on_complete: OnComplete,
        on_cancel: OnCancel,
    ) -> Result<Self, ParseError> {
        let input = DirectInput::parse(prefix)?;
        Ok(Self::start(Parser::Direct(input), context, on_complete, on_cancel))
    }

    /// Start a capture that reads the whole motion from the keyboard
    pub fn interactive(
        context: &ContextKeys,
        on_complete: OnComplete,
        on_cancel: OnCancel,
    ) -> Self {
        Self::start(
            Parser::Interactive(InteractiveInput::new()),
            context,
            on_complete,
            on_cancel,
        )
    }

    pub fn is_active(&self) -> bool {
        self.parser.is_some()
    }

    /// Keys typed so far, empty once the session has ended
    pub fn pending_keys(&self) -> String {
        self.parser.as_ref().map(Parser::pending_keys).unwrap_or_default()
    }

    /// Deliver one input. Returns whether the session is still active.
    pub fn handle(&mut self, input: CaptureInput) -> bool {
        let Some(parser) = self.parser.take() else {
            return false;
        };

        let step = match input {
            CaptureInput::Char(c) => parser.feed(c),
            CaptureInput::Cancel | CaptureInput::SelectionChanged => Step::Cancel,
        };

        match step {
            Step::Pending(next) => {
                self.parser = Some(next);
                true
            }
            Step::Complete(request) => {
                self.complete(request);
                false
            }
            Step::Cancel => {
                self.cancel();
                false
            }
        }
    }

    fn complete(&mut self, request: MotionRequest) {
        tracing::debug!(motion = %request, "motion capture complete");
        let on_complete = self.on_complete.take();
        self.destroy();
        if let Some(on_complete) = on_complete {
            on_complete(request);
        }
    }

    /// Abandon the capture and notify the caller
    pub fn cancel(&mut self) {
        let on_cancel = self.on_cancel.take();
        self.destroy();
        if let Some(on_cancel) = on_cancel {
            tracing::debug!("motion capture cancelled");
            on_cancel();
        }
    }

    /// Release everything the session holds. Safe to call repeatedly; no
    /// continuation runs from here.
    pub fn destroy(&mut self) {
        self.parser = None;
        self.on_complete = None;
        self.on_cancel = None;
        for mut subscription in self.subscriptions.drain(..) {
            subscription.release();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Routes raw input to the active capture session, if any
#[derive(Default)]
pub struct MotionRouter {
    context: ContextKeys,
    active: Option<CaptureSession>,
}

impl MotionRouter {
    pub fn new(context: ContextKeys) -> Self {
        Self {
            context,
            active: None,
        }
    }

    pub fn context(&self) -> &ContextKeys {
        &self.context
    }

    pub fn is_capturing(&self) -> bool {
        self.active.as_ref().is_some_and(CaptureSession::is_active)
    }

    pub fn pending_keys(&self) -> Option<String> {
        self.active
            .as_ref()
            .filter(|session| session.is_active())
            .map(CaptureSession::pending_keys)
    }

    /// Start a direct capture, cancelling any capture already running
    pub fn start_direct(
        &mut self,
        prefix: &str,
        on_complete: OnComplete,
        on_cancel: OnCancel,
    ) -> Result<(), ParseError> {
        // Validate before touching the running session
        DirectInput::parse(prefix)?;
        self.cancel();
        self.active = Some(CaptureSession::direct(prefix, &self.context, on_complete, on_cancel)?);
        Ok(())
    }

    /// Start an interactive capture, cancelling any capture already running
    pub fn start_interactive(&mut self, on_complete: OnComplete, on_cancel: OnCancel) {
        self.cancel();
        self.active = Some(CaptureSession::interactive(&self.context, on_complete, on_cancel));
    }

    /// Deliver input to the active session. Returns `false` when there was
    /// no session, so the caller can handle the input normally.
    pub fn dispatch(&mut self, input: CaptureInput) -> bool {
        let Some(session) = self.active.as_mut() else {
            return false;
        };
        if !session.handle(input) {
            self.active = None;
        }
        true
    }

    pub fn cancel(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default, Clone)]
    struct Outcomes {
        completed: Arc<Mutex<Vec<MotionRequest>>>,
        cancelled: Arc<Mutex<usize>>,
    }

    impl Outcomes {
        fn callbacks(&self) -> (OnComplete, OnCancel) {
            let completed = self.completed.clone();
            let cancelled = self.cancelled.clone();
            (
                Box::new(move |request| completed.lock().push(request)),
                Box::new(move || *cancelled.lock() += 1),
            )
        }

        fn completed(&self) -> Vec<MotionRequest> {
            self.completed.lock().clone()
        }

        fn cancelled(&self) -> usize {
            *self.cancelled.lock()
        }
    }

    fn type_keys(router: &mut MotionRouter, keys: &str) {
        for c in keys.chars() {
            router.dispatch(CaptureInput::Char(c));
        }
    }

    #[test]
    fn test_interactive_completes_once() {
        let outcomes = Outcomes::default();
        let mut router = MotionRouter::default();
        let (done, cancel) = outcomes.callbacks();
        router.start_interactive(done, cancel);

        type_keys(&mut router, "2di(");
        assert!(!router.is_capturing());
        assert_eq!(outcomes.completed().len(), 1);
        assert_eq!(outcomes.completed()[0].to_string(), "2di(");
        assert_eq!(outcomes.cancelled(), 0);

        // nothing left to route to
        assert!(!router.dispatch(CaptureInput::Char('x')));
    }

    #[test]
    fn test_context_keys_follow_capture() {
        let context = ContextKeys::new();
        context.set(keys::MODAL_LAYERS, true);
        context.set(keys::TEXT_INPUT, true);
        let mut router = MotionRouter::new(context.clone());
        let outcomes = Outcomes::default();

        let (done, cancel) = outcomes.callbacks();
        router.start_direct("di", done, cancel).unwrap();
        assert!(context.get(keys::CAPTURING));
        assert!(!context.get(keys::MODAL_LAYERS));
        assert!(!context.get(keys::TEXT_INPUT));
        assert_eq!(router.pending_keys().as_deref(), Some("di"));

        type_keys(&mut router, "(");
        assert!(!context.get(keys::CAPTURING));
        assert!(context.get(keys::MODAL_LAYERS));
        assert!(context.get(keys::TEXT_INPUT));
    }

    #[test]
    fn test_cancel_char_at_every_state() {
        for typed in ["", "2", "2d", "2di"] {
            let outcomes = Outcomes::default();
            let mut router = MotionRouter::default();
            let (done, cancel) = outcomes.callbacks();
            router.start_interactive(done, cancel);

            type_keys(&mut router, typed);
            type_keys(&mut router, "\n");
            type_keys(&mut router, "\n");
            router.cancel();

            assert_eq!(outcomes.cancelled(), 1, "after {typed:?}");
            assert!(outcomes.completed().is_empty());
            assert!(!router.context().get(keys::CAPTURING));
        }
    }

    #[test]
    fn test_selection_change_cancels() {
        let outcomes = Outcomes::default();
        let mut router = MotionRouter::default();
        let (done, cancel) = outcomes.callbacks();
        router.start_direct("ya", done, cancel).unwrap();

        type_keys(&mut router, "3");
        assert!(router.dispatch(CaptureInput::SelectionChanged));
        assert_eq!(outcomes.cancelled(), 1);
        assert!(!router.is_capturing());
    }

    #[test]
    fn test_direct_digit_then_cancel_key() {
        let outcomes = Outcomes::default();
        let mut router = MotionRouter::default();
        let (done, cancel) = outcomes.callbacks();
        router.start_direct("di", done, cancel).unwrap();

        router.dispatch(CaptureInput::Cancel);
        assert_eq!(outcomes.cancelled(), 1);
        assert!(outcomes.completed().is_empty());
    }

    #[test]
    fn test_new_capture_cancels_previous() {
        let first = Outcomes::default();
        let second = Outcomes::default();
        let mut router = MotionRouter::default();

        let (done, cancel) = first.callbacks();
        router.start_direct("di", done, cancel).unwrap();
        let (done, cancel) = second.callbacks();
        router.start_interactive(done, cancel);

        assert_eq!(first.cancelled(), 1);
        type_keys(&mut router, "vi{");
        assert_eq!(second.completed().len(), 1);
        assert!(first.completed().is_empty());
    }

    #[test]
    fn test_bad_prefix_leaves_running_capture() {
        let outcomes = Outcomes::default();
        let mut router = MotionRouter::default();
        let (done, cancel) = outcomes.callbacks();
        router.start_interactive(done, cancel);

        let (done, cancel) = Outcomes::default().callbacks();
        assert!(router.start_direct("zz", done, cancel).is_err());
        assert!(router.is_capturing());
        assert_eq!(outcomes.cancelled(), 0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let context = ContextKeys::new();
        let outcomes = Outcomes::default();
        let (done, cancel) = outcomes.callbacks();
        let mut session = CaptureSession::interactive(&context, done, cancel);

        session.destroy();
        session.destroy();
        session.cancel();
        assert!(!session.is_active());
        assert!(!session.handle(CaptureInput::Char('d')));
        assert_eq!(outcomes.cancelled(), 0);
        assert!(!context.get(keys::CAPTURING));
    }
}
