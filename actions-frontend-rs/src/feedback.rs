/// Moments the platform may want to acknowledge (a haptic tick, a sound).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    CreateSucceeded,
    CreateFailed,
    ToggleSucceeded,
    DeleteSucceeded,
}

/// Fire-and-forget. Nothing a feedback sink does can change what the
/// controller does next.
pub trait Feedback {
    fn notify(&self, kind: FeedbackKind);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn notify(&self, _kind: FeedbackKind) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn notify(&self, kind: FeedbackKind) {
        log::debug!("feedback: {kind:?}");
    }
}

impl<T: Fn(FeedbackKind)> Feedback for T {
    fn notify(&self, kind: FeedbackKind) {
        self(kind)
    }
}
