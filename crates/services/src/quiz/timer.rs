use std::time::Duration;

use tokio::sync::oneshot;

/// How long feedback stays on screen before the next problem.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

/// Identifies the problem a scheduled advance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
    index: usize,
}

impl AdvanceTicket {
    #[must_use]
    pub(crate) fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One-shot delayed advance with explicit cancellation.
///
/// At most one delay is pending; scheduling a new one cancels the previous.
/// Dropping the timer cancels whatever is pending.
#[derive(Debug)]
pub struct AdvanceTimer {
    delay: Duration,
    pending: Option<oneshot::Sender<()>>,
}

impl AdvanceTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, ticket: AdvanceTicket) -> AdvanceDelay {
        self.cancel();
        let (tx, rx) = oneshot::channel();
        self.pending = Some(tx);
        AdvanceDelay {
            delay: self.delay,
            cancelled: rx,
            ticket,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(tx) = self.pending.take() {
            let _ = tx.send(());
        }
    }

    /// True while a scheduled delay is still being awaited.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

impl Default for AdvanceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DELAY)
    }
}

/// The future side of a scheduled advance.
#[derive(Debug)]
#[must_use = "an advance delay does nothing unless awaited"]
pub struct AdvanceDelay {
    delay: Duration,
    cancelled: oneshot::Receiver<()>,
    ticket: AdvanceTicket,
}

impl AdvanceDelay {
    #[must_use]
    pub fn ticket(&self) -> AdvanceTicket {
        self.ticket
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.delay
    }

    /// Waits out the delay. Returns `None` if the timer was cancelled or dropped first.
    pub async fn wait(self) -> Option<AdvanceTicket> {
        let Self {
            delay,
            mut cancelled,
            ticket,
        } = self;

        tokio::select! {
            biased;
            _ = &mut cancelled => None,
            () = tokio::time::sleep(delay) => Some(ticket),
        }
    }
}
