use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle that stops a running search from any thread.
///
/// Cancelling raises a flag checked before every visited entry and posts a
/// wake-up message so a producer blocked on the hand-off returns at once.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
    wake: Sender<()>,
}

impl CancelHandle {
    /// Requests cancellation. Repeated calls have no further effect.
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::AcqRel) {
            let _ = self.wake.try_send(());
        }
    }

    /// Reports whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Producer side of the cancellation signal.
#[derive(Debug)]
pub(crate) struct CancelSignal {
    flag: Arc<AtomicBool>,
    wake: Receiver<()>,
}

impl CancelSignal {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Receiver that becomes ready on cancellation or when every
    /// [`CancelHandle`] has been dropped.
    pub(crate) fn wake(&self) -> &Receiver<()> {
        &self.wake
    }
}

pub(crate) fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let flag = Arc::new(AtomicBool::new(false));
    let (wake_tx, wake_rx) = bounded(1);
    (
        CancelHandle {
            flag: Arc::clone(&flag),
            wake: wake_tx,
        },
        CancelSignal {
            flag,
            wake: wake_rx,
        },
    )
}
