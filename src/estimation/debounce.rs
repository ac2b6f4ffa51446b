//! Input coalescing

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::trace;

/// Coalesces bursts of values into one handler call
///
/// The handler receives the latest value once no new value has arrived for
/// the quiet window, or once `max_wait` has passed since the first value of
/// the burst. Each call is spawned, so a slow handler does not delay the
/// next window; pair it with an
/// [`EstimationCoordinator`](super::EstimationCoordinator) to drop stale
/// results.
///
/// Dropping the `Debouncer` flushes a pending value and stops the task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    pub fn spawn<F, Fut>(
        quiet: Duration,
        max_wait: Option<Duration>,
        handler: F,
    ) -> (Self, JoinHandle<()>)
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, quiet, max_wait, handler));
        (Self { tx }, task)
    }

    /// Submit a value. Returns `false` once the task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

async fn run<T, F, Fut>(
    mut rx: mpsc::UnboundedReceiver<T>,
    quiet: Duration,
    max_wait: Option<Duration>,
    mut handler: F,
) where
    T: Send + 'static,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    while let Some(first) = rx.recv().await {
        let ceiling = max_wait.map(|wait| Instant::now() + wait);
        let mut latest = first;
        let mut closed = false;

        loop {
            let quiet_deadline = Instant::now() + quiet;
            let deadline = match ceiling {
                Some(ceiling) => quiet_deadline.min(ceiling),
                None => quiet_deadline,
            };

            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => latest = value,
                    None => {
                        closed = true;
                        break;
                    }
                },
                _ = sleep_until(deadline) => break,
            }
        }

        trace!("Debounce window elapsed");
        tokio::spawn(handler(latest));
        if closed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn collecting() -> (
        mpsc::UnboundedReceiver<u32>,
        impl FnMut(u32) -> std::future::Ready<()> + Send + 'static,
    ) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let handler = move |value| {
            let _ = out_tx.send(value);
            std::future::ready(())
        };
        (out_rx, handler)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<u32>) -> Vec<u32> {
        let mut values = Vec::new();
        while let Ok(value) = rx.try_recv() {
            values.push(value);
        }
        values
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced() {
        let (mut out, handler) = collecting();
        let (debouncer, _task) = Debouncer::spawn(Duration::from_millis(100), None, handler);

        for value in 1..=3 {
            debouncer.push(value);
            sleep(Duration::from_millis(10)).await;
        }
        sleep(Duration::from_millis(150)).await;

        assert_eq!(drain(&mut out), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_wait_forces_progress() {
        let (mut out, handler) = collecting();
        let (debouncer, _task) = Debouncer::spawn(
            Duration::from_millis(100),
            Some(Duration::from_millis(300)),
            handler,
        );

        // A value every 70ms never leaves a 100ms gap
        for value in 0..8 {
            debouncer.push(value);
            sleep(Duration::from_millis(70)).await;
        }
        sleep(Duration::from_millis(200)).await;

        // Ceiling at 300ms takes the value sent at 280ms, the rest settle
        assert_eq!(drain(&mut out), vec![4, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending_value() {
        let (mut out, handler) = collecting();
        let (debouncer, task) = Debouncer::spawn(Duration::from_secs(10), None, handler);

        debouncer.push(42);
        drop(debouncer);
        task.await.unwrap();
        tokio::task::yield_now().await;

        assert_eq!(drain(&mut out), vec![42]);
    }
}
