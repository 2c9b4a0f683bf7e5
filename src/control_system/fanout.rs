use std::future::Future;
use std::sync::Arc;

use log::error;
use tokio::task::JoinHandle;

/// Runs `op` on every item in its own task and waits for all of them.
///
/// Tasks are detached from the caller: dropping the returned future does
/// not abort transitions already running. A task that panics is logged and
/// never keeps the barrier from completing.
pub async fn fan_out<T, F, Fut>(items: &[Arc<T>], op: F)
where
    T: Send + Sync + 'static + ?Sized,
    F: Fn(Arc<T>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handles: Vec<JoinHandle<()>> = items
        .iter()
        .map(|item| tokio::spawn(op(Arc::clone(item))))
        .collect();
    join_all(handles).await;
}

/// Waits for every handle, logging tasks that did not finish cleanly.
pub async fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(e) = handle.await {
            error!("Signal task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn tasks_run_concurrently_and_all_finish() {
        let counters: Vec<Arc<AtomicUsize>> = (0..4).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let started = Instant::now();
        fan_out(&counters, |counter| async move {
            sleep(Duration::from_secs(2)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;
        assert!(started.elapsed() < Duration::from_millis(2050));
        assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_task_does_not_block_barrier() {
        let items: Vec<Arc<usize>> = (0..3).map(Arc::new).collect();
        let done = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&done);
        fan_out(&items, move |item| {
            let seen = Arc::clone(&seen);
            async move {
                if *item == 1 {
                    panic!("simulated hardware fault");
                }
                sleep(Duration::from_millis(10)).await;
                seen.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;
        assert_eq!(done.load(Ordering::SeqCst), 2);
    }
}
