//! Reactive test harness: a tokio local set with the leptos executor
//! bound to it, so hooks can spawn and effects can run.

use std::future::Future;

use any_spawner::Executor;
use tokio::task::LocalSet;

pub(crate) async fn run_local<F: Future<Output = ()>>(body: F) {
    // Every test sets the same executor; only the first call wins.
    let _ = Executor::init_tokio();
    LocalSet::new().run_until(body).await;
}

/// Let spawned tasks and pending effects run
pub(crate) async fn settle() {
    for _ in 0..4 {
        leptos::task::tick().await;
    }
}
