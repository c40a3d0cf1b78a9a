use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use omni_widget::Runtime;

/// Spawns onto the surrounding `tokio::task::LocalSet`.
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}
