use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Host event loop the widget schedules work on.
///
/// Everything runs on one thread, so tasks are not `Send`.
pub trait Runtime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
