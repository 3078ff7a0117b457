use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;

/// Resolves after `duration` on the browser's timer queue.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(_duration: Duration) {
    futures_util::future::pending::<()>().await;
}

/// Runs `task` outside any component scope. Used for work started from JS
/// callbacks, where no Dioxus scope is current.
#[cfg(target_arch = "wasm32")]
pub fn spawn_detached(task: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(task);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached(task: impl Future<Output = ()> + 'static) {
    dioxus::core::spawn_forever(task);
}

/// Calls `tick` every `period` for as long as the component is mounted.
pub fn use_interval(period: Duration, mut tick: impl FnMut() + 'static) {
    use_hook(move || {
        spawn(async move {
            loop {
                sleep(period).await;
                tick();
            }
        })
    });
}
