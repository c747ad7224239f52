// SPDX-License-Identifier: MPL-2.0
//! The singleton is process state, so everything runs in one test.

use std::time::Duration;
use toast_engine::config::{Config, Settings};
use toast_engine::notifications::{global, Position, PromiseMessages, ToastOptions};
use toast_engine::Error;

#[tokio::test(start_paused = true)]
async fn test_singleton_lifecycle() {
    assert!(!global::is_initialized());
    assert_eq!(
        global::success("too early", ToastOptions::new()),
        Err(Error::NotInitialized)
    );
    global::remove_toast(toast_engine::notifications::ToastId::new());
    global::clear_all_toasts();
    assert!(global::snapshot().is_empty());

    let bad = Config {
        max_toasts: Some(-3),
        ..Config::default()
    };
    assert!(matches!(
        global::init_with_config(&bad),
        Err(Error::InvalidConfig(_))
    ));
    assert!(!global::is_initialized());

    global::init(Settings::default()).unwrap();
    let sub = global::subscribe(|_| {}).unwrap();

    let id = global::info("hello", ToastOptions::new().persistent()).unwrap();
    global::set_position(Position::BottomLeft).unwrap();
    assert_eq!(global::toaster().unwrap().position(), Position::BottomLeft);

    assert!(global::configure(&Config {
        position: Some("nowhere".to_string()),
        ..Config::default()
    })
    .is_err());
    assert_eq!(global::toaster().unwrap().position(), Position::BottomLeft);

    let tracked = global::promise(
        async { Ok::<_, ()>(5) },
        PromiseMessages::new("Loading", "Loaded", "Failed"),
    )
    .unwrap();
    assert_eq!(tracked.await, Ok(5));
    assert_eq!(global::snapshot().len(), 2);

    global::remove_toast(id);
    global::remove_toast(id);
    assert_eq!(global::snapshot().len(), 1);

    sub.unsubscribe();
    global::dispose();
    assert!(!global::is_initialized());
    assert!(global::snapshot().is_empty());

    let reinit = global::init(Settings::default()).unwrap();
    assert!(reinit.is_empty());
    global::warning("fresh start", ToastOptions::new()).unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(global::snapshot().is_empty());
    global::dispose();
}
