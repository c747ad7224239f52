// SPDX-License-Identifier: MPL-2.0
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use toast_engine::config::{self, Config, Settings};
use toast_engine::notifications::{
    PromiseMessages, ToastKind, ToastOptions, ToastRequest, ToastStatus, Toaster,
};
use toast_engine::Error;

fn new_toaster(max_toasts: usize) -> Toaster {
    Toaster::new(Settings {
        max_toasts,
        ..Settings::default()
    })
    .expect("runtime available")
}

fn persistent() -> ToastOptions {
    ToastOptions::new().persistent()
}

#[tokio::test(start_paused = true)]
async fn test_toast_is_present_until_its_duration_elapses() {
    let toaster = new_toaster(5);
    let id = toaster
        .success("Saved", ToastOptions::new().duration(Duration::from_millis(2500)))
        .unwrap();

    for _ in 0..24 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(toaster.get(id).is_some());
    }
    tokio::time::sleep(Duration::from_millis(99)).await;
    assert!(toaster.get(id).is_some());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(toaster.snapshot().iter().all(|t| t.id() != id));
}

#[tokio::test(start_paused = true)]
async fn test_persistent_toast_outlives_any_delay() {
    let toaster = new_toaster(5);
    let id = toaster.error("Payment failed", persistent()).unwrap();

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert!(toaster.get(id).is_some());

    toaster.remove_toast(id);
    assert!(toaster.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_visible_count_never_exceeds_cap() {
    let toaster = new_toaster(3);
    let violations = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&violations);
    let _sub = toaster.subscribe(move |snapshot| {
        if snapshot.iter().filter(|t| t.is_visible()).count() > 3 {
            *counter.lock() += 1;
        }
    });

    for i in 0..20u64 {
        let options = if i % 3 == 0 {
            persistent()
        } else {
            ToastOptions::new().duration(Duration::from_millis(50 * (i + 1)))
        };
        toaster.info(format!("toast {i}"), options).unwrap();
        assert!(toaster.visible_count() <= 3);
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(*violations.lock(), 0);
    assert!(toaster.visible_count() <= 3);
}

#[tokio::test(start_paused = true)]
async fn test_removing_visible_promotes_oldest_queued() {
    let toaster = new_toaster(2);
    let a = toaster.info("A", persistent()).unwrap();
    let b = toaster.info("B", persistent()).unwrap();
    let c = toaster.info("C", persistent()).unwrap();
    let d = toaster.info("D", persistent()).unwrap();

    let status = |id| toaster.get(id).map(|t| t.status());
    assert_eq!(status(a), Some(ToastStatus::Visible));
    assert_eq!(status(b), Some(ToastStatus::Visible));
    assert_eq!(status(c), Some(ToastStatus::Queued));
    assert_eq!(status(d), Some(ToastStatus::Queued));

    toaster.remove_toast(a);

    let visible: Vec<_> = toaster.visible().iter().map(|t| t.id()).collect();
    assert_eq!(visible, [b, c]);
    assert_eq!(status(d), Some(ToastStatus::Queued));
}

#[tokio::test(start_paused = true)]
async fn test_promise_keeps_one_toast_through_success() {
    let toaster = new_toaster(5);
    let ids = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&ids);
    let _sub = toaster.subscribe(move |snapshot| {
        seen.lock().extend(snapshot.iter().map(|t| t.id()));
    });

    let tracked = toaster
        .promise(
            async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                Ok::<_, String>("payload")
            },
            PromiseMessages::new("L", "S", "E"),
        )
        .unwrap();
    assert_eq!(tracked.await, Ok("payload"));

    let snapshot = toaster.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title(), "S");
    assert_eq!(snapshot[0].kind(), ToastKind::Success);

    let ids = ids.lock();
    assert!(ids.iter().all(|id| *id == snapshot[0].id()));
}

#[tokio::test(start_paused = true)]
async fn test_promise_rejection_reaches_caller() {
    #[derive(Debug, PartialEq)]
    struct Declined(u16);

    let toaster = new_toaster(5);
    let tracked = toaster
        .promise(
            async { Err::<(), _>(Declined(402)) },
            PromiseMessages::new("L", "S", "E"),
        )
        .unwrap();

    assert_eq!(tracked.await, Err(Declined(402)));
    let snapshot = toaster.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title(), "E");
    assert_eq!(snapshot[0].kind(), ToastKind::Error);
}

#[tokio::test(start_paused = true)]
async fn test_clear_leaves_no_timers_behind() {
    let toaster = new_toaster(5);
    for i in 0..4 {
        toaster
            .warning(format!("w{i}"), ToastOptions::new().duration(Duration::from_millis(100)))
            .unwrap();
    }

    toaster.clear_all_toasts();
    assert!(toaster.snapshot().is_empty());

    let id = toaster.info("after clear", persistent()).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(toaster.snapshot().len(), 1);
    assert_eq!(toaster.snapshot()[0].id(), id);
}

#[tokio::test(start_paused = true)]
async fn test_double_and_unknown_removal_are_harmless() {
    let toaster = new_toaster(5);
    let keep = toaster.info("keep", persistent()).unwrap();
    let gone = toaster.info("gone", persistent()).unwrap();
    let other = new_toaster(5);
    let foreign = other.info("elsewhere", persistent()).unwrap();

    toaster.remove_toast(gone);
    toaster.remove_toast(gone);
    toaster.remove_toast(foreign);

    assert_eq!(toaster.len(), 1);
    assert!(toaster.get(keep).is_some());
    assert_eq!(other.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_removal_racing_timer_is_harmless() {
    let toaster = new_toaster(5);
    let id = toaster
        .info("race", ToastOptions::new().duration(Duration::from_millis(100)))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    toaster.remove_toast(id);
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(toaster.is_empty());
    assert_eq!(toaster.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_textual_kind_from_payload_is_validated() {
    let toaster = new_toaster(5);

    let request = ToastRequest::parse("warning", "Seats running low").unwrap();
    assert!(toaster.add_toast(request).is_ok());

    assert!(matches!(
        ToastRequest::parse("celebration", "Party"),
        Err(Error::InvalidToast(_))
    ));
    assert_eq!(toaster.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_provider_config_file_drives_toaster() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("toasts.toml");
    let provider = Config {
        position: Some("bottom-center".to_string()),
        max_toasts: Some(1),
        info_duration_ms: Some(200),
        ..Config::default()
    };
    config::save_to_path(&provider, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let toaster = Toaster::new(loaded.validate().unwrap()).unwrap();

    toaster.info("first", ToastOptions::new()).unwrap();
    toaster.info("second", ToastOptions::new()).unwrap();
    assert_eq!(toaster.visible_count(), 1);

    tokio::time::sleep(Duration::from_millis(201)).await;
    assert_eq!(toaster.len(), 1);
    assert_eq!(toaster.snapshot()[0].title(), "second");
    assert!(toaster.snapshot()[0].is_visible());

    dir.close().expect("Failed to close temporary directory");
}
