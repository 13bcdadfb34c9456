use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

#[test]
fn redirect_waits_one_and_a_half_seconds() {
    assert_eq!(SUBMITTED_REDIRECT_DELAY, Duration::from_millis(1500));
}

#[test]
fn redirect_lands_on_catalogue_after_the_pause() {
    let log = RefCell::new(Vec::new());
    block_on(redirect_after(
        async { log.borrow_mut().push("paused".to_owned()) },
        || true,
        |path| log.borrow_mut().push(format!("navigate {path}")),
    ));
    assert_eq!(log.into_inner(), vec!["paused", "navigate /resources"]);
}

#[test]
fn redirect_skipped_once_page_is_left() {
    let navigated = RefCell::new(None::<String>);
    block_on(redirect_after(async {}, || false, |path| *navigated.borrow_mut() = Some(path.to_owned())));
    assert_eq!(navigated.into_inner(), None);
}
