//! Redirecting rendered output to an in-process delegate.
//!
//! Tests that assert on rendered documents install a delegate for the
//! duration of a scope instead of pointing `TESTDOC_DEST_DIR` at a
//! directory. Delegates are per thread and stacked, the innermost one
//! wins.

use std::cell::RefCell;
use std::rc::Rc;

use crate::session::RenderedDoc;

type Delegate = Rc<dyn Fn(&RenderedDoc)>;

thread_local! {
    static REDIRECTS: RefCell<Redirects> = RefCell::new(Redirects::default());
}

#[derive(Default)]
struct Redirects {
    next_id: u64,
    stack: Vec<(u64, Delegate)>,
}

/// Route rendered documents on this thread to `delegate` until the
/// returned guard is dropped.
#[must_use = "the redirect ends when the guard is dropped"]
pub fn redirect_output(delegate: impl Fn(&RenderedDoc) + 'static) -> RedirectGuard {
    REDIRECTS.with(|redirects| {
        let mut redirects = redirects.borrow_mut();
        let id = redirects.next_id;
        redirects.next_id += 1;
        redirects.stack.push((id, Rc::new(delegate)));
        RedirectGuard { id }
    })
}

pub(crate) fn current_redirect() -> Option<Delegate> {
    REDIRECTS.with(|redirects| {
        redirects
            .borrow()
            .stack
            .last()
            .map(|(_, delegate)| delegate.clone())
    })
}

/// Removes its redirect delegate when dropped, also during unwinding.
///
/// Each guard removes exactly the delegate it installed, so guards
/// dropped out of creation order leave the other delegates in place.
#[derive(Debug)]
pub struct RedirectGuard {
    id: u64,
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        REDIRECTS.with(|redirects| {
            let mut redirects = redirects.borrow_mut();
            if let Some(position) = redirects.stack.iter().position(|(id, _)| *id == self.id) {
                redirects.stack.remove(position);
            }
        });
    }
}
