//! Page teardown registry.
//!
//! Components register cleanup hooks as they wire themselves into the page;
//! the exported `destroy()` runs them all, removing listeners, timers and the
//! animation loop.

use std::cell::RefCell;

thread_local! {
	static HOOKS: RefCell<Vec<Box<dyn FnOnce()>>> = RefCell::new(Vec::new());
}

/// Run `f` when the page is torn down.
pub fn on_teardown(f: impl FnOnce() + 'static) {
	HOOKS.with(|hooks| hooks.borrow_mut().push(Box::new(f)));
}

/// Keep `value` alive until teardown, then drop it.
pub fn keep_until_teardown<T: 'static>(value: T) {
	on_teardown(move || drop(value));
}

/// Run and forget every registered hook, most recent first. Returns how many ran.
pub fn run() -> usize {
	// Take the hooks out first so a hook may register again without a double borrow.
	let hooks = HOOKS.with(|hooks| std::mem::take(&mut *hooks.borrow_mut()));
	let count = hooks.len();
	for hook in hooks.into_iter().rev() {
		hook();
	}
	count
}
