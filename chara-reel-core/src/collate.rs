//! Japanese-locale ordering for asset filenames.
//!
//! Uses the ICU4X collator with the `ja` tailoring and compiled-in data, so
//! the order matches what a browser's `localeCompare(a, b, 'ja')` produces.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

thread_local! {
    static JA_COLLATOR: Option<Collator> =
        match Collator::try_new(&locale!("ja").into(), CollatorOptions::new()) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("Japanese collator unavailable, falling back to code point order: {e}");
                None
            }
        };
}

/// Compare two strings with Japanese collation.
///
/// Strings the collator considers equal are ordered by code point, so the
/// result is a total order.
pub fn compare_ja(a: &str, b: &str) -> Ordering {
    JA_COLLATOR
        .with(|collator| match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
