//! Key allocation for the in-memory stores
//!
//! Keys start at 1 and are never reused. The counter stops at `i32::MAX`
//! instead of wrapping onto existing keys.

use std::sync::atomic::{AtomicI32, Ordering};

use super::StorageError;

pub fn next_key(counter: &AtomicI32, resource: &'static str) -> Result<i32, StorageError> {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
        .map_err(|_| StorageError::KeyspaceExhausted { resource })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_out_sequential_keys() {
        let counter = AtomicI32::new(1);
        assert_eq!(next_key(&counter, "coupon").unwrap(), 1);
        assert_eq!(next_key(&counter, "coupon").unwrap(), 2);
    }

    #[test]
    fn refuses_to_wrap() {
        let counter = AtomicI32::new(i32::MAX - 1);
        assert_eq!(next_key(&counter, "address").unwrap(), i32::MAX - 1);

        let err = next_key(&counter, "address").unwrap_err();
        assert!(matches!(err, StorageError::KeyspaceExhausted { resource: "address" }));
        assert_eq!(counter.load(Ordering::SeqCst), i32::MAX);
    }
}
