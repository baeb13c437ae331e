//! Effective store resolution.

use crate::types::StoreId;

/// Final store after applying the future-date and critical-window rules.
///
/// Precedence:
/// 1. A future-dated order keeps its physical store.
/// 2. Inside the critical window a physical store is replaced by Central.
/// 3. Otherwise the candidate stands.
///
/// Central is never overridden. The function is pure, so the decision
/// endpoint and the gateway filter reach the same answer from the same
/// inputs.
#[must_use]
pub const fn effective_store(
    store_final: StoreId,
    is_future_date: bool,
    force_central: bool,
) -> StoreId {
    if is_future_date && store_final.is_physical() {
        return store_final;
    }
    if force_central && store_final.is_physical() {
        return StoreId::Central;
    }
    store_final
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_wins_over_window() {
        assert_eq!(effective_store(StoreId::Barreiro, true, true), StoreId::Barreiro);
        assert_eq!(effective_store(StoreId::Sion, true, true), StoreId::Sion);
    }

    #[test]
    fn test_window_forces_central_for_same_day() {
        assert_eq!(effective_store(StoreId::Barreiro, false, true), StoreId::Central);
        assert_eq!(effective_store(StoreId::Sion, false, true), StoreId::Central);
    }

    #[test]
    fn test_outside_window_keeps_store() {
        assert_eq!(effective_store(StoreId::Barreiro, false, false), StoreId::Barreiro);
        assert_eq!(effective_store(StoreId::Sion, true, false), StoreId::Sion);
    }

    #[test]
    fn test_central_is_never_overridden() {
        for future in [false, true] {
            for force in [false, true] {
                assert_eq!(effective_store(StoreId::Central, future, force), StoreId::Central);
            }
        }
    }
}
