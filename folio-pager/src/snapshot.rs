//! Saved pager state.

/// Everything needed to bring a pager back to the same page.
///
/// The adapter's own state travels along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerSnapshot {
    /// Current position when the snapshot was taken.
    pub position: usize,
    /// Output of [`PagerAdapter::save_state`](crate::PagerAdapter::save_state).
    pub adapter_state: Option<Vec<u8>>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_as_plain_fields() {
        let snapshot = PagerSnapshot {
            position: 7,
            adapter_state: Some(vec![1, 2]),
        };
        let json = serde_json::to_string(&snapshot).expect("serializable");
        assert_eq!(json, r#"{"position":7,"adapter_state":[1,2]}"#);
        let back: PagerSnapshot = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, snapshot);
    }
}
