//! Tests for identifier and key types

use core_kernel::{ClaimKey, PolicyNumber, ReportId};
use std::collections::HashMap;

mod report_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(ReportId::new(), ReportId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ReportId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ReportId::new_v7();
        assert!(id1.as_uuid() < id2.as_uuid());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ReportId::prefix(), "RPT");
    }

    #[test]
    fn test_from_str_without_prefix() {
        let original = ReportId::new();
        let parsed: ReportId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("RPT-not-a-uuid".parse::<ReportId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = ReportId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}

mod key_tests {
    use super::*;

    #[test]
    fn test_claim_key_display() {
        assert_eq!(ClaimKey::new("CLM001").to_string(), "CLM001");
    }

    #[test]
    fn test_claim_key_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ClaimKey::from("CLM001"), 1);
        assert_eq!(map.get("CLM001"), Some(&1));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(PolicyNumber::from("pol1"), PolicyNumber::from("POL1"));
    }

    #[test]
    fn test_key_serde_transparent() {
        let key: ClaimKey = serde_json::from_str("\"CLM042\"").unwrap();
        assert_eq!(key.as_str(), "CLM042");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"CLM042\"");
    }
}
