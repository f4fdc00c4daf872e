// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use praxis_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_settings() {
        let err = CoreError::InvalidSettings("month_cell_event_cap must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid settings: month_cell_event_cap must be at least 1"
        );
    }

    #[test]
    fn invalid_timezone() {
        let err = CoreError::InvalidTimezone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "Unknown timezone: Mars/Olympus");
    }

    #[test]
    fn invalid_time() {
        let err = CoreError::InvalidTime("'25:00' is not a valid HH:MM time".into());
        assert_eq!(
            err.to_string(),
            "Invalid time of day: '25:00' is not a valid HH:MM time"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("a client must be selected".into());
        assert_eq!(err.to_string(), "Validation failed: a client must be selected");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad float".into());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization_empty_message() {
        let err = CoreError::Deserialization(String::new());
        assert_eq!(err.to_string(), "Deserialization error: ");
    }

    #[test]
    fn umlauts_are_kept() {
        let err = CoreError::ValidationError("Klient für März fehlt".into());
        assert!(err.to_string().ends_with("Klient für März fehlt"));
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let result: Result<Vec<String>, _> = serde_json::from_str("[1, 2");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn question_mark_converts() {
        fn parse(json: &str) -> Result<u32, CoreError> {
            Ok(serde_json::from_str(json)?)
        }
        assert_eq!(parse("7").unwrap(), 7);
        assert!(matches!(parse("\"sieben\""), Err(CoreError::Deserialization(_))));
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::InvalidTimezone("X".into()));
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn core_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
