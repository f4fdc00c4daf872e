// ═══════════════════════════════════════════════════════════════════
// Integration Tests — PracticeCore over API-shaped JSON snapshots
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, NaiveDateTime};
use tracing_subscriber::EnvFilter;

use praxis_core::models::calendar::{CalendarView, Direction, ViewMode};
use praxis_core::models::client::Client;
use praxis_core::models::list::SortConfig;
use praxis_core::PracticeCore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dt(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("praxis_core=debug"))
        .with_test_writer()
        .try_init();
}

const APPOINTMENTS_JSON: &str = r#"[
    {"_id": "a1", "datum": "2024-03-05T08:00:00.000Z", "dauer": 30, "status": "geplant", "klientName": "Anna Muster"},
    {"_id": "a2", "datum": "2024-03-05T08:00:00.000Z", "dauer": 45, "status": "abgeschlossen", "klientName": "Bernd Beispiel"},
    {"_id": "a3", "datum": "2024-03-05T13:00:00.000Z", "dauer": 60, "status": "abgesagt", "klientName": "Carla Test"},
    {"_id": "a4", "datum": "kaputt", "dauer": 60, "status": "geplant", "klientName": "Dora Defekt"},
    {"_id": "a5", "datum": "2024-03-20T09:30:00.000Z", "dauer": 50, "status": "geplant", "klientName": "Anna Muster"},
    {"_id": "a6", "datum": "2024-03-21T09:30:00.000Z", "status": "geplant", "klientName": "Ohne Dauer"}
]"#;

const INVOICES_JSON: &str = r#"[
    {"_id": "r1", "rechnungsnummer": "2024-001", "monat": 1, "jahr": 2024, "empfaenger": "klient",
     "klientName": "Anna Muster", "artDerMassnahme": "Einzeltherapie", "gesamtBetrag": 100},
    {"_id": "r2", "rechnungsnummer": "2024-002", "monat": 2, "jahr": 2024, "empfaenger": "auftraggeber",
     "klientName": "Bernd Beispiel", "artDerMassnahme": "Gruppentherapie",
     "auftraggeberName": "Jugendamt Köln", "gesamtBetrag": 50},
    {"_id": "r3", "rechnungsnummer": "2024-003", "monat": 1, "jahr": 2024, "empfaenger": "klient",
     "klientName": "Carla Test", "artDerMassnahme": "Einzeltherapie", "gesamtBetrag": 25}
]"#;

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn defaults_and_settings_json_agree() {
        let from_json = PracticeCore::from_settings_json("{}").unwrap();
        assert_eq!(from_json.settings(), PracticeCore::with_defaults().settings());
        assert_eq!(PracticeCore::default().settings().timezone, "Europe/Berlin");
    }

    #[test]
    fn invalid_settings_fail() {
        assert!(PracticeCore::from_settings_json(r#"{"first_hour": 20}"#).is_err());
        assert!(PracticeCore::from_settings_json(r#"{"timezone": "Nowhere"}"#).is_err());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(PracticeCore::parse_appointments("{").is_err());
        assert!(PracticeCore::parse_invoices(r#"{"_id": "not-an-array"}"#).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Sparse & broken records
// ═══════════════════════════════════════════════════════════════════

mod sparse_records {
    use super::*;
    use praxis_core::models::appointment::AppointmentStatus;
    use praxis_core::models::invoice::RecipientKind;

    const WITH_NULLS_JSON: &str = r#"[
        {"_id": "ok", "datum": "2024-03-05T08:00:00.000Z", "dauer": 30, "status": "geplant", "klientName": "Anna Muster"},
        {"_id": "no-status", "datum": "2024-03-05T09:00:00.000Z", "dauer": 30, "status": null, "klientName": "Bernd Beispiel"},
        {"_id": "no-start", "datum": null, "dauer": null, "status": "geplant", "klientName": null},
        {"_id": "wrong-type", "datum": "2024-03-05T10:00:00.000Z", "dauer": "dreißig", "status": "geplant"},
        {"datum": "2024-03-05T11:00:00.000Z", "dauer": 30}
    ]"#;

    #[test]
    fn null_fields_do_not_fail_the_snapshot() {
        init_tracing();
        let appointments = PracticeCore::parse_appointments(WITH_NULLS_JSON).unwrap();
        let ids: Vec<&str> = appointments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "no-status", "no-start"]);

        assert_eq!(appointments[1].status, AppointmentStatus::Unknown);
        assert_eq!(appointments[2].start, "");
        assert_eq!(appointments[2].duration_minutes, 0);
        assert_eq!(appointments[2].client_name, "");
    }

    #[test]
    fn valid_neighbours_still_reach_the_grid() {
        init_tracing();
        let core = PracticeCore::with_defaults();
        let appointments = PracticeCore::parse_appointments(WITH_NULLS_JSON).unwrap();
        let cells = core.month_grid(d(2024, 3, 1), dt(2024, 3, 5, 8, 0), &appointments);

        let march5 = cells.iter().find(|c| c.date == d(2024, 3, 5)).unwrap();
        let ids: Vec<&str> = march5.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "no-status"]);
        assert_eq!(cells.iter().map(|c| c.total_events()).sum::<usize>(), 2);

        // unknown status is placed on the calendar but never counted
        let counts = core.status_counts(&appointments, 3, 2024);
        assert_eq!(counts.scheduled, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn null_invoice_fields_read_as_zero() {
        init_tracing();
        let json = r#"[
            {"_id": "x", "monat": null, "jahr": 2024, "gesamtBetrag": 100},
            {"_id": "y", "rechnungsnummer": null, "monat": 2, "jahr": null, "empfaenger": null,
             "klientName": null, "artDerMassnahme": null, "umsatzsteuer": null, "termine": null,
             "gesamtStunden": null, "stundensatz": null, "gesamtBetrag": null},
            {"_id": "z", "monat": 3, "jahr": 2024, "termine": [{"datum": null, "dauer": null, "therapeutName": null}],
             "gesamtBetrag": 40},
            {"_id": "bad", "monat": "März", "jahr": 2024, "gesamtBetrag": 999}
        ]"#;
        let core = PracticeCore::with_defaults();
        let invoices = PracticeCore::parse_invoices(json).unwrap();
        let ids: Vec<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);

        assert_eq!(invoices[0].month, 0);
        assert_eq!(invoices[1].year, 0);
        assert_eq!(invoices[1].recipient_kind, RecipientKind::Client);
        assert_eq!(invoices[1].vat_rate, 0);
        assert!(invoices[1].line_items.is_empty());
        assert_eq!(invoices[2].line_items[0].duration_minutes, 0);
        assert_eq!(invoices[2].line_items[0].provider_name, "");

        assert!((core.total_amount(&invoices) - 140.0).abs() < 1e-9);
        assert!((core.amount_for_period(&invoices, 3, 2024) - 40.0).abs() < 1e-9);
        assert_eq!(invoices[0].period_label(), "Januar 2024");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Calendar page
// ═══════════════════════════════════════════════════════════════════

mod calendar_page {
    use super::*;

    #[test]
    fn day_view_of_march_fifth() {
        init_tracing();
        let core = PracticeCore::with_defaults();
        let appointments = PracticeCore::parse_appointments(APPOINTMENTS_JSON).unwrap();
        let grid = core.day_grid(d(2024, 3, 5), dt(2024, 3, 5, 8, 0), &appointments);

        let nine = grid.day.slots.iter().find(|s| s.hour == 9).unwrap();
        let ids: Vec<&str> = nine.events.iter().map(|e| e.event.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(nine.events[1].height_px, 36);

        let two = grid.day.slots.iter().find(|s| s.hour == 14).unwrap();
        assert_eq!(two.events.len(), 1);
        assert_eq!(two.events[0].event.title(), "Carla Test (abgesagt)");
    }

    #[test]
    fn month_view_skips_malformed_records() {
        init_tracing();
        let core = PracticeCore::with_defaults();
        let appointments = PracticeCore::parse_appointments(APPOINTMENTS_JSON).unwrap();
        let view = core.calendar_view(ViewMode::Month, d(2024, 3, 1), dt(2024, 3, 5, 8, 0), &appointments);

        let CalendarView::Month(cells) = view else {
            panic!("expected month view");
        };
        assert_eq!(cells.len(), 35);
        let placed: usize = cells.iter().map(|c| c.total_events()).sum();
        assert_eq!(placed, 4);
        let today = cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today.date, d(2024, 3, 5));
        assert_eq!(today.events.len(), 3);
    }

    #[test]
    fn toolbar_navigation_and_title() {
        let core = PracticeCore::with_defaults();
        let mut current = d(2024, 3, 5);
        assert_eq!(core.header_label(current, ViewMode::Week), "04. – 10. März 2024");

        current = core.navigate(current, ViewMode::Week, Direction::Next);
        assert_eq!(core.header_label(current, ViewMode::Week), "11. – 17. März 2024");

        current = core.navigate(current, ViewMode::Month, Direction::Next);
        assert_eq!(current, d(2024, 4, 12));
        assert_eq!(core.header_label(current, ViewMode::Month), "April 2024");
    }

    #[test]
    fn selected_day_panel() {
        let core = PracticeCore::with_defaults();
        let appointments = PracticeCore::parse_appointments(APPOINTMENTS_JSON).unwrap();
        let events = core.events_for_day(d(2024, 3, 5), &appointments);
        let ranges: Vec<String> = events.iter().map(|e| e.time_range()).collect();
        assert_eq!(ranges, vec!["09:00 - 09:30", "09:00 - 09:45", "14:00 - 15:00"]);
    }

    #[test]
    fn slot_click_to_payload() {
        init_tracing();
        let core = PracticeCore::with_defaults();
        let mut draft = core.draft_from_slot(d(2024, 3, 5), 10).unwrap();
        draft.client_id = "k1".to_string();
        let payload = core.build_appointment_payload(&draft).unwrap();
        assert_eq!(payload.start, "2024-03-05T09:00:00.000Z");
        assert_eq!(payload.duration_minutes, 30);
        assert_eq!(payload.description, None);

        let json = core.appointment_payload_json(&draft).unwrap();
        assert_eq!(json, r#"{"datum":"2024-03-05T09:00:00.000Z","dauer":30,"klientId":"k1"}"#);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Dashboard & lists
// ═══════════════════════════════════════════════════════════════════

mod dashboard_and_lists {
    use super::*;

    #[test]
    fn invoice_figures() {
        let core = PracticeCore::with_defaults();
        let invoices = PracticeCore::parse_invoices(INVOICES_JSON).unwrap();
        assert!((core.total_amount(&invoices) - 175.0).abs() < 1e-9);
        assert!((core.amount_for_period(&invoices, 1, 2024) - 125.0).abs() < 1e-9);
        assert_eq!(core.total_hours(&invoices), 0.0);

        let breakdown = core.recipient_breakdown(&invoices);
        assert!((breakdown.commissioning_party - 50.0).abs() < 1e-9);

        let totals = core.totals_by_month(&invoices);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].invoice_count, 2);

        let series = core.revenue_series(&invoices, d(2024, 2, 10), 2);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Jan");
        assert!((series[0].total_amount - 125.0).abs() < 1e-9);
        assert!(series[1].is_current_month);
    }

    #[test]
    fn dashboard_for_march() {
        init_tracing();
        let core = PracticeCore::with_defaults();
        let appointments = PracticeCore::parse_appointments(APPOINTMENTS_JSON).unwrap();
        let invoices = PracticeCore::parse_invoices(INVOICES_JSON).unwrap();

        let counts = core.status_counts(&appointments, 3, 2024);
        // a4 has no valid start; a6 still has a valid start and status
        assert_eq!(counts.scheduled, 3);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.cancelled, 1);

        let summary = core.dashboard_summary(&appointments, &invoices, dt(2024, 3, 10, 12, 0));
        assert_eq!(summary.revenue.len(), 6);
        assert_eq!(summary.status_counts, counts);
        let upcoming: Vec<&str> = summary.upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(upcoming, vec!["a5"]);
    }

    #[test]
    fn invoice_list_search_and_sort() {
        let core = PracticeCore::with_defaults();
        let invoices = PracticeCore::parse_invoices(INVOICES_JSON).unwrap();

        let hits = core.search_invoices(&invoices, "jugendamt", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "r2");

        let sort = SortConfig::toggle(Some(&SortConfig::asc("gesamtBetrag")), "gesamtBetrag");
        let sorted = core.search_invoices(&invoices, "therapie", Some(&sort));
        let ids: Vec<&str> = sorted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn client_list_search() {
        let core = PracticeCore::with_defaults();
        let mut anna = Client::new("k1", "Anna Muster");
        anna.email = Some("anna@example.org".into());
        let clients = vec![anna, Client::new("k2", "Bernd Beispiel")];
        assert_eq!(core.search_clients(&clients, "EXAMPLE", None).len(), 1);
        assert_eq!(core.search_clients(&clients, "", None).len(), 2);
    }
}
