use qsocc::{
    config::StationConfig,
    console::Console,
    qso::{Field, QsoRecord},
    status::Status,
    version_string,
};

fn console() -> Console {
    Console::new(&StationConfig::new("XX1XXX", "AA11aa", "Tester")).expect("console")
}

fn field(cc: &Console, f: Field) -> Option<&str> {
    cc.current_qso().get(f)
}

#[test]
fn dates_expand_from_stored_date() {
    let mut cc = console();
    assert!(cc.evaluate("20221015d").is_accepted());
    assert_eq!(field(&cc, Field::QsoDate), Some("20221015"));
    assert!(cc.evaluate("16d").is_accepted());
    assert_eq!(field(&cc, Field::QsoDate), Some("20221016"));
    assert!(cc.evaluate("1101d").is_accepted());
    assert_eq!(field(&cc, Field::QsoDate), Some("20221101"));
    assert!(cc.evaluate("230102d").is_accepted());
    assert_eq!(field(&cc, Field::QsoDate), Some("20230102"));

    assert_eq!(cc.evaluate("1332d"), Status::error("Wrong date format"));
    assert_eq!(cc.evaluate("5d"), Status::error("Wrong date format"));
    assert_eq!(field(&cc, Field::QsoDate), Some("20230102"));
}

#[test]
fn times_reuse_stored_hour() {
    let mut cc = console();
    assert!(cc.evaluate("1234t").is_accepted());
    assert_eq!(field(&cc, Field::TimeOn), Some("1234"));
    assert!(cc.evaluate("56t").is_accepted());
    assert_eq!(field(&cc, Field::TimeOn), Some("1256"));
    assert_eq!(cc.evaluate("2400t").to_string(), "Error: Wrong time format");
    assert_eq!(cc.evaluate("61t"), Status::error("Wrong time format"));
    assert_eq!(field(&cc, Field::TimeOn), Some("1256"));
}

#[test]
fn frequency_and_power() {
    let mut cc = console();
    cc.evaluate("14312f");
    assert_eq!(field(&cc, Field::Freq), Some("14.312"));
    cc.evaluate("145312.5f");
    assert_eq!(field(&cc, Field::Freq), Some("145.3125"));
    cc.evaluate("0f");
    assert_eq!(field(&cc, Field::Freq), None);

    cc.evaluate("100p");
    assert_eq!(field(&cc, Field::TxPwr), Some("100"));
    cc.evaluate("0p");
    assert_eq!(field(&cc, Field::TxPwr), None);

    assert_eq!(cc.evaluate("12x"), Status::error("Unknown number format"));
}

#[test]
fn bands_and_modes() {
    let mut cc = console();
    cc.evaluate("40M");
    assert_eq!(field(&cc, Field::Band), Some("40m"));
    cc.evaluate("8");
    assert_eq!(field(&cc, Field::Band), Some("80m"));
    cc.evaluate("-7");
    assert_eq!(field(&cc, Field::Band), Some("70cm"));
    assert!(cc.evaluate("12").is_accepted());
    assert_eq!(field(&cc, Field::Band), Some("70cm"));

    cc.evaluate("c");
    assert_eq!(field(&cc, Field::Mode), Some("CW"));
    assert_eq!(field(&cc, Field::RstSent), Some("599"));
    assert_eq!(field(&cc, Field::RstRcvd), Some("599"));
    cc.evaluate("ssb");
    assert_eq!(field(&cc, Field::RstSent), Some("59"));
    cc.evaluate("ft8");
    assert_eq!(field(&cc, Field::Mode), Some("FT8"));
    assert_eq!(field(&cc, Field::RstSent), None);
}

#[test]
fn free_text_fields() {
    let mut cc = console();
    cc.evaluate("#nice_chat");
    assert_eq!(field(&cc, Field::Comment), Some("nice chat"));
    cc.evaluate("'Bob_Jr");
    assert_eq!(field(&cc, Field::Name), Some("Bob Jr"));
    cc.evaluate("'");
    assert_eq!(field(&cc, Field::Name), None);

    cc.evaluate("k1abc");
    assert_eq!(cc.finalize(), Status::info("Last QSO cached: K1ABC"));
    assert_eq!(field(&cc, Field::Comment), Some("nice chat"));
    cc.evaluate("#");
    assert_eq!(field(&cc, Field::Comment), None);
}

#[test]
fn locators() {
    let mut cc = console();
    cc.evaluate("@fn42ab");
    assert_eq!(field(&cc, Field::Gridsquare), Some("FN42ab"));
    assert_eq!(field(&cc, Field::Qth), None);

    cc.evaluate("@Bad_Ems(jo30)");
    assert_eq!(field(&cc, Field::Gridsquare), Some("JO30"));
    assert_eq!(field(&cc, Field::Qth), Some("Bad Ems"));

    cc.evaluate("@Koblenz (JO30uj)");
    assert_eq!(field(&cc, Field::Qth), Some("Koblenz"));

    assert_eq!(
        cc.evaluate("@ZZ99"),
        Status::error("Wrong QTH/maidenhead format")
    );
    assert_eq!(field(&cc, Field::Gridsquare), Some("JO30uj"));

    cc.evaluate("@");
    assert_eq!(field(&cc, Field::Gridsquare), Some(""));
    assert_eq!(field(&cc, Field::Qth), None);
}

#[test]
fn signal_reports_and_qsl() {
    let mut cc = console();
    cc.evaluate(".57");
    assert_eq!(field(&cc, Field::RstRcvd), Some("57"));
    cc.evaluate(",599k");
    assert_eq!(field(&cc, Field::RstSent), Some("599K"));
    cc.evaluate(",-12");
    assert_eq!(field(&cc, Field::RstSent), Some("-12"));
    assert_eq!(cc.evaluate(".69"), Status::error("Wrong RST format"));

    cc.evaluate("*");
    assert_eq!(field(&cc, Field::QslRcvd), Some("Y"));
    cc.evaluate("*");
    assert_eq!(field(&cc, Field::QslRcvd), Some("N"));
}

#[test]
fn callsigns() {
    let mut cc = console();
    assert!(cc.evaluate("dl/k1abc/p").is_accepted());
    assert_eq!(field(&cc, Field::Call), Some("DL/K1ABC/P"));

    assert_eq!(cc.evaluate("abc"), Status::warning("Wrong call format"));
    assert_eq!(field(&cc, Field::Call), Some("ABC"));
    assert_eq!(cc.evaluate("abc").to_string(), "Warning: Wrong call format");
}

#[test]
fn worked_before_notice() {
    let mut cc = console();
    cc.evaluate("20240301d");
    cc.evaluate("0915t");
    cc.evaluate("k1abc");
    cc.finalize();

    let entry = cc.worked_before("K1ABC").cloned().expect("indexed");
    cc.evaluate("20240302d");
    assert_eq!(
        cc.evaluate("K1ABC"),
        Status::info("K1ABC worked on 2024-03-01 at 09:15")
    );
    assert_eq!(cc.worked_before("k1abc"), Some(&entry));
}

#[test]
fn extended_commands() {
    let mut cc = console();
    assert!(cc.evaluate("-cdl2xyz").is_accepted());
    assert_eq!(cc.session().my_call, "DL2XYZ");
    assert_eq!(field(&cc, Field::StationCallsign), Some("DL2XYZ"));
    assert_eq!(cc.evaluate("-cxyz"), Status::error("Wrong call format"));

    cc.evaluate("-lHome(jo30uj)");
    assert_eq!(field(&cc, Field::MyGridsquare), Some("JO30uj"));
    assert_eq!(field(&cc, Field::MyCity), Some("Home"));

    cc.evaluate("-nAnna_Lena");
    assert_eq!(field(&cc, Field::MyName), Some("Anna Lena"));
    cc.evaluate("-n");
    assert_eq!(field(&cc, Field::MyName), None);

    assert_eq!(cc.evaluate("-N5"), Status::error("No active event"));
    assert_eq!(cc.evaluate("-V"), Status::info(version_string()));
    assert_eq!(cc.evaluate("-x"), Status::error("Unknown prefix"));
}

#[test]
fn now_sync_sets_date_and_time() {
    let mut cc = console();
    cc.evaluate("19990101d");
    cc.evaluate("0000t");
    cc.evaluate("=");
    let date = field(&cc, Field::QsoDate).unwrap_or_default().to_string();
    assert_ne!(date, "19990101");
    assert_eq!(date.len(), 8);
    assert_eq!(cc.session().date, date);
}

#[test]
fn inactive_record_is_not_finalized() {
    let mut cc = console();
    assert_eq!(cc.finalize(), Status::Accepted);
    assert!(!cc.has_pending());

    assert!(cc.evaluate("20m").is_accepted());
    assert_eq!(
        cc.finalize(),
        Status::warning("Callsign missing for last QSO")
    );
    assert_eq!(cc.qsos().len(), 1);
}

#[test]
fn appended_records_get_mandatory_fields() {
    let mut cc = console();
    cc.evaluate("40m");
    cc.evaluate("cw");
    cc.finalize();
    cc.append_qso(QsoRecord::from_pairs([("CALL", "K9XYZ"), ("APP_FOO", "bar")]));
    let rec = &cc.qsos()[1];
    for f in Field::MANDATORY {
        assert!(rec.contains(f), "{f}");
    }
    assert_eq!(rec.get(Field::Band), Some("40m"));
    assert_eq!(rec.get_tag("APP_FOO"), Some("bar"));
    assert!(cc.worked_before("K9XYZ").is_some());
}
