use std::fs::File;
use std::io::BufWriter;

use qsocc::{
    persist::{
        adi::{parse_adi, AdiWriter},
        QsoSink,
    },
    qso::{Field, QsoRecord},
};

#[test]
fn written_file_parses_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("log.adi");

    let records = vec![
        QsoRecord::from_pairs([
            ("CALL", "K1ABC"),
            ("QSO_DATE", "20240101"),
            ("TIME_ON", "1200"),
            ("COMMENT", "long <chat> here"),
            ("APP_X", ""),
        ]),
        QsoRecord::from_pairs([("CALL", "DL/K2DEF/P"), ("QTH", "Bad Ems"), ("SIG_INFO", "K-0001")]),
    ];

    {
        let file = File::create(&path).expect("create");
        let mut writer = AdiWriter::with_header(BufWriter::new(file)).expect("header");
        for rec in &records {
            writer.write_qso(rec).expect("write");
        }
        writer.flush().expect("flush");
    }

    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("ADIF export by QsoCC"));
    let parsed = parse_adi(&text).expect("parse");
    assert_eq!(parsed, records);
    assert_eq!(parsed[0].get(Field::Comment), Some("long <chat> here"));
}

#[test]
fn appending_without_header() {
    let mut writer = AdiWriter::new(Vec::new());
    writer
        .write_qso(&QsoRecord::from_pairs([("CALL", "K1ABC")]))
        .expect("write");
    let text = String::from_utf8(writer.into_inner()).expect("utf8");
    assert_eq!(text, "<CALL:5>K1ABC <EOR>\n");
    assert_eq!(parse_adi(&text).expect("parse").len(), 1);
}
