//! ADI text codec: `<TAG:len>value` fields, `<EOR>` per record.

use std::io::Write;

use crate::{qso::QsoRecord, version_string, PROJ_NAME};

use super::{PersistError, PersistResult, QsoSink};

/// Streams records to an ADI file.
pub struct AdiWriter<W: Write> {
    out: W,
}

impl<W: Write> AdiWriter<W> {
    /// Wraps `out` without writing a header, for appending to an existing log.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Wraps `out` and writes the file header first.
    pub fn with_header(mut out: W) -> PersistResult<Self> {
        let version = env!("CARGO_PKG_VERSION");
        writeln!(out, "ADIF export by {}", version_string())?;
        writeln!(
            out,
            "<PROGRAMID:{}>{PROJ_NAME} <PROGRAMVERSION:{}>{version}",
            PROJ_NAME.len(),
            version.len()
        )?;
        writeln!(out, "<EOH>")?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> QsoSink for AdiWriter<W> {
    fn write_qso(&mut self, qso: &QsoRecord) -> PersistResult<()> {
        writeln!(self.out, "{} <EOR>", qso.to_adi())?;
        Ok(())
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Parses ADI text into records.
///
/// Everything up to `<EOH>` is skipped. Tags are case-insensitive, an
/// optional data type after the length is ignored and text between fields
/// is dropped. Records without any field are skipped.
pub fn parse_adi(content: &str) -> PersistResult<Vec<QsoRecord>> {
    let upper = content.to_ascii_uppercase();
    let mut pos = upper.find("<EOH>").map(|p| p + 5).unwrap_or(0);

    let mut records = Vec::new();
    let mut current = QsoRecord::new();
    let mut open = false;

    while let Some(offset) = content[pos..].find('<') {
        let start = pos + offset + 1;
        let Some(len) = content[start..].find('>') else {
            return Err(malformed(start, "unterminated tag"));
        };
        let tag = &content[start..start + len];
        pos = start + len + 1;

        let mut parts = tag.split(':');
        let name = parts.next().unwrap_or_default().trim();
        if name.eq_ignore_ascii_case("EOR") {
            if open {
                records.push(std::mem::take(&mut current));
                open = false;
            }
            continue;
        }

        let size = match parts.next() {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| malformed(start, "bad field length"))?,
            None => 0,
        };
        let Some(value) = pos.checked_add(size).and_then(|end| content.get(pos..end)) else {
            return Err(malformed(start, "field value runs past end"));
        };
        pos += size;

        current.set_tag(name, value);
        open = true;
    }

    if open {
        return Err(malformed(pos, "last record not terminated by <EOR>"));
    }
    Ok(records)
}

fn malformed(at: usize, what: &str) -> PersistError {
    PersistError::Message(format!("ADI parse error at byte {at}: {what}"))
}
