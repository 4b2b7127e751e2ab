// src/common/dates.rs

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Interpreta a data enviada pelo cliente ou devolvida pelo OCR.
///
/// Aceita RFC 3339 (`2025-10-05T09:30:00Z`), data e hora sem fuso
/// (`2025-10-05T09:30:00`, hora local) e só a data (`2025-10-05`,
/// meia-noite local).
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    // `earliest` resolve o caso de horário ambíguo na troca de fuso.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
