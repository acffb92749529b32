// src/extract/mod.rs

//! Heuristic extraction of PKK detail pages.
//!
//! The detail page has no schema. Its layout is read as:
//!
//! ```text
//! heading        "PKK.<...> - <vessel name>"
//! table #1       vessel particulars        -> header-info group
//! table #2       ETA / ETD / route / call  -> dates group
//! tables #2..    "Layanan" service rows    -> arrival / departure / other
//! ```
//!
//! Each step degrades to empty values when its structure is missing. Only a
//! missing title discards the record.

pub mod document;
pub mod fallback;
pub mod fields;
pub mod services;
pub mod table;
pub mod title;

pub use document::{Document, Row, Table};

use crate::models::{ExtractedRecord, FieldGroup};

/// Extract a record from a parsed document, or `None` without a title.
pub fn extract_record(doc: &Document) -> Option<ExtractedRecord> {
    let title = title::extract_title(doc)?;
    let (record_number, vessel_name) = title::split_title(&title);

    let ship_info = doc
        .tables
        .first()
        .map(table::table_to_group)
        .unwrap_or_default();
    let header = fields::vessel_header(&ship_info);

    let mut dates = doc
        .tables
        .get(1)
        .map(fields::dates_group)
        .unwrap_or_else(FieldGroup::new);

    let events = services::collect_events(&doc.tables);
    let mut arrival = services::summarize(&events.arrival);
    let mut departure = services::summarize(&events.departure);

    fallback::fill_dates(&mut dates, &doc.piped_text);
    fallback::fill_statuses(&mut arrival.status, &mut departure.status, &doc.piped_text);

    Some(ExtractedRecord {
        record_number,
        vessel_name,
        header,
        ship_info,
        dates,
        arrival,
        departure,
        others: events.other,
    })
}

/// Parse an HTML body and extract its record.
pub fn extract_html(body: &str) -> Option<ExtractedRecord> {
    extract_record(&Document::parse(body))
}

#[cfg(test)]
pub(crate) mod samples {
    /// A detail page shaped like the monitoring service's.
    pub const DETAIL_PAGE: &str = r#"
    <html>
      <head><title>Monitoring Inaportnet</title></head>
      <body>
        <h4>PKK.DN.IDJKT.2501.000123 - KM SINAR HARAPAN</h4>
        <span class="badge">Nakhoda BUDI</span>
        <table>
          <tr><td>Nama Perusahaan</td><td>:</td><td>PT ACME SHIPPING</td></tr>
          <tr><td>Bendera / Call Sign / IMO</td><td>:</td><td>IDN / ABC1234 / 9123456</td></tr>
          <tr><td>GT / DWT</td><td>:</td><td>12345 / 6789</td></tr>
          <tr><td>Draft Depan / Belakang / Max</td><td>:</td><td>5.1 / 5.3 / 6.0</td></tr>
          <tr><td>Panjang / Lebar</td><td>:</td><td>120 / 22</td></tr>
        </table>
        <table>
          <tr><td>ETA</td><td>:</td><td>01-01-2025 08:00</td><td>ETD</td><td>:</td><td>03-01-2025 17:00</td></tr>
          <tr><td>Jenis Trayek</td><td>:</td><td>Tetap</td></tr>
          <tr><td>Singgah</td><td>:</td><td>Tanjung Priok</td></tr>
        </table>
        <table>
          <tr><th>Layanan</th><th>Waktu Permohonan</th><th>Waktu Persetujuan</th><th>Proses</th><th>Status</th><th>Verifikator</th><th>Nomor Produk</th><th>Lokasi Sandar</th><th>Status Integrasi</th></tr>
          <tr><td>PKK</td><td>31-12-2024 10:00</td><td>31-12-2024 11:00</td><td>Selesai</td><td>DISETUJUI</td><td>KSOP TANJUNG PRIOK</td><td>PKK-1</td><td>DERMAGA 1</td><td>OK</td></tr>
          <tr><td>SPK PANDU</td><td>03-01-2025 15:00</td><td>03-01-2025 15:30</td><td>Selesai</td><td>TERBIT</td><td>PT. PELABUHAN INDONESIA (Persero)</td><td>SPK-77</td><td>DERMAGA 1</td><td>OK</td></tr>
          <tr><td>SPB</td><td>03-01-2025 16:00</td><td>03-01-2025 16:20</td><td>Selesai</td><td>TERBIT</td><td>KSOP TANJUNG PRIOK</td><td>SPB-9</td><td>DERMAGA 1</td><td>OK</td></tr>
          <tr><td>SPK GERAK</td><td>02-01-2025 09:00</td><td></td><td>Proses</td><td>MENUNGGU</td></tr>
        </table>
      </body>
    </html>
    "#;
}
