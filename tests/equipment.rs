//! Tests for equipment records, the model catalogue and photo encoding.
mod common;
use common::*;
use std::io::Write;
use triage::prelude::*;

const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
const JPEG_HEADER: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00";

#[test]
fn test_panel_starts_with_default_set() {
    let panel = EquipmentPanel::new(simple_catalog());
    let records = panel.records();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].category, EquipmentCategory::Onu);
    assert_eq!(records[0].model, "ONU A");
    assert_eq!(records[1].id, 2);
    assert_eq!(records[1].category, EquipmentCategory::Router);
    assert_eq!(records[1].model, "Router A");
    assert!(records.iter().all(|r| r.notes.is_empty()));
    assert!(records.iter().all(|r| r.status == EquipmentStatus::Online));
}

#[test]
fn test_set_note_only_touches_target_record() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    let router_before = panel.record(2).cloned().unwrap();

    let updated = panel.set_note(1, "LOS vermelha desde ontem").unwrap();
    assert_eq!(updated.notes, "LOS vermelha desde ontem");

    assert_eq!(panel.record(1).unwrap().notes, "LOS vermelha desde ontem");
    assert_eq!(panel.record(1).unwrap().model, "ONU A");
    assert_eq!(panel.record(2).unwrap(), &router_before);
}

#[test]
fn test_set_model_within_category() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    panel.set_model(1, "ONU B").unwrap();
    assert_eq!(panel.record(1).unwrap().model, "ONU B");
    assert_eq!(panel.record(2).unwrap().model, "Router A");
}

#[test]
fn test_set_model_rejects_other_category_model() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    let err = panel.set_model(1, "Router A").unwrap_err();
    assert_eq!(
        err,
        EquipmentError::UnknownModel {
            category: "ONU".to_string(),
            model: "Router A".to_string(),
        }
    );
    assert_eq!(panel.record(1).unwrap().model, "ONU A");
}

#[test]
fn test_unknown_record_is_rejected() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    assert_eq!(
        panel.set_note(7, "x").unwrap_err(),
        EquipmentError::RecordNotFound(7)
    );
    assert_eq!(
        panel.set_model(7, "ONU B").unwrap_err(),
        EquipmentError::RecordNotFound(7)
    );
    assert_eq!(
        panel.set_status(7, EquipmentStatus::Offline).unwrap_err(),
        EquipmentError::RecordNotFound(7)
    );
    assert!(panel.image_for(7).is_none());
}

#[test]
fn test_set_status() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    panel.set_status(2, EquipmentStatus::Alert).unwrap();
    assert_eq!(panel.record(2).unwrap().status, EquipmentStatus::Alert);
    assert_eq!(panel.record(1).unwrap().status, EquipmentStatus::Online);
}

#[test]
fn test_image_override_applies_per_model() {
    let mut panel = EquipmentPanel::new(simple_catalog());
    assert_eq!(panel.image_for(1), Some("onu-a.png"));

    let photo = DataUri::from_bytes(PNG_HEADER).unwrap();
    panel.set_image("ONU A", photo.clone());
    assert_eq!(panel.image_for(1), Some(photo.as_str()));
    assert_eq!(panel.image_for(2), Some("router-a.png"));

    // Switching model falls back to that model's catalogue picture.
    panel.set_model(1, "ONU B").unwrap();
    assert_eq!(panel.image_for(1), Some("onu-b.png"));
    assert!(panel.custom_image("ONU A").is_some());
}

#[test]
fn test_data_uri_detects_image_type() {
    let png = DataUri::from_bytes(PNG_HEADER).unwrap();
    assert_eq!(png.mime_type(), "image/png");
    assert!(png.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(png.decode().unwrap(), PNG_HEADER);

    let jpeg = DataUri::from_bytes(JPEG_HEADER).unwrap();
    assert_eq!(jpeg.mime_type(), "image/jpeg");

    let gif = DataUri::from_bytes(b"GIF89a\x01\x00\x01\x00").unwrap();
    assert_eq!(gif.mime_type(), "image/gif");

    let webp = DataUri::from_bytes(b"RIFF\x24\x00\x00\x00WEBPVP8 ").unwrap();
    assert_eq!(webp.mime_type(), "image/webp");
    assert_eq!(webp.to_string(), webp.as_str());
}

#[test]
fn test_data_uri_rejects_non_images() {
    assert!(matches!(
        DataUri::from_bytes(b"%PDF-1.7"),
        Err(EquipmentError::UnsupportedImage(_))
    ));
    assert!(matches!(
        DataUri::from_bytes(b""),
        Err(EquipmentError::UnsupportedImage(_))
    ));
}

#[test]
fn test_data_uri_bmp_needs_info_header() {
    assert!(matches!(
        DataUri::from_bytes(b"BMW notes from the customer: router rebooted twice"),
        Err(EquipmentError::UnsupportedImage(_))
    ));
    assert!(matches!(
        DataUri::from_bytes(b"BM"),
        Err(EquipmentError::UnsupportedImage(_))
    ));

    // 14-byte file header followed by a BITMAPINFOHEADER (size 40).
    let mut bmp = Vec::new();
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&70u32.to_le_bytes());
    bmp.extend_from_slice(&[0, 0, 0, 0]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&1i32.to_le_bytes());
    bmp.extend_from_slice(&1i32.to_le_bytes());
    assert_eq!(DataUri::from_bytes(&bmp).unwrap().mime_type(), "image/bmp");
}

#[test]
fn test_data_uri_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(JPEG_HEADER).unwrap();

    let uri = DataUri::from_file(file.path()).unwrap();
    assert_eq!(uri.mime_type(), "image/jpeg");
}

#[test]
fn test_data_uri_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("foto.png");
    match DataUri::from_file(&missing).unwrap_err() {
        EquipmentError::ImageRead { path, .. } => assert!(path.ends_with("foto.png")),
        other => panic!("Expected ImageRead error, got {:?}", other),
    }
}

#[test]
fn test_equipment_wire_names() {
    let record = EquipmentRecord {
        id: 2,
        category: EquipmentCategory::Router,
        model: "Router A".to_string(),
        status: EquipmentStatus::Alert,
        notes: String::new(),
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["type"], "Roteador");
    assert_eq!(json["status"], "Alerta");

    let parsed: EquipmentRecord = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, record);
}
