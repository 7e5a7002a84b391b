use framekit_core::{Circle, Disk, ErrorField, Frame, Point, Rect, ValidationErrors};
use std::f64::consts::PI;
use uuid::Uuid;

#[test]
fn frame_serialization_uses_expected_wire_fields() {
    let frame_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let frame = Frame::with_id(frame_id, Rect::new(Point::new(1.5, -2.0), 4.0, 6.0));

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["uuid"], frame_id.to_string());
    assert_eq!(json["center_x"], 1.5);
    assert_eq!(json["center_y"], -2.0);
    assert_eq!(json["width"], 4.0);
    assert_eq!(json["height"], 6.0);

    let decoded: Frame = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, frame);
}

#[test]
fn circle_serialization_carries_owning_frame() {
    let frame_id = Uuid::new_v4();
    let circle = Circle::new(frame_id, Disk::new(Point::new(0.0, 1.0), 3.0));

    let json = serde_json::to_value(&circle).unwrap();
    assert_eq!(json["frame_uuid"], frame_id.to_string());
    assert_eq!(json["diameter"], 3.0);
}

#[test]
fn circle_metrics_follow_diameter() {
    let circle = Circle::new(Uuid::new_v4(), Disk::new(Point::new(0.0, 0.0), 4.0));
    assert_eq!(circle.radius(), 2.0);
    assert!((circle.area() - 4.0 * PI).abs() < 1e-12);
    assert!((circle.circumference() - 4.0 * PI).abs() < 1e-12);
}

#[test]
fn validation_errors_serialize_as_field_message_list() {
    let mut errors = ValidationErrors::new();
    errors.add(ErrorField::CenterX, "can't be blank");
    errors.add(ErrorField::Base, "Frame cannot touch or intersect with another frame");

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json[0]["field"], "center_x");
    assert_eq!(json[0]["message"], "can't be blank");
    assert_eq!(json[1]["field"], "base");
}
