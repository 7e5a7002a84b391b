use framekit_core::db::open_db_in_memory;
use framekit_core::{
    CircleDraft, CircleService, ErrorField, FrameDraft, FramePatch, FrameService,
    FrameServiceError, Point, SqliteSpatialRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

#[test]
fn create_frame_persists_and_lists() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let frame = service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();

    let loaded = service.get_frame(frame.uuid).unwrap().unwrap();
    assert_eq!(loaded, frame);
    assert_eq!(loaded.left_edge(), -5.0);
    assert_eq!(service.list_frames().unwrap(), vec![frame]);
}

#[test]
fn second_touching_frame_is_rejected_and_not_persisted() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let err = service
        .create_frame(&FrameDraft::new(10.0, 0.0, 10.0, 10.0))
        .unwrap_err();

    match err {
        FrameServiceError::Invalid(errors) => {
            assert_eq!(
                errors.full_messages(),
                vec!["Frame cannot touch or intersect with another frame"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.list_frames().unwrap().len(), 1);
}

#[test]
fn separated_frames_are_accepted() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    service
        .create_frame(&FrameDraft::new(10.5, 0.0, 10.0, 10.0))
        .unwrap();
    assert_eq!(service.list_frames().unwrap().len(), 2);
}

#[test]
fn invalid_fields_are_aggregated() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let draft = FrameDraft {
        center_x: None,
        center_y: Some(0.0),
        width: Some(0.0),
        height: Some(-1.0),
    };
    let FrameServiceError::Invalid(errors) = service.create_frame(&draft).unwrap_err() else {
        panic!("expected validation failure");
    };
    assert_eq!(
        errors.full_messages(),
        vec![
            "Center x can't be blank",
            "Width must be greater than 0",
            "Height must be greater than 0"
        ]
    );
    assert!(service.list_frames().unwrap().is_empty());
}

#[test]
fn update_with_unchanged_values_succeeds() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let frame = service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let updated = service
        .update_frame(
            frame.uuid,
            &FramePatch {
                center_x: Some(0.0),
                center_y: Some(0.0),
                width: Some(10.0),
                height: Some(10.0),
            },
        )
        .unwrap();
    assert_eq!(updated, frame);
}

#[test]
fn rejected_update_leaves_stored_frame_untouched() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let left = service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    service
        .create_frame(&FrameDraft::new(20.0, 0.0, 10.0, 10.0))
        .unwrap();

    let err = service
        .update_frame(
            left.uuid,
            &FramePatch {
                width: Some(30.0),
                ..FramePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, FrameServiceError::Invalid(_)));
    assert_eq!(service.get_frame(left.uuid).unwrap().unwrap(), left);
}

#[test]
fn update_moves_frame_when_clear() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let frame = service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let moved = service
        .update_frame(
            frame.uuid,
            &FramePatch {
                center_x: Some(100.0),
                ..FramePatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.center_x, 100.0);
    assert_eq!(service.get_frame(frame.uuid).unwrap().unwrap(), moved);
}

#[test]
fn update_that_strands_a_circle_is_rejected() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    circles
        .create_circle(frame.uuid, &CircleDraft::new(4.0, 0.0, 2.0))
        .unwrap();

    let err = frames
        .update_frame(
            frame.uuid,
            &FramePatch {
                width: Some(6.0),
                ..FramePatch::default()
            },
        )
        .unwrap_err();
    let FrameServiceError::Invalid(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.on(ErrorField::Base).len(), 1);
}

#[test]
fn update_reports_overlap_and_stranding_together() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    frames
        .create_frame(&FrameDraft::new(20.0, 0.0, 10.0, 10.0))
        .unwrap();
    circles
        .create_circle(frame.uuid, &CircleDraft::new(-3.0, 0.0, 2.0))
        .unwrap();

    let err = frames
        .update_frame(
            frame.uuid,
            &FramePatch {
                center_x: Some(12.0),
                ..FramePatch::default()
            },
        )
        .unwrap_err();
    let FrameServiceError::Invalid(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        errors.on(ErrorField::Base),
        vec![
            "Frame cannot touch or intersect with another frame",
            "Frame must keep all of its circles inside its edges",
        ]
    );
    assert_eq!(frames.get_frame(frame.uuid).unwrap(), Some(frame));
}

#[test]
fn update_missing_frame_returns_not_found() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    let err = service
        .update_frame(missing, &FramePatch::default())
        .unwrap_err();
    assert!(matches!(err, FrameServiceError::FrameNotFound(id) if id == missing));
}

#[test]
fn guarded_delete_succeeds_for_empty_frame() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let frame = service
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    service.delete_frame(frame.uuid).unwrap();
    assert!(service.get_frame(frame.uuid).unwrap().is_none());
}

#[test]
fn guarded_delete_refuses_frame_with_circles() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let circle = circles
        .create_circle(frame.uuid, &CircleDraft::new(1.0, 1.0, 2.0))
        .unwrap();

    let err = frames.delete_frame(frame.uuid).unwrap_err();
    assert!(matches!(
        err,
        FrameServiceError::HasCircles {
            circle_count: 1,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Cannot delete frame with circles");
    assert!(frames.get_frame(frame.uuid).unwrap().is_some());
    assert!(circles.get_circle(circle.uuid).unwrap().is_some());
}

#[test]
fn cascade_delete_removes_frame_and_its_circles_only() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let doomed = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let kept = frames
        .create_frame(&FrameDraft::new(50.0, 0.0, 10.0, 10.0))
        .unwrap();
    circles
        .create_circle(doomed.uuid, &CircleDraft::new(-2.0, 0.0, 2.0))
        .unwrap();
    circles
        .create_circle(doomed.uuid, &CircleDraft::new(2.0, 0.0, 2.0))
        .unwrap();
    let survivor = circles
        .create_circle(kept.uuid, &CircleDraft::new(50.0, 0.0, 2.0))
        .unwrap();

    assert_eq!(frames.delete_frame_cascade(doomed.uuid).unwrap(), 2);
    assert!(frames.get_frame(doomed.uuid).unwrap().is_none());
    assert_eq!(circles.list_circles(kept.uuid).unwrap(), vec![survivor]);
}

#[test]
fn delete_missing_frame_returns_not_found() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    assert!(matches!(
        service.delete_frame(missing).unwrap_err(),
        FrameServiceError::FrameNotFound(_)
    ));
    assert!(matches!(
        service.delete_frame_cascade(missing).unwrap_err(),
        FrameServiceError::FrameNotFound(_)
    ));
}

#[test]
fn frame_summary_reports_extreme_circles() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 20.0, 20.0))
        .unwrap();

    let empty = frames.frame_summary(frame.uuid).unwrap();
    assert_eq!(empty.total_circles, 0);
    assert_eq!(empty.highest, None);
    assert_eq!(empty.leftmost, None);

    circles
        .create_circle(frame.uuid, &CircleDraft::new(-6.0, 1.0, 2.0))
        .unwrap();
    circles
        .create_circle(frame.uuid, &CircleDraft::new(0.0, 6.0, 2.0))
        .unwrap();
    circles
        .create_circle(frame.uuid, &CircleDraft::new(6.0, -6.0, 2.0))
        .unwrap();

    let summary = frames.frame_summary(frame.uuid).unwrap();
    assert_eq!(summary.total_circles, 3);
    assert_eq!(summary.highest, Some(Point::new(0.0, 6.0)));
    assert_eq!(summary.lowest, Some(Point::new(6.0, -6.0)));
    assert_eq!(summary.leftmost, Some(Point::new(-6.0, 1.0)));
    assert_eq!(summary.rightmost, Some(Point::new(6.0, -6.0)));
}

#[test]
fn frame_summary_ties_resolve_to_first_created_circle() {
    let conn = setup();
    let repo = SqliteSpatialRepository::try_new(&conn).unwrap();
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames
        .create_frame(&FrameDraft::new(0.0, 0.0, 20.0, 20.0))
        .unwrap();
    for (x, y) in [(-5.0, 5.0), (5.0, 5.0), (-5.0, -5.0), (5.0, -5.0)] {
        circles
            .create_circle(frame.uuid, &CircleDraft::new(x, y, 2.0))
            .unwrap();
    }

    let summary = frames.frame_summary(frame.uuid).unwrap();
    assert_eq!(summary.total_circles, 4);
    assert_eq!(summary.highest, Some(Point::new(-5.0, 5.0)));
    assert_eq!(summary.leftmost, Some(Point::new(-5.0, 5.0)));
    assert_eq!(summary.lowest, Some(Point::new(-5.0, -5.0)));
    assert_eq!(summary.rightmost, Some(Point::new(5.0, 5.0)));
}

#[test]
fn frame_summary_for_missing_frame_is_not_found() {
    let conn = setup();
    let service = FrameService::new(SqliteSpatialRepository::try_new(&conn).unwrap());
    assert!(matches!(
        service.frame_summary(Uuid::new_v4()).unwrap_err(),
        FrameServiceError::FrameNotFound(_)
    ));
}
