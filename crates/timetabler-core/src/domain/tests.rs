//! Tests for catalog types.

use super::*;
use crate::TimetableError;

fn small_university() -> University {
    University::new("Test", 2.0)
        .with_timeslots(Timeslot::calendar(1, 7))
        .with_room(Room::new("R1"))
        .with_teacher(Teacher::new("Grace", "Hopper").with_subjects(["Compilers"]))
        .with_teacher(Teacher::new("Alan", "Turing").with_subjects(["Compilers", "Logic"]))
}

#[test]
fn test_calendar_is_day_major() {
    let slots = Timeslot::calendar(2, 3);
    let coords: Vec<_> = slots.iter().map(|t| (t.day, t.period)).collect();
    assert_eq!(coords, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    assert_eq!(slots[4].label, "Tue#1");
}

#[test]
fn test_occurrence_count_truncates() {
    assert_eq!(Subject::new("S", 4.0).occurrence_count(2.0), 2);
    assert_eq!(Subject::new("S", 5.9).occurrence_count(2.0), 2);
    assert_eq!(Subject::new("S", 0.0).occurrence_count(2.0), 0);
    assert_eq!(Subject::new("S", 4.0).occurrence_count(0.0), 0);
}

#[test]
fn test_capable_teachers() {
    let university = small_university();
    assert_eq!(university.capable_teachers("Compilers"), vec![0, 1]);
    assert_eq!(university.capable_teachers("Logic"), vec![1]);
    assert!(university.capable_teachers("Poetry").is_empty());
}

#[test]
fn test_teacher_availability() {
    let free = Teacher::new("A", "B");
    let restricted = Teacher::new("C", "D").with_availability([1, 3]);
    assert!(free.is_available(5));
    assert!(restricted.is_available(3));
    assert!(!restricted.is_available(2));
}

#[test]
fn test_validate_ok() {
    assert!(small_university().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_duration() {
    let mut university = small_university();
    university.timeslot_duration = 0.0;
    assert!(matches!(
        university.validate(),
        Err(TimetableError::InvalidCatalog(_))
    ));
}

#[test]
fn test_validate_rejects_missing_rooms() {
    let mut university = small_university();
    university.rooms.clear();
    assert!(university.validate().is_err());
}

#[test]
fn test_validate_rejects_availability_out_of_range() {
    let university =
        small_university().with_teacher(Teacher::new("E", "F").with_availability([0, 7]));
    let err = university.validate().unwrap_err();
    assert!(err.to_string().contains("timeslot 7"));
}

#[test]
fn test_timeslot_index() {
    let university = small_university();
    assert_eq!(university.timeslot_index(&Timeslot::new(0, 4)), Some(4));
    assert_eq!(university.timeslot_index(&Timeslot::new(3, 0)), None);
}

#[test]
fn test_validate_rejects_duplicate_group_names() {
    let university = small_university()
        .with_promotion(Promotion::new("L1").with_group(Group::new("A")))
        .with_promotion(Promotion::new("L2").with_group(Group::new("A")));
    let err = university.validate().unwrap_err();
    assert!(matches!(err, TimetableError::InvalidCatalog(_)));
    assert!(err.to_string().contains("`A`"));

    let same_promotion = small_university().with_promotion(
        Promotion::new("L1")
            .with_group(Group::new("B"))
            .with_group(Group::new("B")),
    );
    assert!(same_promotion.validate().is_err());
}

#[test]
fn test_validate_accepts_distinct_group_names() {
    let university = small_university()
        .with_promotion(Promotion::new("L1").with_group(Group::new("L1-A")))
        .with_promotion(Promotion::new("L2").with_group(Group::new("L2-A")));
    assert!(university.validate().is_ok());
}
