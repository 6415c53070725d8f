use super::*;
use timetabler_core::{Group, Room, Subject, Teacher};

fn week() -> Vec<Timeslot> {
    Timeslot::calendar(1, 7)
}

fn course(slot: usize, group: &str, subject: &str, teacher: &str, room: &str) -> Course {
    Course::new(
        week()[slot].clone(),
        Group::new(group),
        Subject::new(subject, 1.75),
        Teacher::new("T", teacher),
        Room::new(room),
    )
}

#[test]
fn test_clean_schedule_has_no_conflicts() {
    let courses = vec![
        course(0, "G1", "Maths", "Lovelace", "A101"),
        course(1, "G1", "Maths", "Lovelace", "A101"),
        course(0, "G2", "Logic", "Godel", "A102"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();

    assert!(!analysis.has_conflicts());
    assert!(analysis.conflicts.is_empty());
    assert_eq!(analysis.conflicts.len(), 0);
}

#[test]
fn test_room_overlap_detected() {
    let courses = vec![
        course(4, "G1", "Maths", "Lovelace", "A101"),
        course(4, "G2", "Logic", "Godel", "A101"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();

    assert_eq!(analysis.conflicts.room_overlaps.len(), 1);
    assert!(analysis.conflicts.teacher_overlaps.is_empty());

    let overlap = &analysis.conflicts.room_overlaps[0];
    assert_eq!(overlap.kind, ConflictKind::Room);
    assert_eq!(overlap.timeslot, 4);
    assert_eq!(overlap.resource, "A101");
    assert_eq!(overlap.courses[0].to_string(), "Maths (G1)");
    assert_eq!(overlap.courses[1].to_string(), "Logic (G2)");
}

#[test]
fn test_teacher_overlap_detected() {
    let courses = vec![
        course(2, "G1", "Maths", "Noether", "A101"),
        course(3, "G1", "Maths", "Noether", "A101"),
        course(2, "G2", "Algebra", "Noether", "A102"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();

    assert!(analysis.conflicts.room_overlaps.is_empty());
    assert_eq!(analysis.conflicts.teacher_overlaps.len(), 1);
    let overlap = &analysis.conflicts.teacher_overlaps[0];
    assert_eq!(overlap.kind, ConflictKind::Teacher);
    assert_eq!(overlap.resource, "Noether");
    assert_eq!(overlap.timeslot, 2);
}

#[test]
fn test_three_way_overlap_reports_every_pair() {
    let courses = vec![
        course(1, "G1", "Maths", "A", "Amphi"),
        course(1, "G2", "Maths", "B", "Amphi"),
        course(1, "G3", "Maths", "C", "Amphi"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();
    assert_eq!(analysis.conflicts.room_overlaps.len(), 3);
    assert_eq!(analysis.conflicts.iter().count(), 3);
}

#[test]
fn test_unknown_timeslot_is_an_error() {
    let mut stray = course(0, "G1", "Maths", "Lovelace", "A101");
    stray.timeslot = Timeslot::new(3, 9);

    let err = analyze(&[stray], &week()).unwrap_err();
    match &err {
        AnalysisError::UnknownTimeslot { timeslot, course } => {
            assert_eq!(timeslot, "Thu#9");
            assert_eq!(course.subject, "Maths");
        }
    }
    assert!(err.to_string().contains("Maths (G1)"));
}

#[test]
fn test_empty_schedule() {
    let analysis = analyze(&[], &week()).unwrap();
    assert!(!analysis.has_conflicts());
    assert!(analysis.utilization.rooms.is_empty());
    assert!(analysis.distribution.by_subject.is_empty());
}

#[test]
fn test_utilization_ranks_with_first_seen_ties() {
    let courses = vec![
        course(0, "G1", "Maths", "Lovelace", "B1"),
        course(1, "G1", "Maths", "Lovelace", "A1"),
        course(2, "G1", "Logic", "Godel", "A1"),
        course(3, "G2", "Logic", "Godel", "C1"),
        course(4, "G2", "Logic", "Godel", "D1"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();
    let rooms = &analysis.utilization.rooms;

    assert_eq!(rooms.len(), 4);
    let top: Vec<(&str, usize)> = rooms
        .top(3)
        .into_iter()
        .map(|(room, count)| (room.as_str(), count))
        .collect();
    assert_eq!(top, vec![("A1", 2), ("B1", 1), ("C1", 1)]);

    let teachers = analysis.utilization.teachers.top(3);
    assert_eq!(teachers[0], (&"Godel".to_string(), 3));
    assert_eq!(teachers[1], (&"Lovelace".to_string(), 2));
    assert_eq!(analysis.utilization.teachers.count("Curie"), 0);
}

#[test]
fn test_distribution_groups_by_subject_and_group() {
    let courses = vec![
        course(0, "G1", "Maths", "Lovelace", "A101"),
        course(1, "G2", "Maths", "Lovelace", "A101"),
        course(2, "G1", "Logic", "Godel", "A101"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();
    let distribution = &analysis.distribution;

    assert_eq!(distribution.by_subject.count("Maths"), 2);
    assert_eq!(distribution.by_subject.count("Logic"), 1);
    assert_eq!(distribution.by_group.count("G1"), 2);

    let g2 = distribution.by_group.get("G2").unwrap();
    assert_eq!(g2.len(), 1);
    assert_eq!(g2[0].timeslot, 1);
    assert_eq!(g2[0].room, "A101");
    assert_eq!(g2[0].teacher, "Lovelace");

    let keys: Vec<&String> = distribution.by_subject.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["Maths", "Logic"]);
    assert_eq!(analysis.utilization.timeslots.count(&2), 1);
}

#[test]
fn test_duplicate_timeslot_uses_first_position() {
    let mut slots = week();
    slots.push(slots[1].clone());
    let analysis = analyze(&[course(1, "G1", "Maths", "Lovelace", "A101")], &slots).unwrap();
    assert_eq!(analysis.utilization.timeslots.count(&1), 1);
    assert_eq!(analysis.utilization.timeslots.count(&7), 0);
}

#[test]
fn test_report_text() {
    let courses = vec![
        course(4, "G1", "Maths", "Lovelace", "A101"),
        course(4, "G2", "Logic", "Lovelace", "A101"),
        course(5, "G1", "Logic", "Godel", "A102"),
    ];
    let analysis = analyze(&courses, &week()).unwrap();
    let text = analysis.report().to_string();

    assert!(text.starts_with("==== SCHEDULING INTELLIGENCE REPORT ====\n"));
    assert!(text.ends_with("==== END OF INTELLIGENCE REPORT ===="));
    assert!(text.contains("1. CONFLICT ANALYSIS\n   - Room Overlaps: 1\n"));
    assert!(text.contains("     * Timeslot 4, Room A101:\n"));
    assert!(text.contains("       - Maths (G1)\n       - Logic (G2)\n"));
    assert!(text.contains("   - Teacher Overlaps: 1\n     * Timeslot 4, Teacher Lovelace:\n"));
    assert!(text.contains("   Top 3 Most Used Rooms:\n     * A101: 2 courses\n     * A102: 1 courses\n"));
    assert!(text.contains("   Top 3 Most Used Teachers:\n     * Lovelace: 2 courses\n"));
    assert!(text.contains("3. TIMESLOT DISTRIBUTION\n   Top 3 Most Used Timeslots:\n     * Timeslot 4: 2 courses\n     * Timeslot 5: 1 courses\n"));
}
