//! University catalog fixtures.
//!
//! Every catalog uses [`TIMESLOT_DURATION`]-hour timeslots, so a subject of
//! `n * TIMESLOT_DURATION` hours yields `n` occurrences per group.
//!
//! # Example
//!
//! ```
//! use timetabler_test::university::{oversubscribed_room_university, TIMESLOT_DURATION};
//!
//! let university = oversubscribed_room_university();
//! assert_eq!(university.rooms.len(), 1);
//! assert_eq!(university.promotions[0].groups.len(), 2);
//! assert_eq!(university.promotions[0].subjects[0].occurrence_count(TIMESLOT_DURATION), 4);
//! ```

use timetabler_core::{Group, Promotion, Room, Subject, Teacher, University};

use crate::calendar::{reference_calendar, single_day_calendar};

/// Length of one timeslot in every fixture, in hours.
pub const TIMESLOT_DURATION: f64 = 1.75;

fn hours(occurrences: usize) -> f64 {
    occurrences as f64 * TIMESLOT_DURATION
}

/// One group, one subject needing two occurrences, one teacher, one room,
/// on the reference week.
pub fn single_subject_university() -> University {
    University::new("Single Subject", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("A101"))
        .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
        .with_promotion(
            Promotion::new("L1")
                .with_group(Group::new("L1-A"))
                .with_subject(Subject::new("Maths", hours(2))),
        )
}

/// A subject nobody can teach.
pub fn no_capable_teacher_university() -> University {
    University::new("Missing Teacher", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("A101"))
        .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
        .with_promotion(
            Promotion::new("L1")
                .with_group(Group::new("L1-A"))
                .with_subject(Subject::new("Maths", hours(1)))
                .with_subject(Subject::new("Chemistry", hours(2))),
        )
}

/// Two groups each needing four occurrences in a single room, on a single
/// day whose lunch period leaves six usable timeslots.
pub fn oversubscribed_room_university() -> University {
    University::new("Oversubscribed Room", TIMESLOT_DURATION)
        .with_timeslots(single_day_calendar())
        .with_room(Room::new("Amphi"))
        .with_teacher(Teacher::new("Marie", "Curie").with_subjects(["Physics"]))
        .with_teacher(Teacher::new("Paul", "Langevin").with_subjects(["Physics"]))
        .with_promotion(
            Promotion::new("M1")
                .with_group(Group::new("M1-A"))
                .with_group(Group::new("M1-B"))
                .with_subject(Subject::new("Physics", hours(4))),
        )
}

/// Two capable teachers: one restricted to three timeslots, the other with
/// an empty availability window.
pub fn availability_university() -> University {
    University::new("Availability", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("B201"))
        .with_teacher(
            Teacher::new("Alan", "Turing")
                .with_subjects(["Computing"])
                .with_availability([3, 10, 17]),
        )
        .with_teacher(
            Teacher::new("Grace", "Hopper")
                .with_subjects(["Computing"])
                .with_availability(Vec::<usize>::new()),
        )
        .with_promotion(
            Promotion::new("L2")
                .with_group(Group::new("L2-A"))
                .with_subject(Subject::new("Computing", hours(2))),
        )
}

/// Two promotions sharing teachers and rooms, with a subject too short to
/// yield any occurrence.
pub fn two_promotion_university() -> University {
    University::new("Two Promotions", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("A101"))
        .with_room(Room::new("A102"))
        .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths", "Logic"]))
        .with_teacher(Teacher::new("Emmy", "Noether").with_subjects(["Maths", "Algebra"]))
        .with_teacher(Teacher::new("Kurt", "Godel").with_subjects(["Logic"]))
        .with_promotion(
            Promotion::new("L1")
                .with_group(Group::new("L1-A"))
                .with_subject(Subject::new("Maths", hours(2)))
                .with_subject(Subject::new("Logic", hours(1))),
        )
        .with_promotion(
            Promotion::new("L2")
                .with_group(Group::new("L2-A"))
                .with_subject(Subject::new("Algebra", hours(2)))
                .with_subject(Subject::new("Seminar", 1.0)),
        )
}

/// One group taking three subjects of two occurrences each, with a
/// dedicated teacher per subject and three rooms.
pub fn three_subject_university() -> University {
    University::new("Three Subjects", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("A101"))
        .with_room(Room::new("A102"))
        .with_room(Room::new("A103"))
        .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
        .with_teacher(Teacher::new("Marie", "Curie").with_subjects(["Physics"]))
        .with_teacher(Teacher::new("Alan", "Turing").with_subjects(["Computing"]))
        .with_promotion(
            Promotion::new("L1")
                .with_group(Group::new("L1-A"))
                .with_subject(Subject::new("Maths", hours(2)))
                .with_subject(Subject::new("Physics", hours(2)))
                .with_subject(Subject::new("Computing", hours(2))),
        )
}

const L1_SUBJECTS: [(&str, &str, &str); 5] = [
    ("Analysis", "Augustin", "Cauchy"),
    ("Algebra", "Emmy", "Noether"),
    ("Mechanics", "Isaac", "Newton"),
    ("Chemistry", "Marie", "Curie"),
    ("Biology", "Rosalind", "Franklin"),
];

const L2_SUBJECTS: [(&str, &str, &str); 5] = [
    ("Databases", "Edgar", "Codd"),
    ("Networks", "Vint", "Cerf"),
    ("Compilers", "Grace", "Hopper"),
    ("Statistics", "Ronald", "Fisher"),
    ("Cryptography", "Claude", "Shannon"),
];

/// Two promotions of one group each, five subjects of four occurrences per
/// group, one dedicated teacher per subject and three rooms, on the
/// reference week.
///
/// Each group has 20 occurrences against a daily target of 2. Sunday stays
/// empty and Saturday holds at most 2, so the best balance penalty is 10
/// per group.
pub fn balanced_week_university() -> University {
    let mut university = University::new("Balanced Week", TIMESLOT_DURATION)
        .with_timeslots(reference_calendar())
        .with_room(Room::new("A101"))
        .with_room(Room::new("A102"))
        .with_room(Room::new("A103"));

    for (promotion, group, subjects) in [("L1", "L1-A", L1_SUBJECTS), ("L2", "L2-A", L2_SUBJECTS)] {
        let mut cohort = Promotion::new(promotion).with_group(Group::new(group));
        for (subject, first, last) in subjects {
            university = university.with_teacher(Teacher::new(first, last).with_subjects([subject]));
            cohort = cohort.with_subject(Subject::new(subject, hours(4)));
        }
        university = university.with_promotion(cohort);
    }
    university
}
