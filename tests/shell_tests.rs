use rand::Rng;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use university_timetable::{
    Config, EntityKind, FlatFileStore, TimetableError, TimetableSystem,
};

/// Fresh scratch directory for one session
fn scratch_dir(prefix: &str) -> PathBuf {
    let id: u64 = rand::thread_rng().gen();
    let dir = std::env::temp_dir().join(format!("shell-{}-{:016x}", prefix, id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(dir: &Path) -> Config {
    Config::from_yaml(&format!("storage:\n  data_dir: '{}'\n", dir.display())).unwrap()
}

/// Run a scripted session and return its console output
fn run_session(dir: &Path, script: &str) -> String {
    let mut system =
        TimetableSystem::from_config(&config_for(dir), Cursor::new(script.to_string()), Vec::<u8>::new())
            .unwrap();
    system.run().unwrap();
    String::from_utf8(system.into_output()).unwrap()
}

fn rows(dir: &Path, file: &str) -> Vec<Vec<String>> {
    FlatFileStore::new(dir.join(file)).read().unwrap()
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_startup_creates_data_files() {
    let dir = scratch_dir("startup");

    let output = run_session(&dir, "6\n");
    assert!(output.contains("University Timetable System"));
    assert!(output.ends_with("Thank you for using the system. Goodbye!\n"));

    for kind in EntityKind::ALL {
        assert_eq!(fs::read_to_string(dir.join(kind.default_file())).unwrap(), "\n");
    }
    // The timetable is only written on request
    assert!(!dir.join("timetable.csv").exists());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_add_course_and_save_on_exit() {
    let dir = scratch_dir("add");

    let output = run_session(&dir, "1\n1\nCS101,Intro\n1\nCS102\n5\n6\n");
    assert!(output.contains("Course Management"));
    assert!(output.contains(
        "Enter Course details (comma-separated: Course Code, Course Name): "
    ));
    assert!(output.contains("Course added successfully."));
    assert!(output.contains(
        "Error: Course requires the following fields: Course Code, Course Name"
    ));

    // The blank initializer row stays ahead of the new record
    assert_eq!(rows(&dir, "courses.csv"), vec![row(&[]), row(&["CS101", "Intro"])]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_view_update_delete() {
    let dir = scratch_dir("crud");
    FlatFileStore::new(dir.join("classes.csv"))
        .write(&[
            row(&["CS101", "Mon", "10:00"]),
            row(&["CS102", "Tue", "11:00"]),
            row(&["CS103", "Wed", "12:00"]),
        ])
        .unwrap();

    let script = "3\n2\n3\n2\nCS102,Thu,15:00\n4\n1\n5\n6\n";
    let output = run_session(&dir, script);

    assert!(output.contains(
        "\nList of Classs:\nCourse Code, Class Day, Class Time\n1. CS101, Mon, 10:00\n2. CS102, Tue, 11:00\n3. CS103, Wed, 12:00\n"
    ));
    assert!(output.contains("Enter the index of the Class to update: "));
    assert!(output.contains("Class updated successfully."));
    assert!(output.contains("Enter the index of the Class to delete: "));
    assert!(output.contains("Class deleted successfully."));

    assert_eq!(
        rows(&dir, "classes.csv"),
        vec![row(&["CS102", "Thu", "15:00"]), row(&["CS103", "Wed", "12:00"])]
    );

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_invalid_indexes_change_nothing() {
    let dir = scratch_dir("bad-index");
    let courses = vec![
        row(&["CS101", "Intro"]),
        row(&["CS102", "Algorithms"]),
        row(&["CS103", "Systems"]),
    ];
    FlatFileStore::new(dir.join("courses.csv")).write(&courses).unwrap();

    let script = "1\n4\n5\n4\n0\n3\n-2\nCS1, X\n3\n1\nonly-one\n5\n6\n";
    let output = run_session(&dir, script);

    assert_eq!(output.matches("Invalid index. Course not found.").count(), 3);
    assert_eq!(
        output
            .matches("Error: Course requires the following fields: Course Code, Course Name")
            .count(),
        1
    );
    assert_eq!(rows(&dir, "courses.csv"), courses);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_invalid_menu_choices() {
    let dir = scratch_dir("bad-choice");

    let output = run_session(&dir, "9\nhello\n2\n7\n5\n6\n");
    assert_eq!(output.matches("Invalid choice, try again.").count(), 3);
    assert!(output.contains("Instructor Management"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_view_empty_collection() {
    let dir = scratch_dir("empty");
    FlatFileStore::new(dir.join("instructors.csv"))
        .write::<String>(&[])
        .unwrap();

    let output = run_session(&dir, "2\n2\n5\n6\n");
    assert!(output.contains("No Instructors available."));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_non_numeric_index_is_fatal() {
    let dir = scratch_dir("nan");
    FlatFileStore::new(dir.join("courses.csv"))
        .write(&[row(&["CS101", "Intro"])])
        .unwrap();

    let mut system = TimetableSystem::from_config(
        &config_for(&dir),
        Cursor::new("1\n1\nCS102, Algorithms\n4\nfirst\n".to_string()),
        Vec::<u8>::new(),
    )
    .unwrap();

    let err = system.run().unwrap_err();
    assert_eq!(err, TimetableError::InvalidNumber("first".to_string()));

    // The pending addition was never saved
    assert_eq!(rows(&dir, "courses.csv"), vec![row(&["CS101", "Intro"])]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_end_of_input_in_submenu_saves() {
    let dir = scratch_dir("eof");
    FlatFileStore::new(dir.join("compensatory_classes.csv"))
        .write::<String>(&[])
        .unwrap();

    let output = run_session(&dir, "4\n1\nCS101,Sat,09:00\n");
    assert!(output.contains("Compensatory Class added successfully."));
    assert!(output.ends_with("Thank you for using the system. Goodbye!\n"));

    assert_eq!(
        rows(&dir, "compensatory_classes.csv"),
        vec![row(&["CS101", "Sat", "09:00"])]
    );

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_generate_timetable() {
    let dir = scratch_dir("timetable");
    FlatFileStore::new(dir.join("classes.csv"))
        .write(&[row(&["CS101", "Mon", "10:00"])])
        .unwrap();
    FlatFileStore::new(dir.join("compensatory_classes.csv"))
        .write(&[row(&["CS101", "Wed", "14:00"])])
        .unwrap();

    let output = run_session(&dir, "5\n6\n");
    assert!(output.contains(
        "\nGenerated Timetable:\nRegular Classes:\n  CS101, Mon, 10:00\n\nCompensatory Classes:\n  CS101, Wed, 14:00\n"
    ));
    assert!(output.contains("Timetable saved to "));

    assert_eq!(
        rows(&dir, "timetable.csv"),
        vec![
            row(&["Type", "Course Code", "Class Day", "Class Time"]),
            row(&["Class", "CS101", "Mon", "10:00"]),
            row(&["Compensatory Class", "CS101", "Wed", "14:00"]),
        ]
    );
    // Sources are untouched
    assert_eq!(rows(&dir, "classes.csv"), vec![row(&["CS101", "Mon", "10:00"])]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_generate_after_editing() {
    let dir = scratch_dir("timetable-live");
    FlatFileStore::new(dir.join("classes.csv"))
        .write::<String>(&[])
        .unwrap();
    FlatFileStore::new(dir.join("compensatory_classes.csv"))
        .write::<String>(&[])
        .unwrap();

    // Leaving the class menu saves, then the report reads the collections
    let output = run_session(&dir, "3\n1\nCS201,Fri,08:00\n5\n5\n6\n");
    assert!(output.contains("  CS201, Fri, 08:00\n"));
    assert_eq!(
        rows(&dir, "timetable.csv")[1],
        row(&["Class", "CS201", "Fri", "08:00"])
    );

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_details_are_stored_verbatim() {
    let dir = scratch_dir("verbatim");
    FlatFileStore::new(dir.join("courses.csv"))
        .write::<String>(&[])
        .unwrap();

    let output = run_session(&dir, "1\n1\nCS101, Intro \n2\n5\n6\n");
    assert!(output.contains("1. CS101,  Intro \n"));

    assert_eq!(rows(&dir, "courses.csv"), vec![row(&["CS101", " Intro "])]);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_menu_choices_match_exactly() {
    let dir = scratch_dir("exact-choice");

    // Padded choices are not recognised at either menu level
    let output = run_session(&dir, " 6\n1\n5 \n5\n6\n");
    assert_eq!(output.matches("Invalid choice, try again.").count(), 2);
    assert_eq!(output.matches("Course Management").count(), 2);
    assert!(output.ends_with("Thank you for using the system. Goodbye!\n"));

    fs::remove_dir_all(dir).unwrap();
}
