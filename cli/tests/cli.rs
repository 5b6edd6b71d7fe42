use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const NOW: &str = "2026-02-10T10:00:00Z";

fn campus(dir: &Path) -> Command {
    campus_at(dir, NOW)
}

/// The binary pointed at `dir` with a fixed clock, isolated from the
/// caller's environment.
fn campus_at(dir: &Path, now: &str) -> Command {
    let mut cmd = Command::cargo_bin("campus").unwrap();
    cmd.env_remove("CAMPUS_USER_ID")
        .env_remove("CAMPUS_STORE_BACKEND")
        .env_remove("CAMPUS_STORE_JSONL")
        .env_remove("CAMPUS_STORE_DB")
        .env_remove("RUST_LOG")
        .env_remove("CAMPUS_LOG")
        .args(["--store-dir", dir.to_str().unwrap(), "--now", now]);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn classify_prints_json_without_touching_the_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let out = stdout_of(campus(dir.path()).args([
        "pulse",
        "mail",
        "classify",
        "--title",
        "Mid-Semester Exam Schedule Released",
        "--body",
        "Mid-sem exams from March 1-15. Check timetable for your courses.",
    ]));
    let value: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(value["category"], "academic");
    assert_eq!(value["priority"], 2);
    assert_eq!(value["tags"], serde_json::json!(["exam"]));
    assert_eq!(
        value["summary"],
        "Mid-sem exams from March 1-15. Check timetable for your courses."
    );
    assert!(!dir.path().join(".campus").exists());
    Ok(())
}

#[test]
fn added_mail_is_listed_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let out = stdout_of(campus(dir.path()).args([
        "--user",
        "student-1",
        "pulse",
        "mail",
        "add",
        "--title",
        "Urgent: exam tomorrow",
        "--body",
        "Bring your ID card.",
    ]));
    let saved: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(saved["category"], "academic");
    assert_eq!(saved["created_by"], "student-1");

    campus_at(dir.path(), "2026-02-10T11:00:00Z")
        .args(["pulse", "mail", "add", "--title", "Tech fest", "--body", "Join the fest."])
        .assert()
        .success();

    let listed = stdout_of(campus(dir.path()).args(["pulse", "mail", "list"]));
    let fest = listed.find("Tech fest").unwrap();
    let exam = listed.find("Urgent: exam tomorrow").unwrap();
    assert!(fest < exam, "newest first:\n{listed}");
    assert!(listed.contains("tags: exam, urgent"));
    Ok(())
}

#[test]
fn seeded_store_recommends_by_popularity() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["data", "seed"])
        .assert()
        .success()
        .stdout(contains("Seeded 31 records"));

    let out = stdout_of(campus(dir.path()).args(["explore", "recommend"]));
    let names: Vec<&str> = out
        .lines()
        .filter(|l| !l.starts_with(' '))
        .map(|l| l.split(" [").next().unwrap_or_default())
        .collect();
    assert_eq!(names, ["Anandpur Sahib", "Haveli Restaurant", "Dominos Pizza"]);
    Ok(())
}

#[test]
fn seeding_twice_keeps_one_copy() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for _ in 0..2 {
        campus(dir.path())
            .args(["--user", "student-1", "data", "seed"])
            .assert()
            .success()
            .stdout(contains("Seeded 39 records"));
    }
    let stats: serde_json::Value =
        serde_json::from_str(&stdout_of(campus(dir.path()).args(["data", "stats"])))?;
    assert_eq!(stats["total"], 39);
    assert_eq!(stats["by_collection"]["grades"], 3);
    Ok(())
}

#[test]
fn grade_report_for_seeded_student() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["--user", "student-1", "data", "seed"])
        .assert()
        .success();

    let out = stdout_of(campus(dir.path()).args(["--user", "student-1", "academic", "grades"]));
    assert!(out.contains("GPA: 8.50"), "{out}");
    assert!(out.contains("Trend: stable"));
    assert!(out.contains("Your recent trend is steady."));
    assert!(out.contains("Sorting Analysis: 78/100 (78%, good)"));
    assert!(out.contains("Matrix Operations: 92/100 (92%, excellent)"));

    let other = stdout_of(campus(dir.path()).args(["--user", "student-2", "academic", "grades"]));
    assert!(other.contains("GPA: 0.00"));
    Ok(())
}

#[test]
fn grades_need_a_user() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["academic", "grades"])
        .assert()
        .failure()
        .stderr(contains("no current user"));
    Ok(())
}

#[test]
fn upcoming_assignments_carry_a_study_plan() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path()).args(["data", "seed"]).assert().success();

    let out = stdout_of(campus(dir.path()).args(["academic", "assignment", "list"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6, "only the three upcoming assignments:\n{out}");
    assert_eq!(
        lines[0],
        "CS201 Binary Search Tree Implementation due 2026-02-14 10:00 (4 days left, soon)"
    );
    assert_eq!(lines[1], "    100 points, about 4h of study, start in 2 days");
    assert!(lines[2].starts_with("MA201 Matrix Operations Assignment"));
    assert!(lines[4].starts_with("CS202 Sorting Algorithms Analysis"));
    assert!(lines[4].ends_with("(9 days left, relaxed)"));
    Ok(())
}

#[test]
fn course_assignment_and_timetable_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["academic", "course", "add", "--code", "CS301", "--name", "Compilers"])
        .assert()
        .success();
    campus(dir.path())
        .args(["academic", "course", "add", "--code", "CS301", "--name", "Again"])
        .assert()
        .failure()
        .stderr(contains("course already exists"));

    campus(dir.path())
        .args([
            "academic", "assignment", "add", "--course", "CS301", "--title", "Lexer", "--due",
            "2026-02-11", "--points", "40",
        ])
        .assert()
        .success();
    let out = stdout_of(campus(dir.path()).args(["academic", "assignment", "list"]));
    assert!(out.contains("CS301 Lexer due 2026-02-11 23:59 (2 days left, critical)"), "{out}");
    assert!(out.contains("about 2h of study, start now"));

    campus(dir.path())
        .args([
            "--user", "student-1", "academic", "timetable", "add", "--course", "CS301", "--day",
            "tuesday", "--start", "14:00", "--end", "15:30", "--room", "LH-201",
        ])
        .assert()
        .success();
    // 2026-02-10 is a Tuesday.
    campus(dir.path())
        .args(["--user", "student-1", "academic", "timetable", "show"])
        .assert()
        .success()
        .stdout(contains("14:00-15:30 CS301 LH-201"));
    campus(dir.path())
        .args(["--user", "student-1", "academic", "timetable", "show", "--day", "1"])
        .assert()
        .success()
        .stdout(contains("No classes"));
    Ok(())
}

#[test]
fn assignment_points_and_grade_scores_are_validated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["academic", "course", "add", "--code", "CS301", "--name", "Compilers"])
        .assert()
        .success();
    campus(dir.path())
        .args([
            "academic", "assignment", "add", "--course", "CS301", "--title", "Empty", "--due",
            "2026-02-20", "--points", "0",
        ])
        .assert()
        .failure()
        .stderr(contains("--points"));

    let id = stdout_of(campus(dir.path()).args([
        "academic", "assignment", "add", "--course", "CS301", "--title", "Parser", "--due",
        "2026-02-20", "--points", "50",
    ]));
    let id = id.trim();
    campus(dir.path())
        .args(["--user", "student-1", "academic", "grade", "add", "--assignment", id])
        .arg("--score=-5")
        .assert()
        .failure()
        .stderr(contains("score must be a non-negative number"));
    campus(dir.path())
        .args(["--user", "student-1", "academic", "grade", "add", "--assignment", id])
        .args(["--score", "NaN"])
        .assert()
        .failure();

    let out = stdout_of(campus(dir.path()).args(["--user", "student-1", "academic", "grades"]));
    assert!(out.contains("GPA: 0.00"), "{out}");
    let list = stdout_of(campus(dir.path()).args(["academic", "assignment", "list"]));
    assert!(!list.contains("Empty"));
    assert!(list.contains("50 points, about 2h of study"));
    Ok(())
}

#[test]
fn exchange_lists_hide_sold_resolved_and_past_entries() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path()).args(["data", "seed"]).assert().success();

    campus(dir.path())
        .args(["exchange", "market", "list", "--category", "books"])
        .assert()
        .success()
        .stdout(contains("Data Structures Textbook [books] Rs 450, excellent"))
        .stdout(contains("HP Laptop").not());

    campus(dir.path())
        .args(["exchange", "lost", "list", "--status", "found"])
        .assert()
        .success()
        .stdout(contains("[found] Calculator Found @ Lecture Hall 3"))
        .stdout(contains("Black Backpack").not());

    campus(dir.path())
        .args([
            "exchange", "travel", "add", "--destination", "Shimla", "--date", "2026-02-01",
            "--time", "07:00", "--seats", "2", "--pickup", "Main Gate",
        ])
        .assert()
        .success();
    let trips = stdout_of(campus(dir.path()).args(["exchange", "travel", "list"]));
    assert!(!trips.contains("Shimla"));
    let airport = trips.find("Chandigarh Airport on 2026-02-13").unwrap();
    let delhi = trips.find("Delhi on 2026-02-15").unwrap();
    assert!(airport < delhi);
    Ok(())
}

#[test]
fn menu_for_a_day_is_sorted_by_meal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for (meal, items) in [("Lunch", "Dal,Rice"), ("Breakfast", "Poha, Tea")] {
        campus(dir.path())
            .args(["pulse", "menu", "add", "--meal", meal, "--items", items])
            .assert()
            .success();
    }
    let out = stdout_of(campus(dir.path()).args(["pulse", "menu", "show"]));
    assert_eq!(out, "Breakfast: Poha, Tea\nLunch: Dal, Rice\n");
    campus(dir.path())
        .args(["pulse", "menu", "show", "--date", "2026-02-11"])
        .assert()
        .success()
        .stdout(contains("No menu for 2026-02-11"));
    Ok(())
}

#[test]
fn sqlite_backend_serves_the_same_commands() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    campus(dir.path())
        .args(["--backend", "sqlite", "data", "seed"])
        .assert()
        .success();
    assert!(dir.path().join(".campus/store/records.db").exists());
    campus(dir.path())
        .args(["--backend", "sqlite", "explore", "place", "list", "--category", "attraction"])
        .assert()
        .success()
        .stdout(contains("Anandpur Sahib [attraction] 4.8 (156 reviews)"));
    Ok(())
}

#[test]
fn export_then_import_into_a_fresh_store() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    let target = tempdir()?;
    campus(source.path()).args(["data", "seed"]).assert().success();
    let dump = stdout_of(campus(source.path()).args(["data", "export"]));
    assert_eq!(dump.lines().count(), 31);

    campus(target.path())
        .args(["data", "import"])
        .write_stdin(dump)
        .assert()
        .success()
        .stdout(contains("Imported 31 records"));
    Ok(())
}

fn envelope(id: &str, title: &str) -> String {
    format!(r#"{{"collection":"marketplace","row":{{"id":"{id}","title":"{title}"}}}}"#)
}

#[test]
fn data_compact_removes_duplicates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("records.jsonl");
    let output = dir.path().join("out.jsonl");
    let data = [envelope("1", "one"), envelope("2", "two"), envelope("1", "one")].join("\n");
    fs::write(&input, data + "\n")?;

    campus(dir.path())
        .args([
            "data",
            "compact",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Read 3 records, wrote 2 records"));

    let out_data = fs::read_to_string(&output)?;
    assert_eq!(out_data.lines().count(), 2);
    Ok(())
}

#[test]
fn data_migrate_imports_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let jsonl = dir.path().join("records.jsonl");
    let sqlite = dir.path().join("records.sqlite");
    let data = [envelope("1", "one"), envelope("2", "two")].join("\n");
    fs::write(&jsonl, data + "\n")?;

    campus(dir.path())
        .args([
            "data",
            "migrate",
            "--jsonl",
            jsonl.to_str().unwrap(),
            "--sqlite",
            sqlite.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Migrated 2 records"));
    assert!(sqlite.exists());
    Ok(())
}
