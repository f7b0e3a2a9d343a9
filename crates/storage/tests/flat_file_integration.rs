use storage::flat_file::{FlatFileJokeRepository, FlatFileStudentRepository};
use storage::repository::{JokeRepository, Storage, StorageError, StudentRepository};
use toybox_core::model::StudentRecord;

fn record(code: &str, name: &str, marks: &[u32]) -> StudentRecord {
    StudentRecord::new(code, name, marks.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_student_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FlatFileStudentRepository::new(dir.path().join("studentMarks.txt"));
    let students = repo.load_students().await.expect("load");
    assert!(students.is_empty());
}

#[tokio::test]
async fn student_file_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("studentMarks.txt");
    let repo = FlatFileStudentRepository::new(&path);

    let students = vec![
        record("1345", "John Curry", &[8, 15, 7, 45]),
        record("2345", "Sam Sturtivant", &[14, 15, 14, 77]),
    ];
    repo.save_students(&students).await.expect("save");

    let text = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(text, "1345,John Curry,8,15,7,45\n2345,Sam Sturtivant,14,15,14,77\n");

    let loaded = repo.load_students().await.expect("load");
    assert_eq!(loaded, students);
}

#[tokio::test]
async fn malformed_student_lines_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("studentMarks.txt");
    std::fs::write(&path, "10\n1,Ann,10,20\n2,Ben,oops,3\n\n3,Cy,40\n").expect("write");

    let repo = FlatFileStudentRepository::new(&path);
    let loaded = repo.load_students().await.expect("load");
    let names: Vec<_> = loaded.iter().map(StudentRecord::name).collect();
    assert_eq!(names, ["Ann", "Cy"]);
}

#[tokio::test]
async fn joke_file_skips_blank_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("randomJokes.txt");
    std::fs::write(
        &path,
        "Why did the scarecrow win an award? Because he was outstanding in his field.\n\n  \nWhat do you call fake spaghetti? An impasta.\n",
    )
    .expect("write");

    let jokes = FlatFileJokeRepository::new(&path)
        .load_jokes()
        .await
        .expect("load");
    assert_eq!(jokes.len(), 2);
    assert_eq!(jokes[1].setup(), "What do you call fake spaghetti?");
    assert_eq!(jokes[1].punchline(), Some("An impasta."));
}

#[tokio::test]
async fn missing_joke_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = FlatFileJokeRepository::new(dir.path().join("none.txt"))
        .load_jokes()
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn storage_flat_file_wires_both_repositories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let jokes_path = dir.path().join("jokes.txt");
    std::fs::write(&jokes_path, "Knock knock? Who's there.\n").expect("write");

    let storage = Storage::flat_file(dir.path().join("students.txt"), &jokes_path);
    storage
        .students
        .save_students(&[record("1", "Ann", &[50])])
        .await
        .expect("save");
    assert_eq!(storage.students.load_students().await.expect("load").len(), 1);
    assert_eq!(storage.jokes.load_jokes().await.expect("jokes").len(), 1);
}
