use modbook_core::storage::{FIRST_SEMESTER_SECTION, PERSONS_SECTION, SECOND_SEMESTER_SECTION};
use modbook_core::{
    BookDocument, BookStorage, Credits, DataBook, Email, JsonBookStorage, Module, ModuleCode,
    Name, Person, Phone, Semester, StorageError, Tag,
};
use serde_json::json;

fn code(value: &str) -> ModuleCode {
    ModuleCode::parse(value).unwrap()
}

fn sample_book() -> DataBook {
    let mut book = DataBook::new();
    let alex = Person::new(Name::parse("Alex Yeoh").unwrap())
        .with_phone(Phone::parse("87438807").unwrap())
        .with_email(Email::parse("alexyeoh@example.com").unwrap())
        .with_address("Blk 30 Geylang Street 29, #06-40")
        .with_tag(Tag::parse("friends").unwrap());
    let bernice = Person::new(Name::parse("Bernice Yu").unwrap());
    book.add_person(bernice.clone()).unwrap();
    book.add_person(alex.clone()).unwrap();

    book.add_module(
        Module::new(code("CS2103T"), "Software Engineering").with_credits(Credits::new(4).unwrap()),
        Semester::First,
    )
    .unwrap();
    book.add_module(Module::new(code("MA1521"), "Calculus"), Semester::First)
        .unwrap();
    book.add_module(Module::new(code("CS2103T"), "Retake"), Semester::Second)
        .unwrap();

    book.assign_instructor(&alex, &code("CS2103T"), Semester::First)
        .unwrap();
    book.assign_instructor(&bernice, &code("CS2103T"), Semester::First)
        .unwrap();
    book.assign_instructor(&bernice, &code("CS2103T"), Semester::Second)
        .unwrap();
    book.set_person(&bernice, bernice.clone().with_tag(Tag::parse("tutor").unwrap()))
        .unwrap();
    book
}

#[test]
fn save_then_load_reproduces_book() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonBookStorage::new(dir.path().join("nested").join("book.json"));
    let book = sample_book();

    storage.save_book(&book).unwrap();
    let loaded = storage.read_book().unwrap().unwrap();

    assert_eq!(loaded, book);
    assert_eq!(
        loaded.display_module_list(),
        loaded.module_list(Semester::First)
    );
}

#[test]
fn save_then_load_keeps_active_semester() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonBookStorage::new(dir.path().join("book.json"));
    let mut book = sample_book();
    book.switch_semester();

    storage.save_book(&book).unwrap();
    let loaded = storage.read_book().unwrap().unwrap();

    assert_eq!(loaded.active_semester(), Semester::Second);
    assert_eq!(loaded, book);
}

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonBookStorage::new(dir.path().join("absent.json"));
    assert!(storage.read_book().unwrap().is_none());
}

#[test]
fn saved_document_uses_expected_sections() {
    let document = BookDocument::from_book(&sample_book());
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["persons"][0]["name"], "Bernice Yu");
    assert_eq!(value["persons"][1]["phone"], "87438807");
    assert_eq!(value["modules1"][0]["code"], "CS2103T");
    assert_eq!(value["modules1"][0]["credits"], 4);
    assert_eq!(
        value["modules1"][0]["instructors"],
        json!(["Alex Yeoh", "Bernice Yu"])
    );
    assert_eq!(value["modules2"][0]["title"], "Retake");
    assert_eq!(value["active_semester"], 0);
}

#[test]
fn legacy_document_without_active_flag_loads_first_semester() {
    let value = json!({
        "persons": [{ "name": "Alex Yeoh" }],
        "modules1": [{ "code": "cs1010", "title": "Programming" }],
        "modules2": [{ "code": "CS2030" }, { "code": "CS2040" }]
    });

    let document: BookDocument = serde_json::from_value(value).unwrap();
    let book = document.into_book().unwrap();

    assert_eq!(book.active_semester(), Semester::First);
    assert_eq!(book.display_module_list().len(), 1);
    assert!(book.has_module_code(&code("CS1010"), Semester::First));
    assert_eq!(book.module_list(Semester::Second).len(), 2);
}

#[test]
fn duplicates_are_reported_per_section() {
    let cases = [
        (
            json!({ "persons": [{ "name": "Alex Yeoh" }, { "name": "alex  yeoh" }] }),
            PERSONS_SECTION,
        ),
        (
            json!({ "modules1": [{ "code": "CS1010" }, { "code": "cs1010" }] }),
            FIRST_SEMESTER_SECTION,
        ),
        (
            json!({
                "modules1": [{ "code": "CS1010" }],
                "modules2": [{ "code": "CS1010" }, { "code": "CS1010" }]
            }),
            SECOND_SEMESTER_SECTION,
        ),
    ];

    for (value, expected_section) in cases {
        let document: BookDocument = serde_json::from_value(value).unwrap();
        let err = document.into_book().unwrap_err();
        assert!(
            matches!(err, StorageError::DataCorruption { section, .. } if section == expected_section),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn invalid_field_values_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    std::fs::write(
        &path,
        json!({ "modules1": [{ "code": "not a code" }] }).to_string(),
    )
    .unwrap();

    let err = JsonBookStorage::new(&path).read_book().unwrap_err();
    assert!(matches!(err, StorageError::Json(_)));
    assert!(err.to_string().contains("invalid module code"));

    std::fs::write(&path, json!({ "active_semester": 2 }).to_string()).unwrap();
    let err = JsonBookStorage::new(&path).read_book().unwrap_err();
    assert!(err.to_string().contains("semester index 2"));
}
