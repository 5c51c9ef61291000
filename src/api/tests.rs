use std::sync::Arc;

use juniper::{graphql_value, DefaultScalarValue, Value, Variables};

use crate::{
    model::{Grade, RecordId},
    store::{Seed, Store, tests::fixture},
};
use super::{Context, root_node};


/// Executes `doc` against `store` and returns the `data` part. Fails the test
/// if there were any errors.
async fn run(store: &Arc<Store>, doc: &str) -> Value<DefaultScalarValue> {
    let root = root_node();
    let context = Context::new(Arc::clone(store));
    let (value, errors) = juniper::execute(doc, None, &root, &Variables::new(), &context)
        .await
        .unwrap_or_else(|e| panic!("invalid GraphQL document: {e:?}"));
    assert!(errors.is_empty(), "execution errors: {errors:?}");
    value
}

fn store() -> Arc<Store> {
    Arc::new(fixture())
}

#[tokio::test]
async fn list_courses() {
    let store = store();
    let out = run(&store, "{ courses { id name description } }").await;
    assert_eq!(out, graphql_value!({
        "courses": [
            { "id": 1, "name": "Math", "description": "About Math" },
            { "id": 2, "name": "Physics", "description": "About Physics" },
            { "id": 3, "name": "Art", "description": "About Art" },
        ],
    }));

    // Idempotent without mutations in between.
    assert_eq!(run(&store, "{ courses { id name description } }").await, out);
}

#[tokio::test]
async fn by_id() {
    let store = store();
    let out = run(&store, r#"{
        course(id: 2) { name }
        student(id: 3) { name courseId }
        grade(id: 1) { grade studentId }
        missing: course(id: 42) { name }
    }"#).await;

    assert_eq!(out, graphql_value!({
        "course": { "name": "Physics" },
        "student": { "name": "Cid", "courseId": 1 },
        "grade": { "grade": 7, "studentId": 1 },
        "missing": null,
    }));
}

#[tokio::test]
async fn by_id_without_id_is_null() {
    let out = run(&store(), "{ course { id } student { id } grade { id } }").await;
    assert_eq!(out, graphql_value!({ "course": null, "student": null, "grade": null }));
}

#[tokio::test]
async fn relations() {
    let out = run(&store(), r#"{
        courses { id student { id } grade { id } }
        student(id: 2) { course { name } grade { grade } }
        grade(id: 2) { course { id } student { name } }
    }"#).await;

    assert_eq!(out, graphql_value!({
        "courses": [
            { "id": 1, "student": { "id": 1 }, "grade": { "id": 1 } },
            { "id": 2, "student": { "id": 2 }, "grade": { "id": 2 } },
            { "id": 3, "student": null, "grade": null },
        ],
        "student": { "course": { "name": "Physics" }, "grade": { "grade": 9 } },
        "grade": { "course": { "id": 2 }, "student": { "name": "Bob" } },
    }));
}

#[tokio::test]
async fn add_course() {
    let store = store();
    let out = run(&store, r#"mutation {
        addCourse(name: "Music", description: "Scales") { id name description }
    }"#).await;
    assert_eq!(out, graphql_value!({
        "addCourse": { "id": 4, "name": "Music", "description": "Scales" },
    }));

    let out = run(&store, "{ courses { id } }").await;
    assert_eq!(out, graphql_value!({
        "courses": [{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }],
    }));
}

#[tokio::test]
async fn add_student_and_follow_course() {
    let store = store();
    let out = run(&store, r#"mutation {
        addStudent(name: "Ana", lastname: "Lee", courseId: 1) {
            id name lastname courseId
            course { id name }
        }
    }"#).await;
    assert_eq!(out, graphql_value!({
        "addStudent": {
            "id": 4,
            "name": "Ana",
            "lastname": "Lee",
            "courseId": 1,
            "course": { "id": 1, "name": "Math" },
        },
    }));

    let out = run(&store, "{ student(id: 4) { course { id } } }").await;
    assert_eq!(out, graphql_value!({ "student": { "course": { "id": 1 } } }));
}

#[tokio::test]
async fn add_grade_with_dangling_references() {
    let store = store();
    let out = run(&store, r#"mutation {
        addGrade(courseId: 99, studentId: 98, grade: 4) { id courseId studentId grade course { id } student { id } }
    }"#).await;
    assert_eq!(out, graphql_value!({
        "addGrade": {
            "id": 3,
            "courseId": 99,
            "studentId": 98,
            "grade": 4,
            "course": null,
            "student": null,
        },
    }));
}

#[tokio::test]
async fn delete_returns_remaining() {
    let store = store();
    let out = run(&store, "mutation { deleteCourse(id: 1) { id } }").await;
    assert_eq!(out, graphql_value!({ "deleteCourse": [{ "id": 2 }, { "id": 3 }] }));
    assert_eq!(
        run(&store, "{ courses { id } }").await,
        graphql_value!({ "courses": [{ "id": 2 }, { "id": 3 }] }),
    );

    // No cascade: the student of course 1 is still there, with nothing to
    // point to.
    let out = run(&store, "{ student(id: 1) { courseId course { id } } }").await;
    assert_eq!(out, graphql_value!({ "student": { "courseId": 1, "course": null } }));
}

#[tokio::test]
async fn delete_unknown_id_changes_nothing() {
    let store = store();
    let out = run(&store, "mutation { deleteGrade(id: 3) { id grade } }").await;
    assert_eq!(out, graphql_value!({
        "deleteGrade": [{ "id": 1, "grade": 7 }, { "id": 2, "grade": 9 }],
    }));

    let out = run(&store, "mutation { deleteStudent(id: 3) { id } }").await;
    assert_eq!(out, graphql_value!({ "deleteStudent": [{ "id": 1 }, { "id": 2 }] }));
}

#[tokio::test]
async fn new_ids_survive_deletion() {
    let store = store();
    run(&store, "mutation { deleteCourse(id: 3) { id } }").await;
    let out = run(&store, r#"mutation { addCourse(name: "a", description: "b") { id } }"#).await;
    assert_eq!(out, graphql_value!({ "addCourse": { "id": 4 } }));
}

#[tokio::test]
async fn missing_required_argument_is_rejected() {
    let store = store();
    let root = root_node();
    let context = Context::new(Arc::clone(&store));
    let res = juniper::execute(
        r#"mutation { addCourse(name: "x") { id } }"#,
        None,
        &root,
        &Variables::new(),
        &context,
    ).await;
    assert!(res.is_err());

    // Nothing was added.
    assert_eq!(store.list_all::<crate::model::Course>().await.len(), 3);
}

#[tokio::test]
async fn add_reports_exhausted_ids() {
    let grade = Grade { id: RecordId::MAX, course_id: 1, student_id: 1, grade: 5 };
    let seed = Seed { courses: vec![], students: vec![], grades: vec![grade] };
    let store = Arc::new(Store::new(seed));
    let root = root_node();
    let context = Context::new(Arc::clone(&store));
    let (value, errors) = juniper::execute(
        "mutation { addGrade(courseId: 1, studentId: 1, grade: 2) { id } }",
        None,
        &root,
        &Variables::new(),
        &context,
    ).await.expect("document is valid");

    assert_eq!(value, graphql_value!(null));
    assert_eq!(errors.len(), 1);
    let error = errors[0].error();
    assert!(error.message().starts_with("Cannot add record"), "{}", error.message());
    assert_eq!(error.extensions(), &graphql_value!({ "kind": "IDS_EXHAUSTED" }));
    assert_eq!(store.list_all::<Grade>().await.len(), 1);
}

#[test]
fn schema_names() {
    let schema = root_node().as_sdl();
    for needle in [
        "type Course",
        "type Student",
        "type Grade",
        "courseId: Int!",
        "course(id: Int): Course",
        "deleteGrade(id: Int!): [Grade!]!",
        "Unique id of this course.",
        "Id of the course this student is enrolled in.",
        "Id of the student this grade was given to.",
    ] {
        assert!(schema.contains(needle), "schema is missing '{needle}':\n{schema}");
    }
}
