use juniper::graphql_object;

use crate::model::{Course, Grade, RecordId, Student};
use super::Context;


/// Root Query
pub(crate) struct Query;

#[graphql_object(Context = Context)]
impl Query {
    /// List all courses
    async fn courses(context: &Context) -> Vec<Course> {
        Course::load_all(context).await
    }

    /// List all students
    async fn students(context: &Context) -> Vec<Student> {
        Student::load_all(context).await
    }

    /// List all grades
    async fn grades(context: &Context) -> Vec<Grade> {
        Grade::load_all(context).await
    }

    /// Course by id. Returns `null` if there is no such course or if `id` is
    /// not given.
    async fn course(id: Option<RecordId>, context: &Context) -> Option<Course> {
        Course::load_by_id(id, context).await
    }

    /// Student by id. Returns `null` if there is no such student or if `id`
    /// is not given.
    async fn student(id: Option<RecordId>, context: &Context) -> Option<Student> {
        Student::load_by_id(id, context).await
    }

    /// Grade by id. Returns `null` if there is no such grade or if `id` is not
    /// given.
    async fn grade(id: Option<RecordId>, context: &Context) -> Option<Grade> {
        Grade::load_by_id(id, context).await
    }
}
