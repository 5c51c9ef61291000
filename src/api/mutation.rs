use juniper::graphql_object;

use crate::model::{Course, Grade, RecordId, Student};
use super::{ApiResult, Context};


/// Root Mutation
///
/// Adding fails only if no new id can be allocated. None of these check whether referenced ids exist, and deleting never
/// cascades: records referring to a deleted one keep their (now dangling)
/// foreign key.
pub(crate) struct Mutation;

#[graphql_object(Context = Context)]
impl Mutation {
    /// Add a course
    async fn add_course(
        name: String,
        description: String,
        context: &Context,
    ) -> ApiResult<Course> {
        Course::add(name, description, context).await
    }

    /// Add a student
    async fn add_student(
        name: String,
        lastname: String,
        course_id: RecordId,
        context: &Context,
    ) -> ApiResult<Student> {
        Student::add(name, lastname, course_id, context).await
    }

    /// Add a grade
    async fn add_grade(
        course_id: RecordId,
        student_id: RecordId,
        grade: i32,
        context: &Context,
    ) -> ApiResult<Grade> {
        Grade::add(course_id, student_id, grade, context).await
    }

    /// Delete a course. Returns all remaining courses.
    async fn delete_course(id: RecordId, context: &Context) -> Vec<Course> {
        Course::delete(id, context).await
    }

    /// Delete a student. Returns all remaining students.
    async fn delete_student(id: RecordId, context: &Context) -> Vec<Student> {
        Student::delete(id, context).await
    }

    /// Delete a grade. Returns all remaining grades.
    async fn delete_grade(id: RecordId, context: &Context) -> Vec<Grade> {
        Grade::delete(id, context).await
    }
}
