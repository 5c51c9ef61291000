use juniper::graphql_object;

use crate::{
    api::{ApiResult, Context},
    model::{Course, Grade, RecordId, Student},
    store::relation,
};


/// Student data
#[graphql_object(Context = Context)]
impl Student {
    /// Unique id of this student.
    fn id(&self) -> RecordId {
        self.id
    }

    /// First name.
    fn name(&self) -> &str {
        &self.name
    }

    /// Last name.
    fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Id of the course this student is enrolled in.
    fn course_id(&self) -> RecordId {
        self.course_id
    }

    /// The course this student is enrolled in, or `null` if `courseId` does
    /// not refer to an existing course.
    async fn course(&self, context: &Context) -> Option<Course> {
        context.store.read(|courses| relation::course_of_student(self, courses).cloned()).await
    }

    /// The first grade of this student.
    async fn grade(&self, context: &Context) -> Option<Grade> {
        context.store.read(|grades| relation::grade_of_student(self, grades).cloned()).await
    }
}

impl Student {
    pub(crate) async fn load_all(context: &Context) -> Vec<Self> {
        context.store.list_all().await
    }

    pub(crate) async fn load_by_id(id: Option<RecordId>, context: &Context) -> Option<Self> {
        context.store.find_by_id(id).await
    }

    pub(crate) async fn add(
        name: String,
        lastname: String,
        course_id: RecordId,
        context: &Context,
    ) -> ApiResult<Self> {
        Ok(context.store.insert(|id| Self { id, name, lastname, course_id }).await?)
    }

    pub(crate) async fn delete(id: RecordId, context: &Context) -> Vec<Self> {
        context.store.remove_where(|s: &Self| s.id == id).await
    }
}
