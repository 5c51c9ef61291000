use juniper::graphql_object;

use crate::{
    api::{ApiResult, Context},
    model::{Course, Grade, RecordId, Student},
    store::relation,
};


/// Course data
#[graphql_object(Context = Context)]
impl Course {
    /// Unique id of this course.
    fn id(&self) -> RecordId {
        self.id
    }

    /// Name of the course.
    fn name(&self) -> &str {
        &self.name
    }

    /// Short description of what the course is about.
    fn description(&self) -> &str {
        &self.description
    }

    /// The first student enrolled in this course.
    async fn student(&self, context: &Context) -> Option<Student> {
        context.store.read(|students| relation::student_of_course(self, students).cloned()).await
    }

    /// The first grade given in this course.
    async fn grade(&self, context: &Context) -> Option<Grade> {
        context.store.read(|grades| relation::grade_of_course(self, grades).cloned()).await
    }
}

impl Course {
    pub(crate) async fn load_all(context: &Context) -> Vec<Self> {
        context.store.list_all().await
    }

    pub(crate) async fn load_by_id(id: Option<RecordId>, context: &Context) -> Option<Self> {
        context.store.find_by_id(id).await
    }

    pub(crate) async fn add(
        name: String,
        description: String,
        context: &Context,
    ) -> ApiResult<Self> {
        Ok(context.store.insert(|id| Self { id, name, description }).await?)
    }

    pub(crate) async fn delete(id: RecordId, context: &Context) -> Vec<Self> {
        context.store.remove_where(|c: &Self| c.id == id).await
    }
}
