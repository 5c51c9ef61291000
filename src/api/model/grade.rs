use juniper::graphql_object;

use crate::{
    api::{ApiResult, Context},
    model::{Course, Grade, RecordId, Student},
    store::relation,
};


/// Student grades
#[graphql_object(Context = Context)]
impl Grade {
    /// Unique id of this grade.
    fn id(&self) -> RecordId {
        self.id
    }

    /// Id of the course this grade was given in.
    fn course_id(&self) -> RecordId {
        self.course_id
    }

    /// Id of the student this grade was given to.
    fn student_id(&self) -> RecordId {
        self.student_id
    }

    /// The score.
    fn grade(&self) -> i32 {
        self.grade
    }

    /// The course this grade was given in.
    async fn course(&self, context: &Context) -> Option<Course> {
        context.store.read(|courses| relation::course_of_grade(self, courses).cloned()).await
    }

    /// The student this grade was given to.
    async fn student(&self, context: &Context) -> Option<Student> {
        context.store.read(|students| relation::student_of_grade(self, students).cloned()).await
    }
}

impl Grade {
    pub(crate) async fn load_all(context: &Context) -> Vec<Self> {
        context.store.list_all().await
    }

    pub(crate) async fn load_by_id(id: Option<RecordId>, context: &Context) -> Option<Self> {
        context.store.find_by_id(id).await
    }

    pub(crate) async fn add(
        course_id: RecordId,
        student_id: RecordId,
        grade: i32,
        context: &Context,
    ) -> ApiResult<Self> {
        Ok(context.store.insert(|id| Self { id, course_id, student_id, grade }).await?)
    }

    pub(crate) async fn delete(id: RecordId, context: &Context) -> Vec<Self> {
        context.store.remove_where(|g: &Self| g.id == id).await
    }
}
