//! The three record kinds of the domain data model.
//!
//! These are plain data: they are deserialized from the seed files, held by
//! the [`Store`][crate::store::Store] and exposed via the API (see
//! `api::model`). Foreign key fields (`course_id`, `student_id`) are just
//! integers. Nothing guarantees that the referenced record exists.

use serde::Deserialize;


/// Integer identifier of a record, unique within its own collection (as long
/// as the seed data does not contain duplicates). This is GraphQL's `Int`.
pub(crate) type RecordId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Course {
    pub(crate) id: RecordId,
    pub(crate) name: String,
    pub(crate) description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Student {
    pub(crate) id: RecordId,
    pub(crate) name: String,
    pub(crate) lastname: String,
    pub(crate) course_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Grade {
    pub(crate) id: RecordId,
    pub(crate) course_id: RecordId,
    pub(crate) student_id: RecordId,

    /// The score.
    pub(crate) grade: i32,
}
