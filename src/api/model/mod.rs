//! GraphQL representation of our records, plus the operations on them used
//! by the root query and mutation objects.

mod course;
mod grade;
mod student;
