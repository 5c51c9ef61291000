use std::{collections::HashSet, path::{Path, PathBuf}};

use serde::de::DeserializeOwned;

use crate::{
    model::{Course, Grade, Student},
    prelude::*,
};
use super::Record;


const COURSES_FILE: &str = "course.json";
const STUDENTS_FILE: &str = "students.json";
const GRADES_FILE: &str = "grade.json";

const BUILTIN_COURSES: &str = include_str!("../../data/course.json");
const BUILTIN_STUDENTS: &str = include_str!("../../data/students.json");
const BUILTIN_GRADES: &str = include_str!("../../data/grade.json");


#[derive(Debug, confique::Config)]
pub(crate) struct SeedConfig {
    /// Directory containing the seed data files `course.json`,
    /// `students.json` and `grade.json`. Each is a JSON array of records. If
    /// not set, the data set compiled into the binary is used.
    ///
    /// The data is only read on startup and never written back.
    pub(crate) dir: Option<PathBuf>,
}

/// The initial records of all three tables.
#[derive(Debug)]
pub(crate) struct Seed {
    pub(crate) courses: Vec<Course>,
    pub(crate) students: Vec<Student>,
    pub(crate) grades: Vec<Grade>,
}

impl Seed {
    pub(crate) async fn load(config: &SeedConfig) -> Result<Self> {
        match &config.dir {
            Some(dir) => Self::load_from_dir(dir).await,
            None => {
                debug!("No seed directory configured, using built-in seed data");
                Self::builtin()
            }
        }
    }

    /// The data set that is compiled into the binary.
    pub(crate) fn builtin() -> Result<Self> {
        Ok(Self {
            courses: parse(BUILTIN_COURSES, "built-in course data")?,
            students: parse(BUILTIN_STUDENTS, "built-in student data")?,
            grades: parse(BUILTIN_GRADES, "built-in grade data")?,
        })
    }

    async fn load_from_dir(dir: &Path) -> Result<Self> {
        info!("Loading seed data from '{}'", dir.display());
        Ok(Self {
            courses: read_file(&dir.join(COURSES_FILE)).await?,
            students: read_file(&dir.join(STUDENTS_FILE)).await?,
            grades: read_file(&dir.join(GRADES_FILE)).await?,
        })
    }

    /// Returns a list of suspicious things in this data set: duplicate ids and
    /// foreign keys referring to nothing. Both are allowed, but probably not
    /// intended.
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        duplicate_ids(&self.courses, &mut out);
        duplicate_ids(&self.students, &mut out);
        duplicate_ids(&self.grades, &mut out);

        let course_ids = self.courses.iter().map(|c| c.id).collect::<HashSet<_>>();
        let student_ids = self.students.iter().map(|s| s.id).collect::<HashSet<_>>();
        for s in &self.students {
            if !course_ids.contains(&s.course_id) {
                out.push(format!("student {} refers to unknown course {}", s.id, s.course_id));
            }
        }
        for g in &self.grades {
            if !course_ids.contains(&g.course_id) {
                out.push(format!("grade {} refers to unknown course {}", g.id, g.course_id));
            }
            if !student_ids.contains(&g.student_id) {
                out.push(format!("grade {} refers to unknown student {}", g.id, g.student_id));
            }
        }

        out
    }
}

fn duplicate_ids<R: Record>(records: &[R], out: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in records.iter().map(Record::id) {
        if !seen.insert(id) && reported.insert(id) {
            out.push(format!("{} id {} is used more than once", R::KIND, id));
        }
    }
}

async fn read_file<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let json = tokio::fs::read_to_string(path).await
        .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
    parse(&json, &path.display().to_string())
}

fn parse<R: DeserializeOwned>(json: &str, source: &str) -> Result<Vec<R>> {
    serde_json::from_str(json).with_context(|| format!("failed to parse seed data '{source}'"))
}
