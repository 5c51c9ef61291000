//! Relations between records.
//!
//! Every relation is resolved by a linear scan over the related collection,
//! comparing a foreign key field. The first match in insertion order wins, any
//! further matches are invisible. That is fine for the tiny data sets we deal
//! with.

use crate::model::{Course, Grade, Student};


/// The first student enrolled in `course`.
pub(crate) fn student_of_course<'a>(course: &Course, students: &'a [Student]) -> Option<&'a Student> {
    students.iter().find(|s| s.course_id == course.id)
}

/// The first grade given in `course`.
pub(crate) fn grade_of_course<'a>(course: &Course, grades: &'a [Grade]) -> Option<&'a Grade> {
    grades.iter().find(|g| g.course_id == course.id)
}

/// The course `student` is enrolled in.
pub(crate) fn course_of_student<'a>(student: &Student, courses: &'a [Course]) -> Option<&'a Course> {
    courses.iter().find(|c| c.id == student.course_id)
}

/// The first grade of `student`.
pub(crate) fn grade_of_student<'a>(student: &Student, grades: &'a [Grade]) -> Option<&'a Grade> {
    grades.iter().find(|g| g.student_id == student.id)
}

/// The course `grade` was given in.
pub(crate) fn course_of_grade<'a>(grade: &Grade, courses: &'a [Course]) -> Option<&'a Course> {
    courses.iter().find(|c| c.id == grade.course_id)
}

/// The student `grade` was given to.
pub(crate) fn student_of_grade<'a>(grade: &Grade, students: &'a [Student]) -> Option<&'a Student> {
    students.iter().find(|s| s.id == grade.student_id)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i32) -> Course {
        Course { id, name: format!("course {id}"), description: String::new() }
    }

    fn student(id: i32, course_id: i32) -> Student {
        Student { id, name: format!("student {id}"), lastname: String::new(), course_id }
    }

    fn grade(id: i32, course_id: i32, student_id: i32) -> Grade {
        Grade { id, course_id, student_id, grade: 5 }
    }

    #[test]
    fn first_match_wins() {
        let students = [student(1, 2), student(2, 1), student(3, 1)];
        let found = student_of_course(&course(1), &students).map(|s| s.id);
        assert_eq!(found, Some(2));

        let grades = [grade(7, 1, 3), grade(4, 1, 3)];
        assert_eq!(grade_of_course(&course(1), &grades).map(|g| g.id), Some(7));
        assert_eq!(grade_of_student(&student(3, 1), &grades).map(|g| g.id), Some(7));
    }

    #[test]
    fn no_match() {
        let courses = [course(1), course(2)];
        assert_eq!(course_of_student(&student(1, 9), &courses), None);
        assert_eq!(course_of_grade(&grade(1, 9, 1), &courses), None);
        assert_eq!(student_of_course(&course(1), &[]), None);
        assert_eq!(student_of_grade(&grade(1, 1, 4), &[student(1, 1)]), None);
    }

    #[test]
    fn follows_foreign_keys() {
        let courses = [course(1), course(2)];
        let students = [student(1, 2), student(2, 1)];
        let g = grade(1, 2, 1);

        assert_eq!(course_of_student(&students[0], &courses), Some(&courses[1]));
        assert_eq!(course_of_grade(&g, &courses), Some(&courses[1]));
        assert_eq!(student_of_grade(&g, &students), Some(&students[0]));
    }
}
