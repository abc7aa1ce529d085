use campus_api::domain::types::CourseFilter;
use campus_api::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, ListCoursesInput, ListCoursesUseCase,
};
use campus_core::error::ApiError;
use campus_domain::course::{CourseSort, CourseSortField, Difficulty};
use campus_domain::pagination::{PageQuery, Sort};

use crate::helpers::{MockCourseRepo, test_course};

fn create_input(title: &str, code: &str) -> CreateCourseInput {
    CreateCourseInput {
        title: title.to_owned(),
        description: format!("{title} description"),
        code: code.to_owned(),
        difficulty: Some(Difficulty::Beginner),
    }
}

fn list_input(filter: CourseFilter, sort: CourseSort, page: PageQuery) -> ListCoursesInput {
    ListCoursesInput { filter, sort, page }
}

// ── CreateCourseUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_course_and_find_it_by_code() {
    let repo = MockCourseRepo::empty();
    let courses_handle = repo.courses_handle();

    let usecase = CreateCourseUseCase { courses: repo };
    let course = usecase
        .execute(create_input("Rust Fundamentals", "RUST101"))
        .await
        .unwrap();

    assert_eq!(course.code, "RUST101");
    assert_eq!(course.difficulty, Difficulty::Beginner);
    let stored = courses_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, course.id);
}

#[tokio::test]
async fn should_reject_duplicate_course_code() {
    let usecase = CreateCourseUseCase {
        courses: MockCourseRepo::new(vec![test_course(
            "Rust Fundamentals",
            "RUST101",
            Difficulty::Beginner,
            0,
        )]),
    };
    let result = usecase.execute(create_input("Another Course", "RUST101")).await;
    assert!(
        matches!(result, Err(ApiError::Conflict(ref m)) if m == "Course code already exists"),
        "expected Conflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_default_difficulty_to_beginner() {
    let usecase = CreateCourseUseCase {
        courses: MockCourseRepo::empty(),
    };
    let course = usecase
        .execute(CreateCourseInput {
            title: "Rust Fundamentals".to_owned(),
            description: "desc".to_owned(),
            code: "RUST101".to_owned(),
            difficulty: None,
        })
        .await
        .unwrap();
    assert_eq!(course.difficulty, Difficulty::Beginner);
}

#[tokio::test]
async fn should_require_title_description_and_code() {
    let usecase = CreateCourseUseCase {
        courses: MockCourseRepo::empty(),
    };

    let missing_title = usecase
        .execute(CreateCourseInput {
            title: String::new(),
            description: "desc".to_owned(),
            code: "RUST101".to_owned(),
            difficulty: None,
        })
        .await;
    assert!(matches!(missing_title, Err(ApiError::BadRequest(ref m)) if m == "Title is required"));

    let missing_code = usecase
        .execute(CreateCourseInput {
            title: "Rust".to_owned(),
            description: "desc".to_owned(),
            code: String::new(),
            difficulty: None,
        })
        .await;
    assert!(matches!(missing_code, Err(ApiError::BadRequest(ref m)) if m == "Code is required"));
}

// ── ListCoursesUseCase ───────────────────────────────────────────────────────

fn catalog(count: usize) -> Vec<campus_api::domain::types::Course> {
    (0..count)
        .map(|i| {
            test_course(
                &format!("Course {i:03}"),
                &format!("C{i:03}"),
                Difficulty::Beginner,
                i as i64,
            )
        })
        .collect()
}

#[tokio::test]
async fn should_paginate_with_metadata() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(catalog(25)),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter::default(),
            CourseSort::default(),
            PageQuery { limit: 10, page: 3 },
        ))
        .await
        .unwrap();

    assert_eq!(out.courses.len(), 5);
    assert_eq!(out.meta.total_items, 25);
    assert_eq!(out.meta.total_pages, 3);
    assert_eq!(out.meta.current_page, 3);
    assert_eq!(out.meta.page_size, 10);
}

#[tokio::test]
async fn should_clamp_oversized_limit_to_100() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(catalog(150)),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter::default(),
            CourseSort::default(),
            PageQuery {
                limit: 1000,
                page: 1,
            },
        ))
        .await
        .unwrap();

    assert_eq!(out.courses.len(), 100);
    assert_eq!(out.meta.page_size, 100);
    assert_eq!(out.meta.total_items, 150);
    assert_eq!(out.meta.total_pages, 2);
}

#[tokio::test]
async fn should_sort_newest_first_by_default() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(catalog(5)),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter::default(),
            CourseSort::default(),
            PageQuery::default(),
        ))
        .await
        .unwrap();

    // age_days grows with the index, so Course 000 is the newest.
    assert_eq!(out.courses[0].title, "Course 000");
    assert_eq!(out.courses[4].title, "Course 004");
}

#[tokio::test]
async fn should_sort_by_title_ascending() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![
            test_course("Zig Basics", "ZIG101", Difficulty::Beginner, 0),
            test_course("Ada Basics", "ADA101", Difficulty::Beginner, 1),
        ]),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter::default(),
            CourseSort {
                field: CourseSortField::Title,
                order: Sort::Asc,
            },
            PageQuery::default(),
        ))
        .await
        .unwrap();
    assert_eq!(out.courses[0].title, "Ada Basics");
    assert_eq!(out.courses[1].title, "Zig Basics");
}

#[tokio::test]
async fn should_filter_by_difficulty() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![
            test_course("Intro", "C001", Difficulty::Beginner, 0),
            test_course("Deep Dive", "C002", Difficulty::Advanced, 1),
            test_course("Overview", "C003", Difficulty::Beginner, 2),
        ]),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter {
                difficulty: Some(Difficulty::Beginner),
                title: None,
            },
            CourseSort::default(),
            PageQuery::default(),
        ))
        .await
        .unwrap();

    assert_eq!(out.meta.total_items, 2);
    assert!(
        out.courses
            .iter()
            .all(|c| c.difficulty == Difficulty::Beginner)
    );
}

#[tokio::test]
async fn should_filter_title_case_insensitively() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![
            test_course("Advanced SQL", "SQL201", Difficulty::Intermediate, 0),
            test_course("Intro to Node.js", "NODE101", Difficulty::Beginner, 1),
        ]),
    };
    let out = usecase
        .execute(list_input(
            CourseFilter {
                difficulty: None,
                title: Some("sql".to_owned()),
            },
            CourseSort::default(),
            PageQuery::default(),
        ))
        .await
        .unwrap();

    assert_eq!(out.meta.total_items, 1);
    assert_eq!(out.courses[0].code, "SQL201");
}
