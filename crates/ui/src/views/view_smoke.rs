use backend::InMemoryBackend;
use portal_core::model::{
    Assessment, AssessmentId, Lesson, LessonId, Question, QuestionId, QuestionKind, Quiz, QuizId,
    UserId,
};
use portal_core::time::fixed_now;
use std::collections::HashMap;

use super::test_harness::{
    ViewKind, setup_view_harness, student_identity, teacher_identity,
};

fn seed_lesson(mem: &InMemoryBackend, author: UserId, title: &str) -> LessonId {
    let id = LessonId::random();
    mem.seed_lesson(
        Lesson::new(
            id,
            title,
            "Where rain comes from",
            "## Stages\n\nEvaporation happens first.",
            "Science",
            6,
            "en",
            author,
            fixed_now(),
        )
        .expect("valid lesson"),
    );
    id
}

fn seed_quiz(mem: &InMemoryBackend, lesson: LessonId, author: UserId) -> QuizId {
    let id = QuizId::random();
    mem.seed_quiz(Quiz::new(
        id,
        lesson,
        "Check your understanding",
        "Two quick questions",
        author,
        fixed_now(),
    ));
    id
}

fn seed_assessment(mem: &InMemoryBackend, student: UserId, lesson: LessonId, percentage: f64) {
    mem.seed_assessment(
        Assessment::from_persisted(
            AssessmentId::random(),
            student,
            QuizId::random(),
            lesson,
            1,
            2,
            percentage,
            fixed_now(),
            Some(fixed_now()),
            HashMap::new(),
        )
        .expect("valid assessment"),
    );
}

#[tokio::test(flavor = "current_thread")]
async fn auth_page_smoke_renders_brand_and_demo_credentials() {
    let mut harness = setup_view_harness(
        ViewKind::Auth,
        InMemoryBackend::new(),
        student_identity(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Gyan Setu"), "missing brand in {html}");
    assert!(html.contains("Bridge of Knowledge"), "missing tagline in {html}");
    assert!(html.contains("Demo Credentials:"), "missing hint in {html}");
    assert!(html.contains("student@example.com"), "missing demo user in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn student_dashboard_smoke_renders_stats_and_continue_strip() {
    let mem = InMemoryBackend::new();
    let user = student_identity();
    let author = UserId::random();
    let done = seed_lesson(&mem, author, "Completed Lesson");
    seed_lesson(&mem, author, "Open Lesson");
    mem.backend()
        .progress
        .ensure_started(user.id(), done, fixed_now())
        .await
        .expect("start progress");
    mem.backend()
        .progress
        .mark_completed(user.id(), done, fixed_now())
        .await
        .expect("complete progress");
    seed_assessment(&mem, user.id(), done, 100.0);
    seed_assessment(&mem, user.id(), done, 50.0);

    let mut harness = setup_view_harness(ViewKind::StudentDashboard, mem, user);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Ria Sharma!"), "missing header in {html}");
    assert!(html.contains("Lessons Completed"), "missing stat in {html}");
    assert!(html.contains("1/2"), "missing completed count in {html}");
    assert!(html.contains("75%"), "missing average in {html}");
    assert!(html.contains("Continue Your Learning"), "missing strip in {html}");
    assert!(html.contains("Open Lesson"), "missing lesson card in {html}");
    assert!(html.contains("All Lessons"), "missing lesson list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn student_dashboard_smoke_with_no_data_shows_zero_average() {
    let mut harness = setup_view_harness(
        ViewKind::StudentDashboard,
        InMemoryBackend::new(),
        student_identity(),
    );
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0/0"), "missing empty count in {html}");
    assert!(html.contains("0%"), "missing zero average in {html}");
    assert!(
        !html.contains("Continue Your Learning"),
        "strip should be hidden in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn teacher_dashboard_smoke_renders_counts_and_roster() {
    let mem = InMemoryBackend::new();
    let teacher = teacher_identity();
    let student = student_identity();
    mem.seed_identity(student.clone());
    let lesson = seed_lesson(&mem, teacher.id(), "Authored Lesson");
    seed_assessment(&mem, student.id(), lesson, 80.0);

    let mut harness = setup_view_harness(ViewKind::TeacherDashboard, mem, teacher);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome, Anita Desai!"), "missing header in {html}");
    assert!(html.contains("Total Students"), "missing stat in {html}");
    assert!(html.contains("Avg Performance"), "missing stat in {html}");
    assert!(html.contains("80%"), "missing average in {html}");
    assert!(html.contains("Recent Student Activity"), "missing roster in {html}");
    assert!(html.contains("Ria Sharma"), "missing student row in {html}");
    assert!(html.contains("Create Lesson"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_creates_progress_and_lists_quizzes() {
    let mem = InMemoryBackend::new();
    let user = student_identity();
    let author = UserId::random();
    let lesson = seed_lesson(&mem, author, "The Water Cycle");
    seed_quiz(&mem, lesson, author);

    let mut harness = setup_view_harness(ViewKind::Lesson(lesson), mem, user);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("The Water Cycle"), "missing title in {html}");
    assert!(html.contains("Grade 6 • Science • en"), "missing meta in {html}");
    assert!(html.contains("<h2>Stages</h2>"), "missing rendered body in {html}");
    assert!(html.contains("Mark as Complete"), "missing action in {html}");
    assert!(html.contains("Assessment Quizzes"), "missing quiz list in {html}");
    assert!(html.contains("Take Quiz"), "missing quiz action in {html}");

    // Viewing lazily created exactly one in-progress record.
    let record = harness
        .mem
        .backend()
        .progress
        .get_progress(harness.user.id(), lesson)
        .await
        .expect("progress read")
        .expect("progress row created by viewing");
    assert_eq!(record.percentage(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_missing_lesson_fails_the_view() {
    let mut harness = setup_view_harness(
        ViewKind::Lesson(LessonId::random()),
        InMemoryBackend::new(),
        student_identity(),
    );
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This content is no longer available."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_player_smoke_renders_the_first_question() {
    let mem = InMemoryBackend::new();
    let user = student_identity();
    let author = UserId::random();
    let lesson = seed_lesson(&mem, author, "States of Matter");
    let quiz = seed_quiz(&mem, lesson, author);
    mem.seed_question(
        Question::new(
            QuestionId::random(),
            quiz,
            "Which state holds its shape?",
            QuestionKind::MultipleChoice,
            vec!["Solid".into(), "Liquid".into()],
            "Solid",
            5,
            0,
        )
        .expect("valid question"),
    );
    mem.seed_question(
        Question::new(
            QuestionId::random(),
            quiz,
            "Name the state water takes when boiled.",
            QuestionKind::ShortAnswer,
            Vec::new(),
            "Gas",
            10,
            1,
        )
        .expect("valid question"),
    );

    let mut harness = setup_view_harness(ViewKind::Quiz(quiz), mem, user);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Check your understanding"), "missing title in {html}");
    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
    assert!(html.contains("Which state holds its shape?"), "missing prompt in {html}");
    assert!(html.contains("Solid"), "missing option in {html}");
    assert!(html.contains("Previous"), "missing nav in {html}");
    assert!(html.contains("Next"), "missing nav in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_player_smoke_rejects_an_empty_quiz() {
    let mem = InMemoryBackend::new();
    let user = student_identity();
    let author = UserId::random();
    let lesson = seed_lesson(&mem, author, "States of Matter");
    let quiz = seed_quiz(&mem, lesson, author);

    let mut harness = setup_view_harness(ViewKind::Quiz(quiz), mem, user);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This quiz has no questions yet."),
        "missing policy message in {html}"
    );
}
