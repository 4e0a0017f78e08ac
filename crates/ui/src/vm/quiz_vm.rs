use portal_core::model::{Answer, QuestionKind};
use services::{QuizPlayer, QuizResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub text: String,
    pub selected: bool,
}

/// A render snapshot of the player at its current question.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizStepVm {
    pub title: String,
    pub counter_label: String,
    pub progress_width: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Vec<QuizOptionVm>,
    pub typed: String,
    pub at_first: bool,
    pub at_last: bool,
}

#[must_use]
pub fn map_quiz_step(player: &QuizPlayer) -> QuizStepVm {
    let question = player.current_question();
    let selected = player.current_answer().map(Answer::as_str);
    let typed = match player.current_answer() {
        Some(Answer::Text(text)) => text.clone(),
        _ => String::new(),
    };

    #[allow(clippy::cast_precision_loss)]
    let progress =
        100.0 * (player.current_index() + 1) as f64 / player.question_count() as f64;

    QuizStepVm {
        title: player.quiz().title().to_string(),
        counter_label: format!(
            "Question {} of {}",
            player.current_index() + 1,
            player.question_count()
        ),
        progress_width: format!("{progress:.0}%"),
        prompt: question.prompt().to_string(),
        kind: question.kind(),
        options: question
            .options()
            .iter()
            .map(|option| QuizOptionVm {
                text: option.clone(),
                selected: selected == Some(option.as_str()),
            })
            .collect(),
        typed,
        at_first: player.at_first(),
        at_last: player.at_last(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub percentage_label: String,
    pub marks_label: String,
}

#[must_use]
pub fn map_quiz_result(result: &QuizResult) -> QuizResultVm {
    QuizResultVm {
        percentage_label: format!("{:.1}%", result.percentage),
        marks_label: format!("{} out of {} marks", result.score, result.total_marks),
    }
}
