//! Output formatting

use std::fmt::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use survey_form::{AnswerType, LikertValue, ResultsSummary, Survey};
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Print `data` as JSON, or the `table` rendering otherwise.
    pub fn print<T: Serialize>(&self, data: &T, table: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Table => print!("{}", table(data)),
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct SurveyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Participants")]
    participants: usize,
    #[tabled(rename = "Actions")]
    actions: String,
}

impl From<&Survey> for SurveyRow {
    fn from(survey: &Survey) -> Self {
        let actions = if survey.is_draft() {
            "show, edit, send, copy, results, delete"
        } else {
            "show, copy, results, delete"
        };
        Self {
            id: survey.id.to_string(),
            name: survey.name.clone(),
            status: survey.status.to_string(),
            expires: expiry(survey),
            participants: survey.participant_total(),
            actions: actions.to_string(),
        }
    }
}

fn expiry(survey: &Survey) -> String {
    survey
        .expire_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn survey_table(surveys: &[Survey]) -> String {
    if surveys.is_empty() {
        return "No surveys yet. Create one with `survey-studio create`.\n".to_string();
    }
    let rows: Vec<SurveyRow> = surveys.iter().map(SurveyRow::from).collect();
    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

pub fn survey_details(survey: &Survey) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", survey.name, survey.status);
    let _ = writeln!(out, "ID:           {}", survey.id);
    let _ = writeln!(out, "Expires:      {}", expiry(survey));
    let _ = writeln!(out, "Participants: {}", survey.participant_total());
    for email in &survey.participants {
        let _ = writeln!(out, "  - {email}");
    }
    let _ = writeln!(out, "Questions:");
    if survey.questions.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (i, question) in survey.questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} [{}]",
            i + 1,
            question.text(),
            question.answer_type().label()
        );
    }
    out
}

const BAR_WIDTH: usize = 20;

pub fn results_report(summary: &ResultsSummary) -> String {
    let mut out = String::new();
    let total = summary.total_responses;
    let _ = writeln!(out, "Responses: {total}");
    let overall = summary
        .overall_likert_average()
        .map(|avg| format!("{avg:.2}"))
        .unwrap_or_else(|| "N/A".to_string());
    let _ = writeln!(out, "Overall average: {overall}");

    for (i, question) in summary.questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {} [{}]",
            i + 1,
            question.text,
            question.answer_type.label()
        );
        match question.answer_type {
            AnswerType::Likert => {
                let average = question
                    .likert_average
                    .map(|avg| format!("{avg:.2}"))
                    .unwrap_or_else(|| "N/A".to_string());
                let _ = writeln!(out, "   Average: {average}");
                for value in LikertValue::all().rev() {
                    let count = question.count_for(value.get());
                    let share = question.distribution_share(value.get(), total);
                    let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
                    let _ = writeln!(
                        out,
                        "   {:<20} {}{} {count} ({share:.0}%)",
                        value.to_string(),
                        "█".repeat(filled.min(BAR_WIDTH)),
                        "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                    );
                }
            }
            AnswerType::FreeText => {
                if question.free_text_responses.is_empty() {
                    let _ = writeln!(out, "   No responses yet.");
                }
                for response in &question.free_text_responses {
                    let _ = writeln!(out, "   \"{response}\"");
                }
            }
        }
    }
    out
}
