//! Savings goal display formatting

use chrono::NaiveDate;
use tabled::Tabled;

use super::{format_bar, format_percentage, render_table};
use crate::budget::GoalPace;
use crate::models::{Money, SavingsGoal};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Pace")]
    pace: String,
}

pub fn format_goal_table(goals: &[SavingsGoal], today: NaiveDate) -> String {
    let rows = goals
        .iter()
        .map(|goal| GoalRow {
            id: goal.id.to_string(),
            name: goal.name.clone(),
            saved: goal.current_amount.to_string(),
            target: goal.target_amount.to_string(),
            progress: format!(
                "{} {}",
                format_bar(goal.progress(), 100.0, 10),
                format_percentage(goal.progress())
            ),
            due: goal.target_date.format("%Y-%m-%d").to_string(),
            pace: GoalPace::project(goal, today).to_string(),
        })
        .collect();
    render_table(rows, "No savings goals found.")
}

pub fn format_goal_details(goal: &SavingsGoal, today: NaiveDate) -> String {
    let pace = GoalPace::project(goal, today);
    let mut output = String::new();

    output.push_str(&format!("Savings goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!("  Target:    {}\n", goal.target_amount));
    output.push_str(&format!("  Saved:     {}\n", goal.current_amount));
    output.push_str(&format!("  Remaining: {}\n", goal.remaining().max(Money::zero())));
    output.push_str(&format!(
        "  Progress:  {} {}\n",
        format_bar(goal.progress(), 100.0, 20),
        format_percentage(goal.progress())
    ));
    output.push_str(&format!("  Due:       {}\n", goal.target_date.format("%Y-%m-%d")));
    if !goal.category_name.is_empty() {
        output.push_str(&format!("  Envelope:  {}\n", goal.category_name));
    }
    output.push_str(&format!("  Pace:      {}\n", pace));
    if pace.is_at_risk() {
        output.push_str("\n  This goal is at risk of missing its target date.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalId;

    fn goal(current: i64) -> SavingsGoal {
        SavingsGoal {
            id: GoalId::new(1),
            user: None,
            name: "Car".into(),
            target_amount: Money::from_cents(100_000),
            current_amount: Money::from_cents(current),
            target_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            is_completed: false,
            progress_percentage: None,
            remaining_amount: None,
            category_name: "Savings".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_table() {
        let output = format_goal_table(&[goal(25_000)], today());
        assert!(output.contains("Car"));
        assert!(output.contains("25%"));
        assert!(output.contains("Overdue"));
    }

    #[test]
    fn test_details_at_risk() {
        let output = format_goal_details(&goal(25_000), today());
        assert!(output.contains("at risk"));
        let done = format_goal_details(&goal(100_000), today());
        assert!(done.contains("Completed"));
        assert!(!done.contains("at risk"));
    }
}
