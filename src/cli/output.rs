use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub name: String,
    pub xp: u64,
    pub progress: u64,
    #[serde(rename = "lastWork")]
    pub last_work: String,
    pub resources: Vec<String>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: Option<u64>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        name: task.name.clone(),
        xp: task.xp,
        progress: task.xp_progress(),
        last_work: task.last_work.clone(),
        resources: task.resources.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Text progress bar, `width` cells wide, filled to `percent`
pub fn format_xp_bar(percent: u64, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!("{}  {}  xp {}", task.id, task.name, task.xp)
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", task.id, task.name)];
    lines.push(format!(
        "xp: {} {} {}%",
        task.xp,
        format_xp_bar(task.xp_progress(), 20),
        task.xp_progress()
    ));

    if !task.last_work.is_empty() {
        lines.push("last worked on:".to_string());
        for line in task.last_work.lines() {
            lines.push(format!("  {}", line));
        }
    }

    if !task.resources.is_empty() {
        lines.push("resources:".to_string());
        for r in &task.resources {
            lines.push(format!("  - {}", r));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        let mut task = Task::new(1700000000000, "Learn Rust");
        task.xp = 130;
        task.last_work = "ownership\nborrowing".into();
        task.resources = vec!["https://doc.rust-lang.org/book/".into()];
        task
    }

    #[test]
    fn xp_bar_fill() {
        assert_eq!(format_xp_bar(0, 10), "[..........]");
        assert_eq!(format_xp_bar(30, 10), "[###.......]");
        assert_eq!(format_xp_bar(100, 4), "[####]");
    }

    #[test]
    fn task_line() {
        assert_eq!(
            format_task_line(&sample()),
            "1700000000000  Learn Rust  xp 130"
        );
    }

    #[test]
    fn task_detail() {
        insta::assert_snapshot!(format_task_detail(&sample()).join("\n"), @r"
        1700000000000  Learn Rust
        xp: 130 [######..............] 30%
        last worked on:
          ownership
          borrowing
        resources:
          - https://doc.rust-lang.org/book/
        ");
    }

    #[test]
    fn task_detail_minimal() {
        let task = Task::new(5, "Fresh");
        assert_eq!(
            format_task_detail(&task),
            vec!["5  Fresh", "xp: 0 [....................] 0%"]
        );
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(task_to_json(&sample())).unwrap();
        assert_eq!(json["progress"], 30);
        assert_eq!(json["lastWork"], "ownership\nborrowing");
        assert_eq!(json["resources"][0], "https://doc.rust-lang.org/book/");
    }
}
