pub mod output;
pub mod summary;

pub use output::{write_history_csv, write_report_json, write_schedule_csv};
pub use summary::{DayRow, PlanSummary, SlotShare, budget_split, day_rows};
