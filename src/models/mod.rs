pub mod meal;
pub mod schedule;

pub use meal::{MealItem, MealRecord, MealSlot};
pub use schedule::{DAYS_PER_WEEK, DayPlan, Evaluation, WeeklySchedule};
