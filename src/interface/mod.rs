pub mod prompts;
pub mod render;

pub use prompts::{prompt_exclusions, prompt_run_config, resolve_categories, resolve_category};
pub use render::{ConsoleProgress, display_catalog, display_plan};
