pub mod chart;
pub mod export;
pub mod prompts;
pub mod render;

pub use chart::display_charts;
pub use export::{plan_to_json, save_plan_json};
pub use prompts::{
    MenuChoice, prompt_activity, prompt_body_profile, prompt_custom_targets, prompt_exclusions,
    prompt_goal, prompt_menu, prompt_number, prompt_preset, prompt_tolerance, prompt_yes_no,
};
pub use render::{
    display_comparison, display_daily_plan, display_food_list, display_personal_targets,
};
