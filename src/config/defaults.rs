pub fn default_plan_type() -> String {
    "D&D Session Plan".to_string()
}

pub fn default_session_type() -> String {
    "D&D Session Summary".to_string()
}

pub fn default_planner_interaction() -> String {
    "DungeonsAndDragonsSessionPlanner".to_string()
}

pub fn default_summarizer_interaction() -> String {
    "DungeonsAndDragonsSessionSummarizer".to_string()
}

pub fn default_opening_guide() -> String {
    "store:66d97ce0ca04fdf05f1a1151".to_string()
}

pub fn default_session_guide() -> String {
    "store:66d97ce8ca04fdf05f1a1161".to_string()
}

pub fn default_party_level() -> u32 {
    1
}

pub fn default_party_size() -> u32 {
    4
}

pub fn default_party_classes() -> Vec<String> {
    ["Paladin", "Wizard", "Rogue", "Cleric", "Druid"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

pub fn default_timeout_sec() -> u64 {
    300
}
