pub const TITLE: &str = "Job Scraper";
pub const SUBTITLE: &str = "Find relevant jobs from multiple sources.";
pub const KEYWORD_PLACEHOLDER: &str = "Optional: filter by custom keyword...";
pub const SITES_PLACEHOLDER: &str = "Loading sites...";
pub const LOADING_BANNER: &str = "Scraping in progress, please wait...";
pub const NO_JOBS: &str = "No jobs found matching your criteria.";
pub const RULE: &str = "------------------------------------------------------------";

/// Printed once when the app starts.
pub fn header_lines() -> Vec<String> {
    vec![
        TITLE.to_string(),
        SUBTITLE.to_string(),
        String::new(),
        "Type 'help' for commands.".to_string(),
    ]
}

pub fn help_lines() -> Vec<String> {
    [
        "Commands:",
        "  site <name|number>   choose the site to scrape",
        "  keyword [text]       set the keyword filter (empty clears it)",
        "  search               run the scrape",
        "  reload               fetch the site list again",
        "  <enter>              redraw",
        "  help                 show this help",
        "  quit                 exit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
