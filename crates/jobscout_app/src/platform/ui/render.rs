use jobscout_core::{AppViewModel, JobCardView, ResultsView};

use super::layout::{KEYWORD_PLACEHOLDER, LOADING_BANNER, NO_JOBS, RULE, SITES_PLACEHOLDER};

/// Renders a full snapshot of the view as text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    lines.push(format!("Site:    {}", site_selector(view)));
    lines.push(format!(
        "Keyword: {}",
        if view.keyword.is_empty() {
            KEYWORD_PLACEHOLDER
        } else {
            view.keyword.as_str()
        }
    ));
    lines.push(if view.search_enabled {
        format!("[ {} ]", view.search_label)
    } else {
        format!("[ {} ] (disabled)", view.search_label)
    });

    // Error and loading banners are independent of each other.
    if let Some(error) = &view.error {
        lines.push(String::new());
        lines.push(format!("Error: {error}"));
    }
    if view.is_loading {
        lines.push(String::new());
        lines.push(LOADING_BANNER.to_string());
    }

    if let Some(results) = &view.results {
        lines.push(String::new());
        lines.extend(render_results(results));
    }

    lines
}

fn site_selector(view: &AppViewModel) -> String {
    if !view.site_selector_enabled {
        return format!("{SITES_PLACEHOLDER} (disabled)");
    }
    view.sites
        .iter()
        .enumerate()
        .map(|(index, site)| {
            let marker = if view.selected_site.as_ref() == Some(site) {
                "*"
            } else {
                " "
            };
            format!("[{}]{marker}{site}", index + 1)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_results(results: &ResultsView) -> Vec<String> {
    let mut lines = vec![format!(
        "Total Jobs Found: {} | Unique Companies: {} | Relevant Jobs Found: {}",
        results.total_jobs, results.unique_companies, results.relevant_jobs
    )];
    lines.push(String::new());

    if results.jobs.is_empty() {
        lines.push(NO_JOBS.to_string());
        return lines;
    }

    for (index, job) in results.jobs.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(render_job_card(index + 1, job));
    }
    lines
}

fn render_job_card(number: usize, job: &JobCardView) -> Vec<String> {
    vec![
        format!("{number}. {}", job.title),
        format!("   {}", job.company),
        format!("   {}", job.link.as_deref().unwrap_or("(no link)")),
        format!(
            "   Published: {} | Deadline: {}",
            job.published_date, job.deadline_date
        ),
    ]
}
