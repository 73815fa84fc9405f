use crate::app::TechNerd;
use crate::store::SelectionStore;
use crate::types::{JobPosting, RepositoryRecord, SuggestionRow};

const PREVIEW_CHARS: usize = 120;

pub fn rule() -> String {
    "=".repeat(60)
}

pub fn heading(title: &str) {
    println!("\n{}", rule());
    println!("{}", title);
    println!("{}", rule());
}

pub fn render_report(app: &TechNerd) {
    let store = app.store();

    heading("REPOSITORY");
    match store.current_repository() {
        Some(repo) => {
            if let Some(strategy) = app.matched_by() {
                println!("(matched by {})", strategy);
            }
            render_repository(repo, store);
            render_suggestions(app.suggestions());
        }
        None => println!("No repository fetched yet."),
    }

    heading("JOB");
    match store.current_job() {
        Some(job) => render_job(job, store),
        None => println!("Search by keyword to fetch matching job postings."),
    }

    render_messages(app);
}

pub fn render_repository(repo: &RepositoryRecord, store: &SelectionStore) {
    println!("  {}", repo.full_name);
    println!("    Name:     {}", repo.name);
    println!("    Owner:    {} ({})", repo.owner.login, repo.owner.avatar_url);
    println!(
        "    Language: {}",
        repo.language.as_deref().unwrap_or("No language info")
    );
    println!(
        "    License:  {}",
        repo.license
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("No license info")
    );
    println!("    ⭐ {} | Forks: {}", repo.stargazers_count, repo.forks_count);

    let topics = visible(&repo.topics, store);
    if !topics.is_empty() {
        println!("    Topics:   {}", topics.join(", "));
    }
    if let Some(desc) = &repo.description {
        println!("    {}", desc);
    }
    println!("    {}", repo.html_url);
}

pub fn render_job(job: &JobPosting, store: &SelectionStore) {
    println!("  {}", job.title);
    println!("    Company:  {}", job.company_name);
    println!("    Location: {}", job.location);

    let tags = visible(&job.tags, store);
    if !tags.is_empty() {
        println!("    Tags:     {}", tags.join(" | "));
    }
    match &job.image {
        Some(image) => println!("    Image:    {}", image),
        None => println!("    No job image available"),
    }
    if !job.link.is_empty() {
        println!("    {}", job.link);
    }
}

pub fn render_suggestions(rows: &[SuggestionRow]) {
    if rows.is_empty() {
        return;
    }
    println!("\n  Suggested Schools");
    println!("  {:>3}  School or University", "#");
    for row in rows {
        println!("  {:>3}  {}", row.id, row.item);
    }
}

pub fn render_history(store: &SelectionStore) {
    heading("PREVIOUS REPOSITORIES");
    if store.previous_repositories().is_empty() {
        println!("No previous repositories.");
    }
    for repo in store.previous_repositories() {
        println!("  {}", repo.full_name);
        println!(
            "    {}",
            preview(repo.description.as_deref().unwrap_or("No description provided."))
        );
        println!("    {}", repo.html_url);
    }

    heading("PREVIOUS JOBS");
    if store.previous_jobs().is_empty() {
        println!("No previous jobs.");
    }
    for job in store.previous_jobs() {
        println!("  {} at {}", job.title, job.company_name);
        let tags = visible(&job.tags, store);
        if !tags.is_empty() {
            println!("    {}", tags.join(" | "));
        }
        println!("    {}", preview(&job.description));
    }
}

pub fn render_banned(store: &SelectionStore) {
    if store.banned_labels().is_empty() {
        println!("No labels banned yet. Use ':ban <label>' to hide a topic or tag.");
        return;
    }
    println!("Banned labels:");
    for label in store.banned_labels() {
        println!("  {} ✕", label);
    }
}

pub fn render_messages(app: &TechNerd) {
    if let Some(message) = app.message() {
        eprintln!("{}", message);
    }
    if let Some(message) = app.jobs_message() {
        eprintln!("{}", message);
    }
}

fn visible<'a>(labels: &'a [String], store: &SelectionStore) -> Vec<&'a str> {
    labels
        .iter()
        .filter(|label| !store.is_banned(label))
        .map(String::as_str)
        .collect()
}

/// Cuts long text to a one-screen preview on a char boundary.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}
