//! Card insights
//!
//! A playful two-line bio and a 0..=100 compatibility score, both derived
//! purely from an item's statistics.

use super::ReviewStats;

const MAX_BIO_LINES: usize = 2;
const FALLBACK_BIO: &str = "Just here to get merged.";

/// Build the card bio
///
/// Candidate lines are grouped by priority (age, code, commits, other);
/// at most two lines are kept, highest priority first.
pub fn generate_bio(stats: &ReviewStats) -> String {
    let mut age = Vec::new();
    let mut code = Vec::new();
    let mut commits = Vec::new();
    let mut other = Vec::new();

    if stats.age_days > 30 {
        age.push(format!(
            "I've been waiting {} days for someone to notice me.",
            stats.age_days
        ));
    } else if stats.age_days < 1 {
        age.push("Fresh out today. Still warm.".to_string());
    }

    if stats.additions > 500 {
        code.push(format!(
            "I'm not afraid of commitment: +{} lines speak for themselves.",
            stats.additions
        ));
    } else if stats.deletions > stats.additions {
        code.push("Minimalist at heart. Here to clean things up.".to_string());
    }
    if stats.additions > 1000 && stats.deletions > 500 {
        code.push("I live for chaos and refactors. Let's rewrite everything.".to_string());
    }

    if stats.changed_files == 1 {
        code.push("Just one file. I don't like to make things complicated.".to_string());
    } else if stats.changed_files > 20 {
        code.push(format!(
            "I touched {} files. I contain multitudes.",
            stats.changed_files
        ));
    }

    if stats.commits == 1 {
        commits.push("One shot, one commit. No regrets.".to_string());
    } else if stats.commits > 10 {
        commits.push(format!(
            "{} commits deep. I have a complex history.",
            stats.commits
        ));
    }

    if stats.draft {
        other.push("Still figuring myself out. (Draft PR)".to_string());
    }
    if !stats.requested_reviewers.is_empty() {
        other.push(format!(
            "Already have {} eyes on me. High demand.",
            stats.requested_reviewers.len()
        ));
    }
    if has_label(stats, "bug") {
        other.push("I fix broken things. That includes bugs and bad relationships.".to_string());
    } else if has_label(stats, "feature") {
        other.push("Here to add value to your life.".to_string());
    } else if has_label(stats, "hotfix") {
        other.push("Emergency services, but make it code.".to_string());
    }

    let lines: Vec<String> = [age, code, commits, other]
        .into_iter()
        .flat_map(|group| group.into_iter().take(MAX_BIO_LINES))
        .take(MAX_BIO_LINES)
        .collect();

    if lines.is_empty() {
        FALLBACK_BIO.to_string()
    } else {
        lines.join("\n")
    }
}

/// Score how pleasant an item is to land, clamped to 0..=100
pub fn compatibility_score(stats: &ReviewStats) -> u8 {
    let mergeable = match stats.mergeable {
        Some(true) => 10,
        Some(false) => -20,
        None => 0,
    };
    let freshness = (20 - stats.age_days).clamp(-20, 10);
    let draft = if stats.draft { -5 } else { 0 };
    let small_history = if stats.commits <= 5 { 5 } else { 0 };
    let small_change = if stats.changed_files <= 10 { 5 } else { 0 };
    let discussed = if stats.comments + stats.review_comments > 0 {
        5
    } else {
        0
    };

    let score = 50 + mergeable + freshness + draft + small_history + small_change + discussed;
    score.clamp(0, 100) as u8
}

fn has_label(stats: &ReviewStats, label: &str) -> bool {
    stats.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
}
