//! Plain-text rendering of the records shown by the commands
//!
//! Everything here is pure so that the layout can be tested without a
//! server.

use std::fmt::Write;

use eyesfood_client::{
    api::{Article, Comment, Expert, FoodAdvice, Recommendation},
    format_date, ExpertStat,
};

fn plural(n: usize, word: &str) -> String {
    match n {
        1 => format!("1 {word}"),
        n => format!("{n} {word}s"),
    }
}

fn or_unknown(s: Option<&str>) -> &str {
    match s {
        Some(s) if !s.trim().is_empty() => s,
        _ => "(unknown)",
    }
}

pub fn stat_line(stat: &ExpertStat) -> String {
    let mut res = format!(
        "{}, {}",
        plural(stat.recommendation_count, "recommendation"),
        plural(stat.total_comments, "comment"),
    );
    if stat.user_has_recommended {
        res.push_str(" [you recommend them]");
    } else if stat.user_has_commented {
        res.push_str(" [you commented]");
    }
    res
}

/// One entry of the expert list
pub fn expert_card(e: &Expert, stat: &ExpertStat) -> String {
    let mut res = String::from(or_unknown(e.name()));
    if let Some(s) = e.specialty.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(res, " ({s})");
    }
    let _ = write!(res, "\n  {}", e.professions());
    if let Some(email) = e.email().filter(|m| !m.is_empty()) {
        let _ = write!(res, "\n  email: {email}");
    }
    if let Some(url) = e.web_page_url() {
        let _ = write!(res, "\n  web page: {url}");
    }
    let _ = write!(res, "\n  {}\n  user id: {}", stat_line(stat), e.user_id);
    res
}

fn recommendation(r: Recommendation) -> &'static str {
    match r {
        Recommendation::Recommended => "recommends",
        Recommendation::NotRecommended => "does not recommend",
        Recommendation::Undecided => "undecided",
    }
}

pub fn comment_line(c: &Comment) -> String {
    let author = c
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .unwrap_or(c.user_id.as_str());
    let date = c
        .created_at
        .as_ref()
        .map(format_date)
        .unwrap_or_else(|| String::from("??/??/????"));
    format!(
        "[{}] {date} {author} ({}): {}",
        c.id,
        recommendation(c.is_recommended),
        c.content(),
    )
}

/// Full profile of an expert followed by the comments about them
pub fn expert_detail(e: &Expert, stat: &ExpertStat, comments: &[&Comment]) -> String {
    let mut res = expert_card(e, stat);
    for (label, value) in [("phone", &e.phone), ("address", &e.address)] {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            let _ = write!(res, "\n  {label}: {v}");
        }
    }
    if let Some(d) = e.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(res, "\n\n{d}");
    }
    res.push_str("\n\nComments:");
    let mut visible = comments.iter().filter(|c| !c.is_hidden).peekable();
    if visible.peek().is_none() {
        res.push_str("\n  no comments yet");
    }
    for c in visible {
        let _ = write!(res, "\n  {}", comment_line(c));
    }
    res
}

pub fn article_line(a: &Article) -> String {
    let mut res = format!("[{}] {}", a.id, or_unknown(a.title.as_deref()));
    if let Some(e) = &a.expert_profile {
        let _ = write!(res, " by {}", or_unknown(e.name()));
    }
    if let Some(t) = &a.updated_at.or(a.created_at) {
        let _ = write!(res, ", {}", format_date(t));
    }
    if let Some(link) = a.link_url() {
        let _ = write!(res, "\n  {link}");
    }
    if let Some(d) = a.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(res, "\n  {d}");
    }
    res
}

pub fn food_advice_line(a: &FoodAdvice) -> String {
    let mut res = format!("[{}] {}: {}", a.id, a.advice_type, a.content);
    if let Some(e) = &a.expert_profile {
        let _ = write!(res, "\n  by {}", or_unknown(e.name()));
        if let Some(s) = e.specialty.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(res, ", {s}");
        }
    }
    res
}
