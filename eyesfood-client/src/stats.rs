use std::collections::HashMap;

use crate::api::{Comment, UserId};

/// Per-expert badge data, derived from the comments about that expert
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExpertStat {
    pub recommendation_count: usize,
    pub total_comments: usize,

    /// The viewer wrote at least one comment about this expert
    pub user_has_commented: bool,

    /// The viewer wrote at least one comment recommending this expert
    pub user_has_recommended: bool,
}

impl ExpertStat {
    pub fn is_consistent(&self) -> bool {
        self.recommendation_count <= self.total_comments
            && (!self.user_has_recommended || self.user_has_commented)
    }
}

/// Aggregates `comments` into one `ExpertStat` per expert user id
///
/// Experts nobody commented on are absent from the result. Comments that
/// do not name an expert are skipped. An empty viewer id is treated as no
/// viewer at all.
pub fn compute_stats<'a, I>(comments: I, viewer: Option<&UserId>) -> HashMap<UserId, ExpertStat>
where
    I: IntoIterator<Item = &'a Comment>,
{
    let viewer = viewer.filter(|v| !v.is_empty());
    let mut stats = HashMap::<UserId, ExpertStat>::new();
    for c in comments {
        let expert_id = match &c.expert_id {
            Some(e) => e,
            None => {
                tracing::debug!(comment_id = %c.id, "skipping comment without an expert");
                continue;
            }
        };
        let recommended = c.is_recommended.is_recommended();
        let stat = stats.entry(expert_id.clone()).or_default();
        stat.total_comments += 1;
        if recommended {
            stat.recommendation_count += 1;
        }
        if viewer == Some(&c.user_id) {
            stat.user_has_commented = true;
            if recommended {
                stat.user_has_recommended = true;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentId, Recommendation};

    fn comment(user: &str, expert: Option<&str>, rec: Option<bool>) -> Comment {
        Comment {
            id: CommentId(format!("{user}-{expert:?}-{rec:?}")),
            user_id: UserId::from(user),
            expert_id: expert.map(UserId::from),
            content: Some(String::from("lorem ipsum")),
            is_hidden: false,
            is_recommended: Recommendation::from(rec),
            created_at: None,
            user: None,
            expert: None,
        }
    }

    fn stat(recs: usize, total: usize, commented: bool, recommended: bool) -> ExpertStat {
        ExpertStat {
            recommendation_count: recs,
            total_comments: total,
            user_has_commented: commented,
            user_has_recommended: recommended,
        }
    }

    #[test]
    fn basic_aggregation() {
        let comments = vec![
            comment("u1", Some("e1"), Some(true)),
            comment("u2", Some("e1"), Some(false)),
            comment("u1", Some("e2"), None),
        ];
        let stats = compute_stats(&comments, Some(&UserId::from("u1")));
        let mut expected = HashMap::new();
        expected.insert(UserId::from("e1"), stat(1, 2, true, true));
        expected.insert(UserId::from("e2"), stat(0, 1, true, false));
        assert_eq!(stats, expected);
    }

    #[test]
    fn empty_input() {
        let none: Vec<Comment> = Vec::new();
        assert!(compute_stats(&none, Some(&UserId::from("u1"))).is_empty());
        assert!(compute_stats(&none, None).is_empty());
    }

    #[test]
    fn comments_without_expert_are_skipped() {
        let comments = vec![
            comment("u1", None, Some(true)),
            comment("u2", Some("e1"), Some(true)),
            comment("u1", None, None),
        ];
        let stats = compute_stats(&comments, Some(&UserId::from("u1")));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[&UserId::from("e1")], stat(1, 1, false, false));
    }

    #[test]
    fn not_recommended_and_undecided_are_never_counted() {
        let comments = vec![
            comment("u1", Some("e1"), Some(false)),
            comment("u1", Some("e1"), None),
        ];
        let stats = compute_stats(&comments, Some(&UserId::from("u1")));
        assert_eq!(stats[&UserId::from("e1")], stat(0, 2, true, false));
    }

    #[test]
    fn anonymous_viewer_sets_no_flags() {
        let comments = vec![comment("", Some("e1"), Some(true))];
        for viewer in [None, Some(UserId::from(""))] {
            let stats = compute_stats(&comments, viewer.as_ref());
            assert_eq!(stats[&UserId::from("e1")], stat(1, 1, false, false));
        }
    }

    fn build(raw: &[(u8, Option<u8>, Option<bool>)]) -> Vec<Comment> {
        raw.iter()
            .map(|(u, e, rec)| {
                let user = format!("u{}", u % 4);
                let expert = e.map(|e| format!("e{}", e % 4));
                comment(&user, expert.as_deref(), *rec)
            })
            .collect()
    }

    #[test]
    fn invariants_hold() {
        bolero::check!()
            .with_type::<Vec<(u8, Option<u8>, Option<bool>)>>()
            .for_each(|raw| {
                let comments = build(raw);
                let stats = compute_stats(&comments, Some(&UserId::from("u0")));
                for s in stats.values() {
                    assert!(s.is_consistent(), "inconsistent stat {s:?}");
                    assert!(s.total_comments > 0);
                }
                let counted: usize = stats.values().map(|s| s.total_comments).sum();
                let with_expert = comments.iter().filter(|c| c.expert_id.is_some()).count();
                assert_eq!(counted, with_expert);
            });
    }

    #[test]
    fn order_independent_and_idempotent() {
        bolero::check!()
            .with_type::<(Vec<(u8, Option<u8>, Option<bool>)>, Vec<u16>)>()
            .for_each(|(raw, keys)| {
                let viewer = UserId::from("u1");
                let comments = build(raw);
                let stats = compute_stats(&comments, Some(&viewer));
                assert_eq!(stats, compute_stats(&comments, Some(&viewer)));

                let mut reversed = comments.clone();
                reversed.reverse();
                assert_eq!(stats, compute_stats(&reversed, Some(&viewer)));

                // any permutation, driven by the generated sort keys
                let mut order = (0..comments.len()).collect::<Vec<_>>();
                order.sort_by_key(|&i| (keys.get(i).copied().unwrap_or(u16::MAX), i));
                let shuffled = order.iter().map(|&i| &comments[i]).collect::<Vec<_>>();
                assert_eq!(stats, compute_stats(shuffled, Some(&viewer)));
            });
    }
}
